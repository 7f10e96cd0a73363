//! External Services
//!
//! This module contains services that interact with external systems:
//! - api: API request queue service
//! - upload: Dictionary upload pipeline

pub mod api;
pub mod upload;

// Re-export commonly used types for convenience
pub use api::{spawn_api_service, ApiRequest, ApiResponse, OverwriteReply, Priority};
pub use upload::{run_upload, ConfirmOverwrite, UploadReport};
