//! Event Handlers
//!
//! - keyboard: User keyboard input
//!
//! Worker responses are applied by `talkoo_tui::app::handle_response`.
//! Handlers are pure functions over the model that return the requests
//! to send (Elm pattern).

pub mod keyboard;

pub use keyboard::handle_key;
