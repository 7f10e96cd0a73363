//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - dict_view: Dictionary list rendering (filter + sort + row actions)
//! - errors: Error taxonomy and alert text
//! - filter: Name and entry matching
//! - flip: Reorder animation planning and easing
//! - formatting: Display helpers
//! - layout: Scrolling and pane sizes
//! - settings: Settings form definitions and payload shaping
//! - sorting: Name ordering per sort mode
//! - ui: UI state transitions and cycling

pub mod dict_view;
pub mod errors;
pub mod filter;
pub mod flip;
pub mod formatting;
pub mod layout;
pub mod settings;
pub mod sorting;
pub mod ui;
