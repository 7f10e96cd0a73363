// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - icons: Icon rendering (emoji and Nerd Fonts)
// - layout: Calculates screen layout (tabs, content, legend, status)
// - render: Main orchestration function that coordinates all rendering
// - tab_bar: Screen tabs and server address
// - translate: Translation form and Gemini reasoning popup
// - dict_list: Dictionary list with the reorder slide
// - entries: Entry viewer table
// - search: Dictionary filter input
// - settings: Settings form
// - legend: Renders hotkey legend
// - status_bar: One-line summary of the active screen
// - dialogs: Alert, confirmation and upload prompt
// - toast: Renders toast notifications (brief pop-up messages)

pub mod dialogs;
pub mod dict_list;
pub mod entries;
pub mod icons;
pub mod layout;
pub mod legend;
pub mod render;
pub mod search;
pub mod settings;
pub mod status_bar;
pub mod tab_bar;
pub mod toast;
pub mod translate;

// Re-export main render function for convenience
pub use render::{render, ViewState};
