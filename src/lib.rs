//! Talkoo TUI Library
//!
//! Exposes the client, model and pure logic so the binary and the
//! integration tests share one implementation.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod prefs;
pub mod services;

/// Sort order for the dictionary list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    NameAsc,       // A-Z
    NameDesc,      // Z-A
    SelectedFirst, // Active dictionary on top, rest A-Z
}

impl SortMode {
    /// Label shown in the status bar and filter box
    pub fn as_str(&self) -> &str {
        match self {
            SortMode::NameAsc => "Name A-Z",
            SortMode::NameDesc => "Name Z-A",
            SortMode::SelectedFirst => "Selected first",
        }
    }

    /// Value written to the preferences store
    pub fn storage_key(&self) -> &'static str {
        match self {
            SortMode::NameAsc => "name_asc",
            SortMode::NameDesc => "name_desc",
            SortMode::SelectedFirst => "selected_first",
        }
    }

    /// Parse a stored value. Unknown values fall back to `NameAsc`.
    pub fn from_storage_key(value: &str) -> Self {
        match value {
            "name_desc" => SortMode::NameDesc,
            "selected_first" => SortMode::SelectedFirst,
            _ => SortMode::NameAsc,
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            SortMode::NameAsc => SortMode::NameDesc,
            SortMode::NameDesc => SortMode::SelectedFirst,
            SortMode::SelectedFirst => SortMode::NameAsc,
        }
    }
}

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Translate,
    Dictionaries,
    Settings,
}

impl Screen {
    pub fn title(&self) -> &str {
        match self {
            Screen::Translate => "Translate",
            Screen::Dictionaries => "Dictionaries",
            Screen::Settings => "Settings",
        }
    }
}
