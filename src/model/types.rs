//! Shared types for the Model
//!
//! Dialog and keyboard state used by the UI sub-model.

/// Vim command state for tracking double-key commands like 'gg'
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum VimCommandState {
    #[default]
    None,
    WaitingForSecondG, // First 'g' pressed, waiting for second 'g'
}

/// Blocking message box; every other input waits until it is dismissed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Yes/no question in front of a destructive action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteDictionary { name: String },
    OverwriteUpload { filename: String },
}

impl ConfirmAction {
    pub fn question(&self) -> String {
        match self {
            ConfirmAction::DeleteDictionary { name } => format!("Delete {}?", name),
            ConfirmAction::OverwriteUpload { filename } => {
                format!("{} already exists. Overwrite?", filename)
            }
        }
    }
}
