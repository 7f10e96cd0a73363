//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models for maintainability:
//!
//! - **DictPanel**: Dictionary list, reorder animation, entry viewer
//! - **TranslationModel**: Source text, per-mode results
//! - **SettingsModel**: Settings form for the current tab
//! - **UiModel**: Screen, dialogs, prompts
//!
//! Key principles:
//! - Clone + Debug: Can snapshot state
//! - No services: All I/O lives in the runtime
//! - Pure accessors: Helper methods are side-effect free

pub mod dictionary;
pub mod entries;
pub mod settings;
pub mod translation;
pub mod types;
pub mod ui;

pub use dictionary::DictPanel;
pub use settings::SettingsModel;
pub use translation::TranslationModel;
pub use types::*;
pub use ui::UiModel;

use dictionary::ViewPreferences;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub dict: DictPanel,

    pub translation: TranslationModel,

    pub settings: SettingsModel,

    /// UI state and popups
    pub ui: UiModel,
}

impl Model {
    /// Create initial model with remembered dictionary view preferences
    pub fn new(vim_mode: bool, prefs: ViewPreferences) -> Self {
        Self {
            dict: DictPanel::new(prefs),
            translation: TranslationModel::default(),
            settings: SettingsModel::new(),
            ui: UiModel::new(vim_mode),
        }
    }

    /// Check if any modal dialog is showing
    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    /// Whether keystrokes currently go into a text field
    pub fn is_typing(&self) -> bool {
        self.ui.upload_prompt.is_some()
            || self.translation.editing
            || self.settings.editing.is_some()
            || matches!(
                self.dict.focus,
                dictionary::DictFocus::Filter | dictionary::DictFocus::Entries
            )
    }

    pub fn show_toast(&mut self, message: String) {
        self.ui.show_toast(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SortMode;

    #[test]
    fn test_model_creation() {
        let prefs = ViewPreferences {
            filter_text: "abc".to_string(),
            sort_mode: SortMode::SelectedFirst,
        };
        let model = Model::new(false, prefs.clone());
        assert_eq!(model.dict.prefs, prefs);
        assert!(model.dict.snapshot.is_none());
        assert!(!model.ui.vim_mode);
        assert!(!model.has_modal());
        assert!(!model.is_typing());
    }

    #[test]
    fn test_model_is_cloneable() {
        let model = Model::new(false, ViewPreferences::default());
        let _cloned = model.clone();
    }

    #[test]
    fn test_is_typing_in_translation_box() {
        let mut model = Model::new(false, ViewPreferences::default());
        model.translation.editing = true;
        assert!(model.is_typing());
    }
}
