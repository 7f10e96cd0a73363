//! Translation form state

use crate::api::TranslationResponse;

/// Shown before the first translation
pub const PLACEHOLDER_TEXT: &str = "Results will appear here.";

/// Server returned nothing for a mode
pub const NO_RESULT: &str = "No translation result.";

pub const PLACEHOLDER_REASON: &str = "Gemini's detailed answer will appear here.";

pub const TRANSLATION_FAILED: &str = "Translation failed.";
pub const NETWORK_ERROR: &str = "Network error.";

/// Which of the three server results is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranslateMode {
    #[default]
    ModelTrans,
    PrePostTrans,
    GeminiIntegra,
}

impl TranslateMode {
    pub fn all() -> [TranslateMode; 3] {
        [
            TranslateMode::ModelTrans,
            TranslateMode::PrePostTrans,
            TranslateMode::GeminiIntegra,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TranslateMode::ModelTrans => "Model",
            TranslateMode::PrePostTrans => "Dictionary",
            TranslateMode::GeminiIntegra => "Gemini",
        }
    }

    fn index(&self) -> usize {
        match self {
            TranslateMode::ModelTrans => 0,
            TranslateMode::PrePostTrans => 1,
            TranslateMode::GeminiIntegra => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub text: String,
    /// Invalid results are drawn dimmed
    pub is_valid: bool,
}

impl TranslationResult {
    fn placeholder() -> Self {
        Self {
            text: PLACEHOLDER_TEXT.to_string(),
            is_valid: false,
        }
    }

    fn from_server(value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(text) => Self {
                text: text.to_string(),
                is_valid: is_valid_result(Some(text)),
            },
            None => Self {
                text: NO_RESULT.to_string(),
                is_valid: false,
            },
        }
    }
}

/// Non-empty after trimming and not the "no result" sentinel
pub fn is_valid_result(value: Option<&str>) -> bool {
    match value {
        Some(text) => !text.trim().is_empty() && text != NO_RESULT,
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationModel {
    pub source: String,
    /// Source box has keyboard focus
    pub editing: bool,
    pub mode: TranslateMode,
    pub results: [TranslationResult; 3],
    pub gemini_reason: String,
    /// A request is in flight; input and mode switching are locked
    pub in_flight: bool,
    /// Failure text replacing the result until the next success or mode switch
    pub notice: Option<String>,
    pub show_reason: bool,
    pub generation: u64,
}

impl Default for TranslationModel {
    fn default() -> Self {
        Self {
            source: String::new(),
            editing: false,
            mode: TranslateMode::default(),
            results: [
                TranslationResult::placeholder(),
                TranslationResult::placeholder(),
                TranslationResult::placeholder(),
            ],
            gemini_reason: PLACEHOLDER_REASON.to_string(),
            in_flight: false,
            notice: None,
            show_reason: false,
            generation: 0,
        }
    }
}

impl TranslationModel {
    pub fn current(&self) -> &TranslationResult {
        &self.results[self.mode.index()]
    }

    /// (text, is_valid) to display for the current mode
    pub fn display(&self) -> (&str, bool) {
        if self.in_flight {
            return ("Translating...", false);
        }
        if let Some(notice) = &self.notice {
            return (notice.as_str(), false);
        }
        let result = self.current();
        (result.text.as_str(), result.is_valid)
    }

    pub fn set_mode(&mut self, mode: TranslateMode) {
        self.mode = mode;
        self.notice = None;
        if mode != TranslateMode::GeminiIntegra {
            self.show_reason = false;
        }
    }

    /// The reason popup only exists in Gemini mode
    pub fn can_show_reason(&self) -> bool {
        self.mode == TranslateMode::GeminiIntegra
    }

    pub fn apply_response(&mut self, response: &TranslationResponse) {
        self.results = [
            TranslationResult::from_server(response.model_trans.as_deref()),
            TranslationResult::from_server(response.pre_post_trans.as_deref()),
            TranslationResult::from_server(response.gemini_integra.as_deref()),
        ];
        self.gemini_reason = response
            .gemini_reason
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| NO_RESULT.to_string());
        self.notice = None;
    }
}
