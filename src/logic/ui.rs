//! UI state transition logic
//!
//! Pure functions for UI state cycling and transitions.

use crate::model::translation::TranslateMode;

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u128 = 1500;

/// Cycle the translation mode: Model → Dictionary → Gemini → Model
///
/// # Examples
/// ```
/// use talkoo_tui::model::translation::TranslateMode;
/// use talkoo_tui::logic::ui::cycle_translate_mode;
///
/// assert_eq!(cycle_translate_mode(TranslateMode::ModelTrans, true), TranslateMode::PrePostTrans);
/// assert_eq!(cycle_translate_mode(TranslateMode::GeminiIntegra, true), TranslateMode::ModelTrans);
/// assert_eq!(cycle_translate_mode(TranslateMode::ModelTrans, false), TranslateMode::GeminiIntegra);
/// ```
pub fn cycle_translate_mode(current: TranslateMode, forward: bool) -> TranslateMode {
    let modes = TranslateMode::all();
    let idx = modes.iter().position(|m| *m == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % modes.len()
    } else {
        (idx + modes.len() - 1) % modes.len()
    };
    modes[next]
}

pub fn should_dismiss_toast(elapsed_ms: u128) -> bool {
    elapsed_ms >= TOAST_DURATION_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_translate_mode_round_trip() {
        let mut mode = TranslateMode::ModelTrans;
        for _ in 0..3 {
            mode = cycle_translate_mode(mode, true);
        }
        assert_eq!(mode, TranslateMode::ModelTrans);
    }

    #[test]
    fn test_cycle_translate_mode_backwards() {
        assert_eq!(
            cycle_translate_mode(TranslateMode::PrePostTrans, false),
            TranslateMode::ModelTrans
        );
    }

    #[test]
    fn test_toast_dismiss_threshold() {
        assert!(!should_dismiss_toast(0));
        assert!(!should_dismiss_toast(TOAST_DURATION_MS - 1));
        assert!(should_dismiss_toast(TOAST_DURATION_MS));
    }
}
