//! Translation form actions

use crate::api::TranslationResponse;
use crate::error::ApiResult;
use crate::logic::errors::{classify, ErrorKind};
use crate::logic::ui::cycle_translate_mode;
use crate::model::translation::{TranslateMode, NETWORK_ERROR, TRANSLATION_FAILED};
use crate::model::Model;
use crate::services::ApiRequest;

pub const EMPTY_INPUT: &str = "Enter text to translate.";

/// Submit the source text. Empty input is rejected before any request.
pub fn submit(model: &mut Model) -> Vec<ApiRequest> {
    if model.translation.in_flight {
        return Vec::new();
    }

    let text = model.translation.source.trim().to_string();
    if text.is_empty() {
        model.ui.show_alert("Translate", EMPTY_INPUT);
        return Vec::new();
    }

    let t = &mut model.translation;
    t.generation += 1;
    t.in_flight = true;
    t.editing = false;
    t.notice = None;
    t.show_reason = false;
    vec![ApiRequest::Translate {
        text,
        generation: t.generation,
    }]
}

pub fn handle_translate_result(
    model: &mut Model,
    generation: u64,
    result: ApiResult<TranslationResponse>,
) {
    let t = &mut model.translation;
    if generation != t.generation {
        tracing::debug!("dropping stale translation (generation {})", generation);
        return;
    }
    t.in_flight = false;

    match result {
        Ok(response) => t.apply_response(&response),
        Err(e) => {
            tracing::warn!("Translation failed: {}", e);
            let notice = match classify(&e) {
                ErrorKind::Status => TRANSLATION_FAILED,
                _ => NETWORK_ERROR,
            };
            t.notice = Some(notice.to_string());
        }
    }
}

/// Mode switching is locked while a translation is running
pub fn set_mode(model: &mut Model, mode: TranslateMode) {
    if !model.translation.in_flight {
        model.translation.set_mode(mode);
    }
}

pub fn cycle_mode(model: &mut Model, forward: bool) {
    let next = cycle_translate_mode(model.translation.mode, forward);
    set_mode(model, next);
}

pub fn toggle_reason(model: &mut Model) {
    let t = &mut model.translation;
    if t.can_show_reason() {
        t.show_reason = !t.show_reason;
    }
}
