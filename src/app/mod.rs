//! App Update Functions
//!
//! Each submodule holds the actions for one screen. Actions mutate the
//! pure [`Model`](crate::model::Model) and return the API requests the
//! runtime should send; responses come back through [`handle_response`].
//! Nothing here touches the network or the terminal.

pub mod dictionary;
pub mod settings;
pub mod translation;
pub mod upload;

use std::time::Instant;

use crate::model::Model;
use crate::services::{ApiRequest, ApiResponse};

/// Apply one worker response to the model
pub fn handle_response(model: &mut Model, response: ApiResponse, now: Instant) -> Vec<ApiRequest> {
    match response {
        ApiResponse::DictionariesResult { generation, result } => {
            dictionary::handle_dictionaries_result(model, generation, result);
            Vec::new()
        }

        ApiResponse::SelectResult {
            name,
            generation,
            result,
        } => dictionary::handle_select_result(model, name, generation, result, now),

        ApiResponse::DeleteResult {
            name,
            generation,
            result,
        } => dictionary::handle_delete_result(model, name, generation, result),

        ApiResponse::EntriesResult {
            filename,
            generation,
            result,
        } => {
            dictionary::handle_entries_result(model, filename, generation, result);
            Vec::new()
        }

        ApiResponse::OverwriteRequested { filename, reply } => {
            upload::request_overwrite(model, filename, reply);
            Vec::new()
        }

        ApiResponse::UploadFinished { report } => upload::handle_upload_finished(model, report),

        ApiResponse::SettingsResult {
            tab,
            generation,
            result,
        } => {
            settings::handle_settings_result(model, tab, generation, result);
            Vec::new()
        }

        ApiResponse::SettingsSaved { tab, result } => {
            settings::handle_settings_saved(model, tab, result)
        }

        ApiResponse::TranslateResult { generation, result } => {
            translation::handle_translate_result(model, generation, result);
            Vec::new()
        }
    }
}

/// Time-driven updates: reorder slide and toast expiry
pub fn tick(model: &mut Model, now: Instant) -> Vec<ApiRequest> {
    if model.ui.should_dismiss_toast() {
        model.ui.dismiss_toast();
    }
    dictionary::tick(model, now)
}
