//! Settings screen actions

use serde_json::{Map, Value};

use crate::error::ApiResult;
use crate::logic::errors::user_message;
use crate::logic::settings::{strip_payload, SettingsTab};
use crate::model::Model;
use crate::services::ApiRequest;
use crate::Screen;

use super::dictionary;

pub fn open_settings(model: &mut Model) -> Vec<ApiRequest> {
    model.ui.screen = Screen::Settings;
    fetch(model)
}

/// Fetch server values for the current tab
pub fn fetch(model: &mut Model) -> Vec<ApiRequest> {
    let generation = model.settings.next_generation();
    model.settings.loading = true;
    vec![ApiRequest::FetchSettings {
        tab: model.settings.tab,
        generation,
    }]
}

pub fn switch_tab(model: &mut Model, tab: SettingsTab) -> Vec<ApiRequest> {
    model.settings.switch_tab(tab);
    fetch(model)
}

pub fn save(model: &mut Model) -> Vec<ApiRequest> {
    if model.settings.saving {
        return Vec::new();
    }
    model.settings.commit_edit();
    model.settings.saving = true;

    let tab = model.settings.tab;
    vec![ApiRequest::SaveSettings {
        tab,
        values: strip_payload(tab, &model.settings.values),
    }]
}

pub fn handle_settings_result(
    model: &mut Model,
    tab: SettingsTab,
    generation: u64,
    result: ApiResult<Map<String, Value>>,
) {
    if generation != model.settings.generation || tab != model.settings.tab {
        tracing::debug!("dropping stale {} settings", tab.title());
        return;
    }

    match result {
        Ok(values) => model.settings.load(Some(&values)),
        Err(e) => {
            // Show defaults rather than an empty form
            tracing::warn!("Failed to fetch {} settings: {}", tab.title(), e);
            model.settings.load(None);
        }
    }
}

pub fn handle_settings_saved(
    model: &mut Model,
    tab: SettingsTab,
    result: ApiResult<()>,
) -> Vec<ApiRequest> {
    model.settings.saving = false;

    match result {
        Ok(()) => {
            tracing::info!("{} settings saved", tab.title());
            model.ui.show_alert("Settings", "Settings saved");
            let mut requests = Vec::new();
            if tab == model.settings.tab {
                requests.extend(fetch(model));
            }
            // Translation settings carry the dictionary selection
            if tab == SettingsTab::Translation {
                requests.extend(dictionary::refresh(model));
            }
            requests
        }
        Err(e) => {
            tracing::warn!("Saving {} settings failed: {}", tab.title(), e);
            model
                .ui
                .show_alert("Settings", user_message("Failed to save settings", &e));
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::model::dictionary::ViewPreferences;
    use reqwest::StatusCode;
    use serde_json::json;

    fn model() -> Model {
        Model::new(false, ViewPreferences::default())
    }

    #[test]
    fn test_fetch_failure_falls_back_to_defaults() {
        let mut model = model();
        open_settings(&mut model);
        let generation = model.settings.generation;

        handle_settings_result(
            &mut model,
            SettingsTab::General,
            generation,
            Err(ApiError::InvalidInput("offline".to_string())),
        );
        assert!(!model.settings.loading);
        assert_eq!(model.settings.values["model_type"], json!(1));
    }

    #[test]
    fn test_result_for_other_tab_is_dropped() {
        let mut model = model();
        open_settings(&mut model);
        let generation = model.settings.generation;
        switch_tab(&mut model, SettingsTab::Translation);

        let server = json!({"model_type": 3});
        handle_settings_result(
            &mut model,
            SettingsTab::General,
            generation,
            Ok(server.as_object().unwrap().clone()),
        );
        assert!(!model.settings.values.contains_key("model_type"));
    }

    #[test]
    fn test_save_sends_stripped_payload_once() {
        let mut model = model();
        let requests = save(&mut model);
        match requests.as_slice() {
            [ApiRequest::SaveSettings { tab, values }] => {
                assert_eq!(*tab, SettingsTab::General);
                assert!(!values.contains_key("log_path"));
            }
            other => panic!("unexpected {:?}", other),
        }
        // A second save while the first is in flight is ignored
        assert!(save(&mut model).is_empty());
    }

    #[test]
    fn test_save_success_alerts_and_refetches() {
        let mut model = model();
        save(&mut model);
        let requests = handle_settings_saved(&mut model, SettingsTab::General, Ok(()));
        assert!(!model.settings.saving);
        assert_eq!(
            model.ui.alert.as_ref().map(|a| a.message.as_str()),
            Some("Settings saved")
        );
        assert!(matches!(
            requests.as_slice(),
            [ApiRequest::FetchSettings { .. }]
        ));
    }

    #[test]
    fn test_save_failure_alerts() {
        let mut model = model();
        save(&mut model);
        let requests = handle_settings_saved(
            &mut model,
            SettingsTab::General,
            Err(ApiError::Status {
                status: StatusCode::BAD_REQUEST,
                body: "bad".to_string(),
            }),
        );
        assert!(requests.is_empty());
        let alert = model.ui.alert.as_ref().unwrap();
        assert!(alert.message.starts_with("Failed to save settings"));
    }
}
