//! Dictionary panel actions
//!
//! Every list action (refresh, select, delete, filter/sort change) takes a
//! new generation token. Responses carrying an older token are dropped, so
//! overlapping actions can never leave the panel showing stale state.

use std::time::Instant;

use crate::api::EntriesResponse;
use crate::error::ApiResult;
use crate::logic::dict_view::render_dict_list;
use crate::logic::errors::{format_error_message, user_message};
use crate::logic::flip::plan_select_reorder;
use crate::model::dictionary::{DictFocus, DictionaryCollection, RowAction};
use crate::model::entries::EntryView;
use crate::model::types::ConfirmAction;
use crate::model::Model;
use crate::services::ApiRequest;
use crate::Screen;

/// Every list row is one terminal line
const ROW_HEIGHT: u16 = 1;

/// Show the panel and fetch a fresh snapshot
pub fn open_panel(model: &mut Model) -> Vec<ApiRequest> {
    model.ui.screen = Screen::Dictionaries;
    rerender(model);
    refresh(model)
}

/// Start a new list action that ends in a full re-render
pub fn refresh(model: &mut Model) -> Vec<ApiRequest> {
    settle_transition(model);
    let generation = model.dict.next_generation();
    model.dict.loading = true;
    vec![ApiRequest::FetchDictionaries { generation }]
}

/// Render the list from the last snapshot and the current preferences
pub fn rerender(model: &mut Model) {
    let view = match &model.dict.snapshot {
        Some(snapshot) => render_dict_list(snapshot, &model.dict.prefs),
        None => render_dict_list(&DictionaryCollection::default(), &model.dict.prefs),
    };
    model.dict.replace_view(view);
}

/// Jump a running slide to its end position
fn settle_transition(model: &mut Model) {
    if let Some(transition) = model.dict.transition.take() {
        let cursor_name = model.dict.cursor_row().map(|r| r.name.clone());
        transition.commit(&mut model.dict.view);
        restore_cursor(model, cursor_name);
    }
}

fn restore_cursor(model: &mut Model, name: Option<String>) {
    if let Some(idx) = name.and_then(|n| model.dict.view.position(&n)) {
        model.dict.cursor = Some(idx);
    }
}

pub fn select(model: &mut Model, name: &str) -> Vec<ApiRequest> {
    let allowed = model
        .dict
        .view
        .rows
        .iter()
        .any(|r| r.name == name && r.has_action(RowAction::Select));
    if !allowed {
        return Vec::new();
    }

    settle_transition(model);
    let generation = model.dict.next_generation();
    // A snapshot fetch still in flight is now stale
    model.dict.loading = false;
    tracing::debug!("select {} (generation {})", name, generation);
    vec![ApiRequest::SelectDictionary {
        name: name.to_string(),
        generation,
    }]
}

/// Ask before deleting; nothing is sent until the user confirms
pub fn request_delete(model: &mut Model, name: &str) {
    let allowed = model
        .dict
        .view
        .rows
        .iter()
        .any(|r| r.name == name && r.has_action(RowAction::Delete));
    if allowed {
        model.ui.confirm = Some(ConfirmAction::DeleteDictionary {
            name: name.to_string(),
        });
    }
}

pub fn confirm_delete(model: &mut Model, name: &str) -> Vec<ApiRequest> {
    settle_transition(model);
    let generation = model.dict.next_generation();
    model.dict.loading = false;
    vec![ApiRequest::DeleteDictionary {
        name: name.to_string(),
        generation,
    }]
}

/// Fetch entries for the viewer. The open viewer stays until they arrive.
pub fn open_entries(model: &mut Model, name: &str) -> Vec<ApiRequest> {
    let generation = model.dict.next_entries_generation();
    vec![ApiRequest::FetchEntries {
        filename: name.to_string(),
        generation,
    }]
}

pub fn close_entries(model: &mut Model) {
    model.dict.entries = None;
    // Any fetch still in flight must not reopen the viewer
    model.dict.next_entries_generation();
    model.dict.focus = DictFocus::List;
}

/// New filter text: re-render locally right away, then refetch
pub fn set_filter(model: &mut Model, text: String) -> Vec<ApiRequest> {
    model.dict.prefs.filter_text = text;
    rerender(model);
    refresh(model)
}

pub fn cycle_sort(model: &mut Model) -> Vec<ApiRequest> {
    model.dict.prefs.sort_mode = model.dict.prefs.sort_mode.cycle();
    let label = model.dict.prefs.sort_mode.as_str().to_string();
    model.show_toast(format!("Sort: {}", label));
    rerender(model);
    refresh(model)
}

pub fn handle_dictionaries_result(
    model: &mut Model,
    generation: u64,
    result: ApiResult<DictionaryCollection>,
) {
    if !model.dict.is_current(generation) {
        tracing::debug!("dropping stale snapshot (generation {})", generation);
        return;
    }
    model.dict.loading = false;

    match result {
        Ok(collection) => {
            // The open viewer may show a dictionary that no longer exists
            let orphaned = model
                .dict
                .entries
                .as_ref()
                .is_some_and(|view| !collection.names.contains(&view.filename));
            model.dict.snapshot = Some(collection);
            model.dict.load_error = None;
            rerender(model);
            if orphaned {
                close_entries(model);
            }
        }
        Err(e) => {
            // Same as an empty server list, plus a visible reason.
            // The entry viewer stays open: a failed fetch says nothing about it.
            tracing::warn!("Failed to fetch dictionaries: {}", e);
            model.dict.snapshot = Some(DictionaryCollection::default());
            model.dict.load_error = Some(format_error_message(&e));
            rerender(model);
        }
    }
}

pub fn handle_select_result(
    model: &mut Model,
    name: String,
    generation: u64,
    result: ApiResult<()>,
    now: Instant,
) -> Vec<ApiRequest> {
    let current = model.dict.is_current(generation);

    if let Err(e) = result {
        tracing::warn!("Select {} failed: {}", name, e);
        model
            .ui
            .show_alert("Select failed", user_message("Failed to select dictionary", &e));
        return Vec::new();
    }

    // A newer action owns the view; its own re-render shows the selection
    if !current {
        tracing::debug!("dropping stale select of {} (generation {})", name, generation);
        return Vec::new();
    }

    if let Some(snapshot) = &mut model.dict.snapshot {
        snapshot.selected = Some(name.clone());
    }
    model.dict.view.apply_selection_patch(&name);

    let planned = plan_select_reorder(
        &model.dict.view,
        &name,
        model.dict.prefs.sort_mode,
        |_| ROW_HEIGHT,
        now,
        generation,
    );
    match planned {
        // Re-render once the slide finishes (see `tick`)
        Some(transition) => {
            model.dict.transition = Some(transition);
            Vec::new()
        }
        None => refresh(model),
    }
}

pub fn handle_delete_result(
    model: &mut Model,
    name: String,
    generation: u64,
    result: ApiResult<()>,
) -> Vec<ApiRequest> {
    match result {
        Ok(()) => {
            if model.dict.entries.as_ref().is_some_and(|v| v.filename == name) {
                close_entries(model);
            }
            // Even when superseded: a fetch issued before the delete landed
            // may still list the deleted dictionary
            if !model.dict.is_current(generation) {
                tracing::debug!("delete of {} finished after a newer action", name);
            }
            refresh(model)
        }
        Err(e) => {
            tracing::warn!("Delete {} failed: {}", name, e);
            model
                .ui
                .show_alert("Delete failed", user_message("Failed to delete dictionary", &e));
            Vec::new()
        }
    }
}

pub fn handle_entries_result(
    model: &mut Model,
    filename: String,
    generation: u64,
    result: ApiResult<EntriesResponse>,
) {
    if generation != model.dict.entries_generation {
        tracing::debug!("dropping stale entries of {}", filename);
        return;
    }

    match result {
        Ok(response) => {
            model.dict.entries = Some(EntryView::new(response));
            model.dict.focus = DictFocus::Entries;
        }
        Err(e) => {
            tracing::warn!("Loading entries of {} failed: {}", filename, e);
            model
                .ui
                .show_alert("Entries", user_message("Failed to load dictionary", &e));
        }
    }
}

/// Advance the reorder slide; once it ends, commit and re-render
pub fn tick(model: &mut Model, now: Instant) -> Vec<ApiRequest> {
    let finished = model
        .dict
        .transition
        .as_ref()
        .is_some_and(|t| t.is_finished(now));
    if !finished {
        return Vec::new();
    }

    let generation = model.dict.transition.as_ref().map(|t| t.generation);
    settle_transition(model);
    match generation {
        Some(g) if model.dict.is_current(g) => refresh(model),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::logic::flip::FLIP_DURATION;
    use crate::model::dictionary::ViewPreferences;
    use crate::SortMode;
    use reqwest::StatusCode;

    fn model_with(names: &[&str], selected: Option<&str>, sort_mode: SortMode) -> Model {
        let mut model = Model::new(
            false,
            ViewPreferences {
                filter_text: String::new(),
                sort_mode,
            },
        );
        let generation = model.dict.next_generation();
        handle_dictionaries_result(
            &mut model,
            generation,
            Ok(DictionaryCollection::new(
                names.iter().map(|s| s.to_string()).collect(),
                selected.map(|s| s.to_string()),
            )),
        );
        model
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        }
    }

    #[test]
    fn test_refresh_bumps_generation() {
        let mut model = model_with(&["a"], None, SortMode::NameAsc);
        let before = model.dict.generation;
        let requests = refresh(&mut model);
        assert!(matches!(
            requests.as_slice(),
            [ApiRequest::FetchDictionaries { generation }] if *generation == before + 1
        ));
        assert!(model.dict.loading);
    }

    #[test]
    fn test_stale_snapshot_is_dropped() {
        let mut model = model_with(&["a", "b"], None, SortMode::NameAsc);
        let old = model.dict.generation;
        refresh(&mut model);

        handle_dictionaries_result(
            &mut model,
            old,
            Ok(DictionaryCollection::new(vec!["zzz".to_string()], None)),
        );
        assert_eq!(model.dict.view.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_fetch_failure_shows_empty_list_with_error() {
        let mut model = model_with(&["a"], None, SortMode::NameAsc);
        let generation = model.dict.next_generation();
        handle_dictionaries_result(&mut model, generation, Err(server_error()));
        assert!(model.dict.view.rows.is_empty());
        assert!(model.dict.view.empty_message.is_some());
        assert!(model.dict.load_error.is_some());
    }

    #[test]
    fn test_select_ignored_for_selected_row() {
        let mut model = model_with(&["a", "b"], Some("a"), SortMode::NameAsc);
        assert!(select(&mut model, "a").is_empty());
        assert_eq!(select(&mut model, "b").len(), 1);
    }

    #[test]
    fn test_select_ok_without_animation_refreshes() {
        let mut model = model_with(&["a", "b"], None, SortMode::NameAsc);
        let requests = select(&mut model, "b");
        let generation = match requests.as_slice() {
            [ApiRequest::SelectDictionary { generation, .. }] => *generation,
            other => panic!("unexpected {:?}", other),
        };

        let follow_up =
            handle_select_result(&mut model, "b".to_string(), generation, Ok(()), Instant::now());
        assert!(matches!(
            follow_up.as_slice(),
            [ApiRequest::FetchDictionaries { .. }]
        ));
        assert!(model.dict.transition.is_none());
        // Optimistic patch applied before the authoritative re-render
        assert!(model.dict.view.rows[1].selected);
        assert!(model.dict.view.rows.iter().all(|r| !r.show_controls));
    }

    #[test]
    fn test_select_failure_alerts_and_keeps_view() {
        let mut model = model_with(&["a", "b"], None, SortMode::NameAsc);
        let before = model.dict.view.clone();
        let requests = select(&mut model, "b");
        let generation = model.dict.generation;
        assert_eq!(requests.len(), 1);

        let follow_up = handle_select_result(
            &mut model,
            "b".to_string(),
            generation,
            Err(server_error()),
            Instant::now(),
        );
        assert!(follow_up.is_empty());
        assert!(model.ui.alert.is_some());
        assert_eq!(model.dict.view, before);
    }

    #[test]
    fn test_select_under_selected_first_animates_then_refreshes() {
        let mut model = model_with(&["a", "b", "c"], Some("a"), SortMode::SelectedFirst);
        select(&mut model, "c");
        let generation = model.dict.generation;
        let start = Instant::now();

        let follow_up =
            handle_select_result(&mut model, "c".to_string(), generation, Ok(()), start);
        assert!(follow_up.is_empty());
        let transition = model.dict.transition.as_ref().unwrap();
        assert_eq!(transition.delta("c"), -2);

        // Mid-slide: nothing happens yet
        assert!(tick(&mut model, start + FLIP_DURATION / 2).is_empty());
        assert!(model.dict.transition.is_some());

        let requests = tick(&mut model, start + FLIP_DURATION);
        assert!(matches!(
            requests.as_slice(),
            [ApiRequest::FetchDictionaries { .. }]
        ));
        assert!(model.dict.transition.is_none());
        assert_eq!(model.dict.view.names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_newer_action_settles_running_slide() {
        let mut model = model_with(&["a", "b", "c"], Some("a"), SortMode::SelectedFirst);
        select(&mut model, "c");
        let generation = model.dict.generation;
        let start = Instant::now();
        handle_select_result(&mut model, "c".to_string(), generation, Ok(()), start);

        refresh(&mut model);
        assert!(model.dict.transition.is_none());
        assert_eq!(model.dict.view.names(), vec!["c", "a", "b"]);
        // The old slide's generation is no longer current
        assert!(tick(&mut model, start + FLIP_DURATION).is_empty());
    }

    #[test]
    fn test_stale_select_response_is_dropped() {
        let mut model = model_with(&["a", "b", "c"], None, SortMode::NameAsc);
        select(&mut model, "b");
        let first = model.dict.generation;
        select(&mut model, "c");

        let follow_up =
            handle_select_result(&mut model, "b".to_string(), first, Ok(()), Instant::now());
        assert!(follow_up.is_empty());
        assert!(model.dict.view.rows.iter().all(|r| !r.selected));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut model = model_with(&["a", "b"], Some("a"), SortMode::NameAsc);
        request_delete(&mut model, "a");
        assert!(model.ui.confirm.is_none());

        request_delete(&mut model, "b");
        assert_eq!(
            model.ui.confirm,
            Some(ConfirmAction::DeleteDictionary {
                name: "b".to_string()
            })
        );
    }

    #[test]
    fn test_delete_ok_refreshes_and_closes_viewer() {
        let mut model = model_with(&["a", "b"], None, SortMode::NameAsc);
        model.dict.entries = Some(EntryView::new(EntriesResponse {
            filename: "b".to_string(),
            main_fuzzy: None,
            entries: vec![],
        }));
        confirm_delete(&mut model, "b");
        let generation = model.dict.generation;

        let follow_up = handle_delete_result(&mut model, "b".to_string(), generation, Ok(()));
        assert_eq!(follow_up.len(), 1);
        assert!(model.dict.entries.is_none());
    }

    #[test]
    fn test_delete_failure_alerts() {
        let mut model = model_with(&["a", "b"], None, SortMode::NameAsc);
        confirm_delete(&mut model, "b");
        let generation = model.dict.generation;
        let follow_up =
            handle_delete_result(&mut model, "b".to_string(), generation, Err(server_error()));
        assert!(follow_up.is_empty());
        assert_eq!(
            model.ui.alert.as_ref().map(|a| a.title.as_str()),
            Some("Delete failed")
        );
    }

    #[test]
    fn test_closed_viewer_ignores_late_entries() {
        let mut model = model_with(&["a"], None, SortMode::NameAsc);
        open_entries(&mut model, "a");
        let generation = model.dict.entries_generation;
        close_entries(&mut model);

        handle_entries_result(
            &mut model,
            "a".to_string(),
            generation,
            Ok(EntriesResponse {
                filename: "a".to_string(),
                main_fuzzy: None,
                entries: vec![],
            }),
        );
        assert!(model.dict.entries.is_none());
    }

    #[test]
    fn test_filter_rerenders_immediately() {
        let mut model = model_with(&["ABCdef", "xyz", "abcxyz"], None, SortMode::NameAsc);
        let requests = set_filter(&mut model, "abc".to_string());
        assert_eq!(model.dict.view.names(), vec!["ABCdef", "abcxyz"]);
        assert_eq!(requests.len(), 1);
    }

    #[test]
    fn test_cycle_sort() {
        let mut model = model_with(&["b", "a", "c"], Some("c"), SortMode::NameDesc);
        cycle_sort(&mut model);
        assert_eq!(model.dict.prefs.sort_mode, SortMode::SelectedFirst);
        assert_eq!(model.dict.view.names(), vec!["c", "a", "b"]);
        assert!(model.ui.toast_message.is_some());
    }

    #[test]
    fn test_superseded_select_failure_still_alerts() {
        let mut model = model_with(&["a", "b"], Some("a"), SortMode::NameAsc);
        select(&mut model, "b");
        let generation = model.dict.generation;
        // User keeps typing before the select comes back
        set_filter(&mut model, "b".to_string());

        let follow_up = handle_select_result(
            &mut model,
            "b".to_string(),
            generation,
            Err(server_error()),
            Instant::now(),
        );
        assert!(follow_up.is_empty());
        assert_eq!(
            model.ui.alert.as_ref().map(|a| a.title.as_str()),
            Some("Select failed")
        );
    }

    #[test]
    fn test_superseded_delete_still_refreshes() {
        let mut model = model_with(&["a", "b"], None, SortMode::NameAsc);
        model.dict.entries = Some(EntryView::new(EntriesResponse {
            filename: "b".to_string(),
            main_fuzzy: None,
            entries: vec![],
        }));
        confirm_delete(&mut model, "b");
        let generation = model.dict.generation;
        refresh(&mut model);
        let superseding = model.dict.generation;

        let follow_up = handle_delete_result(&mut model, "b".to_string(), generation, Ok(()));
        assert!(matches!(
            follow_up.as_slice(),
            [ApiRequest::FetchDictionaries { generation }] if *generation > superseding
        ));
        assert!(model.dict.entries.is_none());
    }

    #[test]
    fn test_superseded_delete_failure_still_alerts() {
        let mut model = model_with(&["a", "b"], None, SortMode::NameAsc);
        confirm_delete(&mut model, "b");
        let generation = model.dict.generation;
        cycle_sort(&mut model);

        let follow_up =
            handle_delete_result(&mut model, "b".to_string(), generation, Err(server_error()));
        assert!(follow_up.is_empty());
        assert_eq!(
            model.ui.alert.as_ref().map(|a| a.title.as_str()),
            Some("Delete failed")
        );
    }

    #[test]
    fn test_loading_cleared_when_action_supersedes_fetch() {
        let mut model = model_with(&["a", "b"], Some("a"), SortMode::NameAsc);
        set_filter(&mut model, String::new());
        let fetch_generation = model.dict.generation;
        assert!(model.dict.loading);

        select(&mut model, "b");
        let select_generation = model.dict.generation;
        handle_dictionaries_result(
            &mut model,
            fetch_generation,
            Ok(DictionaryCollection::new(
                vec!["a".to_string(), "b".to_string()],
                Some("a".to_string()),
            )),
        );
        handle_select_result(
            &mut model,
            "b".to_string(),
            select_generation,
            Err(server_error()),
            Instant::now(),
        );

        assert!(!model.dict.loading);
        assert!(model.ui.alert.is_some());
    }

    #[test]
    fn test_failed_refresh_keeps_entry_viewer() {
        let mut model = model_with(&["a", "b"], None, SortMode::NameAsc);
        model.dict.entries = Some(EntryView::new(EntriesResponse {
            filename: "b".to_string(),
            main_fuzzy: None,
            entries: vec![],
        }));
        model.dict.focus = DictFocus::Entries;

        refresh(&mut model);
        let generation = model.dict.generation;
        handle_dictionaries_result(&mut model, generation, Err(server_error()));

        assert!(model.dict.load_error.is_some());
        assert_eq!(
            model.dict.entries.as_ref().map(|v| v.filename.as_str()),
            Some("b")
        );
        assert_eq!(model.dict.focus, DictFocus::Entries);
    }
}
