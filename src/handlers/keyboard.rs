//! Keyboard Input Handler
//!
//! Turns key presses into model updates. Returns the API requests the
//! runtime should send; nothing here blocks or touches the network.
//!
//! Precedence: Ctrl-C, then open dialogs (alert, confirm, upload prompt),
//! then global screen keys, then the active screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use talkoo_tui::app;
use talkoo_tui::model::dictionary::DictFocus;
use talkoo_tui::model::types::{ConfirmAction, VimCommandState};
use talkoo_tui::model::Model;
use talkoo_tui::services::ApiRequest;
use talkoo_tui::Screen;

/// Rows moved by PageUp/PageDown
const PAGE_STEP: isize = 10;

/// Handle keyboard input
pub fn handle_key(model: &mut Model, key: KeyEvent) -> Vec<ApiRequest> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        model.ui.should_quit = true;
        return Vec::new();
    }

    if model.ui.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            model.ui.alert = None;
        }
        return Vec::new();
    }

    if model.ui.confirm.is_some() {
        return handle_confirm_key(model, key);
    }

    if model.ui.upload_prompt.is_some() {
        return handle_upload_prompt_key(model, key);
    }

    // Function keys work even while typing
    match key.code {
        KeyCode::F(1) => return switch_screen(model, Screen::Translate),
        KeyCode::F(2) => return switch_screen(model, Screen::Dictionaries),
        KeyCode::F(3) => return switch_screen(model, Screen::Settings),
        _ => {}
    }

    if !model.is_typing() {
        match key.code {
            KeyCode::Char('q') => {
                model.ui.should_quit = true;
                return Vec::new();
            }
            KeyCode::Char('1') => return switch_screen(model, Screen::Translate),
            KeyCode::Char('2') => return switch_screen(model, Screen::Dictionaries),
            KeyCode::Char('3') => return switch_screen(model, Screen::Settings),
            _ => {}
        }
    }

    match model.ui.screen {
        Screen::Translate => handle_translate_key(model, key),
        Screen::Dictionaries => handle_dictionaries_key(model, key),
        Screen::Settings => handle_settings_key(model, key),
    }
}

pub fn switch_screen(model: &mut Model, screen: Screen) -> Vec<ApiRequest> {
    if model.ui.screen == screen {
        return Vec::new();
    }
    leave_text_fields(model);
    match screen {
        Screen::Translate => {
            model.ui.screen = Screen::Translate;
            Vec::new()
        }
        Screen::Dictionaries => app::dictionary::open_panel(model),
        Screen::Settings => app::settings::open_settings(model),
    }
}

fn leave_text_fields(model: &mut Model) {
    model.translation.editing = false;
    model.settings.cancel_edit();
    if model.dict.focus == DictFocus::Filter {
        model.dict.focus = DictFocus::List;
    }
}

fn handle_confirm_key(model: &mut Model, key: KeyEvent) -> Vec<ApiRequest> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => match model.ui.answer_confirm(true) {
            Some(ConfirmAction::DeleteDictionary { name }) => {
                app::dictionary::confirm_delete(model, &name)
            }
            _ => Vec::new(),
        },
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            model.ui.answer_confirm(false);
            Vec::new()
        }
        // Ignore other keys while the question is showing
        _ => Vec::new(),
    }
}

fn handle_upload_prompt_key(model: &mut Model, key: KeyEvent) -> Vec<ApiRequest> {
    match key.code {
        KeyCode::Esc => {
            model.ui.upload_prompt = None;
            Vec::new()
        }
        KeyCode::Enter => app::upload::submit_prompt(model),
        KeyCode::Backspace => {
            if let Some(input) = model.ui.upload_prompt.as_mut() {
                input.pop();
            }
            Vec::new()
        }
        KeyCode::Char(c) => {
            if let Some(input) = model.ui.upload_prompt.as_mut() {
                input.push(c);
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_translate_key(model: &mut Model, key: KeyEvent) -> Vec<ApiRequest> {
    if model.translation.editing {
        // Input is locked while a request is in flight
        if model.translation.in_flight {
            if key.code == KeyCode::Esc {
                model.translation.editing = false;
            }
            return Vec::new();
        }
        match key.code {
            KeyCode::Esc => model.translation.editing = false,
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                model.translation.source.push('\n');
            }
            KeyCode::Enter => return app::translation::submit(model),
            KeyCode::Backspace => {
                model.translation.source.pop();
            }
            KeyCode::Char(c) => model.translation.source.push(c),
            _ => {}
        }
        return Vec::new();
    }

    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => {
            if !model.translation.in_flight {
                model.translation.editing = true;
            }
        }
        KeyCode::Char('t') => return app::translation::submit(model),
        KeyCode::Char('m') | KeyCode::Right | KeyCode::Tab => {
            app::translation::cycle_mode(model, true)
        }
        KeyCode::Left | KeyCode::BackTab => app::translation::cycle_mode(model, false),
        KeyCode::Char('r') => app::translation::toggle_reason(model),
        KeyCode::Char('x') => {
            if !model.translation.in_flight {
                model.translation.source.clear();
            }
        }
        KeyCode::Esc => model.translation.show_reason = false,
        _ => {}
    }
    Vec::new()
}

fn handle_dictionaries_key(model: &mut Model, key: KeyEvent) -> Vec<ApiRequest> {
    match model.dict.focus {
        DictFocus::Filter => handle_filter_key(model, key),
        DictFocus::Entries => handle_entries_key(model, key),
        DictFocus::List => handle_list_key(model, key),
    }
}

fn handle_filter_key(model: &mut Model, key: KeyEvent) -> Vec<ApiRequest> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
            model.dict.focus = DictFocus::List;
            Vec::new()
        }
        KeyCode::Backspace => {
            let mut text = model.dict.prefs.filter_text.clone();
            if text.pop().is_none() {
                return Vec::new();
            }
            app::dictionary::set_filter(model, text)
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app::dictionary::set_filter(model, String::new())
        }
        KeyCode::Char(c) => {
            let mut text = model.dict.prefs.filter_text.clone();
            text.push(c);
            app::dictionary::set_filter(model, text)
        }
        _ => Vec::new(),
    }
}

fn handle_entries_key(model: &mut Model, key: KeyEvent) -> Vec<ApiRequest> {
    let Some(entries) = model.dict.entries.as_mut() else {
        model.dict.focus = DictFocus::List;
        return Vec::new();
    };

    match key.code {
        KeyCode::Esc => app::dictionary::close_entries(model),
        KeyCode::Tab => model.dict.focus = DictFocus::List,
        KeyCode::Up => entries.scroll_by(-1),
        KeyCode::Down => entries.scroll_by(1),
        KeyCode::PageUp => entries.scroll_by(-PAGE_STEP),
        KeyCode::PageDown => entries.scroll_by(PAGE_STEP),
        KeyCode::Backspace => {
            let mut query = entries.query.clone();
            query.pop();
            entries.set_query(query);
        }
        KeyCode::Char(c) => {
            let mut query = entries.query.clone();
            query.push(c);
            entries.set_query(query);
        }
        _ => {}
    }
    Vec::new()
}

fn handle_list_key(model: &mut Model, key: KeyEvent) -> Vec<ApiRequest> {
    if model.ui.vim_mode {
        if let Some(requests) = handle_vim_list_key(model, key) {
            return requests;
        }
    }

    let cursor_name = model.dict.cursor_row().map(|r| r.name.clone());
    match key.code {
        KeyCode::Up => model.dict.move_cursor(-1),
        KeyCode::Down => model.dict.move_cursor(1),
        KeyCode::PageUp => model.dict.move_cursor(-PAGE_STEP),
        KeyCode::PageDown => model.dict.move_cursor(PAGE_STEP),
        KeyCode::Home => model.dict.move_cursor(isize::MIN / 2),
        KeyCode::End => model.dict.move_cursor(isize::MAX / 2),
        KeyCode::Enter => {
            if let Some(name) = cursor_name {
                return app::dictionary::open_entries(model, &name);
            }
        }
        KeyCode::Char('s') | KeyCode::Char(' ') => {
            if let Some(name) = cursor_name {
                return app::dictionary::select(model, &name);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(name) = cursor_name {
                app::dictionary::request_delete(model, &name);
            }
        }
        KeyCode::Char('/') => model.dict.focus = DictFocus::Filter,
        KeyCode::Char('o') => return app::dictionary::cycle_sort(model),
        KeyCode::Char('u') => app::upload::open_prompt(model),
        KeyCode::Char('R') => return app::dictionary::refresh(model),
        KeyCode::Tab => {
            if model.dict.entries.is_some() {
                model.dict.focus = DictFocus::Entries;
            }
        }
        KeyCode::Esc => {
            if model.dict.entries.is_some() {
                app::dictionary::close_entries(model);
            } else {
                model.ui.screen = Screen::Translate;
            }
        }
        _ => {}
    }
    Vec::new()
}

/// Vim motions for the list. `None` means the key was not a vim motion.
fn handle_vim_list_key(model: &mut Model, key: KeyEvent) -> Option<Vec<ApiRequest>> {
    let waiting = model.ui.vim_command_state == VimCommandState::WaitingForSecondG;
    model.ui.vim_command_state = VimCommandState::None;

    match key.code {
        KeyCode::Char('j') => model.dict.move_cursor(1),
        KeyCode::Char('k') => model.dict.move_cursor(-1),
        KeyCode::Char('g') if waiting => model.dict.move_cursor(isize::MIN / 2),
        KeyCode::Char('g') => model.ui.vim_command_state = VimCommandState::WaitingForSecondG,
        KeyCode::Char('G') => model.dict.move_cursor(isize::MAX / 2),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            model.dict.move_cursor(PAGE_STEP)
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            model.dict.move_cursor(-PAGE_STEP)
        }
        _ => return None,
    }
    Some(Vec::new())
}

fn handle_settings_key(model: &mut Model, key: KeyEvent) -> Vec<ApiRequest> {
    if let Some(text) = model.settings.editing.as_mut() {
        match key.code {
            KeyCode::Enter => model.settings.commit_edit(),
            KeyCode::Esc => model.settings.cancel_edit(),
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(c) => text.push(c),
            _ => {}
        }
        return Vec::new();
    }

    let vim = model.ui.vim_mode;
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            let next = model.settings.tab.next();
            return app::settings::switch_tab(model, next);
        }
        KeyCode::Up => model.settings.move_cursor(-1),
        KeyCode::Down => model.settings.move_cursor(1),
        KeyCode::Char('k') if vim => model.settings.move_cursor(-1),
        KeyCode::Char('j') if vim => model.settings.move_cursor(1),
        KeyCode::Left => model.settings.cycle_current(false),
        KeyCode::Right => model.settings.cycle_current(true),
        KeyCode::Char('h') if vim => model.settings.cycle_current(false),
        KeyCode::Char('l') if vim => model.settings.cycle_current(true),
        KeyCode::Enter => match model.settings.current_field() {
            Some(def) if !def.options().is_empty() => model.settings.cycle_current(true),
            _ => model.settings.begin_edit(),
        },
        KeyCode::Char('s') => return app::settings::save(model),
        KeyCode::Char('R') => return app::settings::fetch(model),
        KeyCode::Esc => model.ui.screen = Screen::Translate,
        _ => {}
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use talkoo_tui::model::dictionary::{DictionaryCollection, ViewPreferences};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(model: &mut Model, text: &str) -> Vec<ApiRequest> {
        let mut requests = Vec::new();
        for c in text.chars() {
            requests.extend(handle_key(model, press(KeyCode::Char(c))));
        }
        requests
    }

    fn dictionaries_model(names: &[&str], selected: Option<&str>) -> Model {
        let mut model = Model::new(false, ViewPreferences::default());
        app::dictionary::open_panel(&mut model);
        model.dict.snapshot = Some(DictionaryCollection::new(
            names.iter().map(|s| s.to_string()).collect(),
            selected.map(str::to_string),
        ));
        model.dict.loading = false;
        app::dictionary::rerender(&mut model);
        model
    }

    #[test]
    fn test_quit_only_when_not_typing() {
        let mut model = Model::new(false, ViewPreferences::default());
        handle_key(&mut model, press(KeyCode::Enter));
        assert!(model.translation.editing);

        handle_key(&mut model, press(KeyCode::Char('q')));
        assert!(!model.ui.should_quit);
        assert_eq!(model.translation.source, "q");

        handle_key(&mut model, press(KeyCode::Esc));
        handle_key(&mut model, press(KeyCode::Char('q')));
        assert!(model.ui.should_quit);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut model = Model::new(false, ViewPreferences::default());
        model.ui.show_alert("Title", "message");
        handle_key(
            &mut model,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(model.ui.should_quit);
    }

    #[test]
    fn test_screen_switch_fetches() {
        let mut model = Model::new(false, ViewPreferences::default());
        let requests = handle_key(&mut model, press(KeyCode::Char('2')));
        assert_eq!(model.ui.screen, Screen::Dictionaries);
        assert!(matches!(
            requests.as_slice(),
            [ApiRequest::FetchDictionaries { .. }]
        ));

        let requests = handle_key(&mut model, press(KeyCode::F(3)));
        assert_eq!(model.ui.screen, Screen::Settings);
        assert!(matches!(requests.as_slice(), [ApiRequest::FetchSettings { .. }]));

        // Esc returns to the translate screen
        handle_key(&mut model, press(KeyCode::Esc));
        assert_eq!(model.ui.screen, Screen::Translate);
    }

    #[test]
    fn test_alert_swallows_keys() {
        let mut model = Model::new(false, ViewPreferences::default());
        model.ui.show_alert("Title", "message");
        assert!(handle_key(&mut model, press(KeyCode::Char('2'))).is_empty());
        assert_eq!(model.ui.screen, Screen::Translate);

        handle_key(&mut model, press(KeyCode::Enter));
        assert!(model.ui.alert.is_none());
    }

    #[test]
    fn test_translate_enter_submits() {
        let mut model = Model::new(false, ViewPreferences::default());
        handle_key(&mut model, press(KeyCode::Char('i')));
        type_text(&mut model, "hello");
        let requests = handle_key(&mut model, press(KeyCode::Enter));
        assert!(matches!(
            requests.as_slice(),
            [ApiRequest::Translate { text, .. }] if text == "hello"
        ));
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut model = dictionaries_model(&["a", "b"], Some("a"));
        model.dict.cursor = model.dict.view.position("b");

        assert!(handle_key(&mut model, press(KeyCode::Char('d'))).is_empty());
        assert!(model.ui.confirm.is_some());

        let requests = handle_key(&mut model, press(KeyCode::Char('y')));
        assert!(matches!(
            requests.as_slice(),
            [ApiRequest::DeleteDictionary { name, .. }] if name == "b"
        ));
        assert!(model.ui.confirm.is_none());
    }

    #[test]
    fn test_delete_declined_sends_nothing() {
        let mut model = dictionaries_model(&["a", "b"], Some("a"));
        model.dict.cursor = model.dict.view.position("b");
        handle_key(&mut model, press(KeyCode::Char('d')));
        assert!(handle_key(&mut model, press(KeyCode::Char('n'))).is_empty());
        assert!(model.ui.confirm.is_none());
    }

    #[test]
    fn test_filter_typing_rerenders() {
        let mut model = dictionaries_model(&["animals", "colors", "plants"], None);
        handle_key(&mut model, press(KeyCode::Char('/')));
        assert_eq!(model.dict.focus, DictFocus::Filter);

        let requests = type_text(&mut model, "an");
        assert_eq!(requests.len(), 2);
        assert_eq!(model.dict.prefs.filter_text, "an");
        assert_eq!(model.dict.view.names(), vec!["animals", "plants"]);

        handle_key(&mut model, press(KeyCode::Esc));
        assert_eq!(model.dict.focus, DictFocus::List);
        assert_eq!(model.dict.prefs.filter_text, "an");
    }

    #[test]
    fn test_vim_gg_and_g() {
        let mut model = dictionaries_model(&["a", "b", "c"], None);
        model.ui.vim_mode = true;

        handle_key(&mut model, press(KeyCode::Char('G')));
        assert_eq!(model.dict.cursor, Some(2));
        handle_key(&mut model, press(KeyCode::Char('g')));
        assert_eq!(model.dict.cursor, Some(2));
        handle_key(&mut model, press(KeyCode::Char('g')));
        assert_eq!(model.dict.cursor, Some(0));
    }

    #[test]
    fn test_upload_prompt_typing() {
        let mut model = dictionaries_model(&["a"], None);
        handle_key(&mut model, press(KeyCode::Char('u')));
        assert_eq!(model.ui.upload_prompt.as_deref(), Some(""));

        type_text(&mut model, "q1");
        assert_eq!(model.ui.upload_prompt.as_deref(), Some("q1"));
        assert!(!model.ui.should_quit);

        handle_key(&mut model, press(KeyCode::Esc));
        assert!(model.ui.upload_prompt.is_none());
    }

    #[test]
    fn test_settings_input_editing() {
        let mut model = Model::new(false, ViewPreferences::default());
        handle_key(&mut model, press(KeyCode::Char('3')));
        handle_key(&mut model, press(KeyCode::Tab));
        assert_eq!(
            model.settings.tab,
            talkoo_tui::logic::settings::SettingsTab::Translation
        );

        let api_row = model
            .settings
            .fields()
            .iter()
            .position(|d| d.id == "gemini_api")
            .unwrap();
        model.settings.cursor = api_row;
        handle_key(&mut model, press(KeyCode::Enter));
        assert!(model.settings.editing.is_some());

        type_text(&mut model, "key");
        handle_key(&mut model, press(KeyCode::Enter));
        assert!(model.settings.editing.is_none());
        assert!(model.settings.values["gemini_api"]
            .as_str()
            .unwrap()
            .ends_with("key"));
    }
}
