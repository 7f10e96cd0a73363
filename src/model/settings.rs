//! Settings screen state

use serde_json::{Map, Value};

use crate::logic::settings::{
    cycle_option, definitions, initial_values, value_to_string, SettingDef, SettingsTab,
};

#[derive(Clone, Debug, Default)]
pub struct SettingsModel {
    pub tab: SettingsTab,

    /// Form values for the current tab
    pub values: Map<String, Value>,

    /// Highlighted field
    pub cursor: usize,

    /// Text being typed into an input field
    pub editing: Option<String>,

    /// Values are being fetched; the form shows defaults meanwhile
    pub loading: bool,

    /// Save chain (post, reload model) in flight
    pub saving: bool,

    /// Token of the newest fetch for this screen
    pub generation: u64,
}

impl SettingsModel {
    pub fn new() -> Self {
        Self {
            values: initial_values(SettingsTab::General, None),
            ..Default::default()
        }
    }

    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn fields(&self) -> &'static [SettingDef] {
        definitions(self.tab)
    }

    pub fn current_field(&self) -> Option<&'static SettingDef> {
        self.fields().get(self.cursor)
    }

    pub fn value_of(&self, id: &str) -> Value {
        self.values.get(id).cloned().unwrap_or(Value::Null)
    }

    /// Switch tab, resetting the form to defaults until the server answers
    pub fn switch_tab(&mut self, tab: SettingsTab) {
        self.tab = tab;
        self.cursor = 0;
        self.editing = None;
        self.values = initial_values(tab, None);
    }

    /// Load server values; `None` (fetch failed) falls back to defaults
    pub fn load(&mut self, server: Option<&Map<String, Value>>) {
        self.values = initial_values(self.tab, server);
        self.loading = false;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.fields().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    /// Cycle the highlighted select field
    pub fn cycle_current(&mut self, forward: bool) {
        let Some(def) = self.current_field() else {
            return;
        };
        if let Some(next) = cycle_option(def, &self.value_of(def.id), forward) {
            self.values.insert(def.id.to_string(), next);
        }
    }

    /// Start typing into the highlighted input field
    pub fn begin_edit(&mut self) {
        let Some(def) = self.current_field() else {
            return;
        };
        if def.options().is_empty() && def.is_editable() {
            self.editing = Some(value_to_string(&self.value_of(def.id)));
        }
    }

    pub fn commit_edit(&mut self) {
        let Some(text) = self.editing.take() else {
            return;
        };
        if let Some(def) = self.current_field() {
            self.values.insert(def.id.to_string(), Value::String(text));
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }
}
