//! Dictionary Model
//!
//! Server snapshot, view preferences and the rendered list for the
//! dictionary panel.

use crate::logic::flip::Transition;
use crate::SortMode;

use super::entries::EntryView;

/// Server-owned set of dictionary names plus the active one.
///
/// Held read-only for one render cycle, refetched on every panel open/action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DictionaryCollection {
    pub names: Vec<String>,
    pub selected: Option<String>,
}

impl DictionaryCollection {
    /// Build a collection, dropping duplicate names (first one wins)
    pub fn new(names: Vec<String>, selected: Option<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self {
            names: unique,
            selected,
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.as_deref() == Some(name)
    }
}

/// Remembered filter/sort choices for the dictionary list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewPreferences {
    pub filter_text: String,
    pub sort_mode: SortMode,
}

/// Control available on a list row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    Open,
    Select,
    Delete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictRow {
    pub name: String,
    pub selected: bool,
    pub actions: Vec<RowAction>,
    /// Right-hand badge/buttons; hidden by the optimistic select patch
    pub show_controls: bool,
}

impl DictRow {
    pub fn has_action(&self, action: RowAction) -> bool {
        self.actions.contains(&action)
    }
}

/// View description of the dictionary list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DictListView {
    pub rows: Vec<DictRow>,
    /// Shown instead of rows when nothing matches
    pub empty_message: Option<&'static str>,
}

impl DictListView {
    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.name == name)
    }

    /// Mark `name` selected and strip the controls from every row,
    /// without waiting for the authoritative re-render
    pub fn apply_selection_patch(&mut self, name: &str) {
        for row in &mut self.rows {
            row.selected = row.name == name;
            row.actions.retain(|a| *a == RowAction::Open);
            row.show_controls = false;
        }
    }
}

/// Which part of the dictionary screen receives keystrokes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DictFocus {
    #[default]
    List,
    Filter,
    Entries,
}

/// Everything the dictionary screen shows
#[derive(Clone, Debug, Default)]
pub struct DictPanel {
    /// Last snapshot received from the server
    pub snapshot: Option<DictionaryCollection>,

    pub prefs: ViewPreferences,

    /// Output of the list renderer (plus optimistic patches)
    pub view: DictListView,

    /// Highlighted row
    pub cursor: Option<usize>,

    pub focus: DictFocus,

    /// Running reorder animation, if any
    pub transition: Option<Transition>,

    /// Open entry viewer (at most one)
    pub entries: Option<EntryView>,

    /// Token of the newest list action; older completions are discarded
    pub generation: u64,

    /// Token of the newest entry fetch
    pub entries_generation: u64,

    /// A snapshot fetch is in flight
    pub loading: bool,

    /// Last snapshot fetch failed
    pub load_error: Option<String>,
}

impl DictPanel {
    pub fn new(prefs: ViewPreferences) -> Self {
        Self {
            prefs,
            ..Default::default()
        }
    }

    /// Start a new list action and return its token
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn next_entries_generation(&mut self) -> u64 {
        self.entries_generation += 1;
        self.entries_generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn cursor_row(&self) -> Option<&DictRow> {
        self.cursor.and_then(|idx| self.view.rows.get(idx))
    }

    /// Move the cursor by `delta` rows, clamped to the list
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.view.rows.len();
        if len == 0 {
            self.cursor = None;
            return;
        }
        let current = self.cursor.unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.cursor = Some(next as usize);
    }

    /// Replace the rendered view, keeping the cursor on the same name when possible
    pub fn replace_view(&mut self, view: DictListView) {
        let cursor_name = self.cursor_row().map(|r| r.name.clone());
        self.view = view;
        self.transition = None;

        self.cursor = if self.view.rows.is_empty() {
            None
        } else {
            cursor_name
                .and_then(|name| self.view.position(&name))
                .or(Some(self.cursor.unwrap_or(0).min(self.view.rows.len() - 1)))
        };
    }
}
