//! Entry viewer state for one open dictionary

use crate::api::{DictEntry, EntriesResponse};
use crate::logic::filter::filter_entries;

#[derive(Clone, Debug, PartialEq)]
pub struct EntryView {
    pub filename: String,
    pub main_fuzzy: Option<i64>,
    /// Fetched once; filtering never refetches
    pub entries: Vec<DictEntry>,
    pub query: String,
    pub scroll: usize,
}

impl EntryView {
    pub fn new(response: EntriesResponse) -> Self {
        Self {
            filename: response.filename,
            main_fuzzy: response.main_fuzzy,
            entries: response.entries,
            query: String::new(),
            scroll: 0,
        }
    }

    /// Entries matching the current query
    pub fn visible(&self) -> Vec<&DictEntry> {
        filter_entries(&self.entries, &self.query)
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.scroll = 0;
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.visible().len().saturating_sub(1) as isize;
        self.scroll = (self.scroll as isize + delta).clamp(0, max.max(0)) as usize;
    }

    pub fn title(&self) -> String {
        format!(
            "{} (main_fuzzy: {})",
            self.filename,
            self.main_fuzzy
                .map(|f| f.to_string())
                .unwrap_or_else(|| "-".to_string())
        )
    }
}
