//! Filter Logic
//!
//! Case-insensitive substring matching for dictionary names and entries.

use crate::api::DictEntry;

/// Whether `name` matches the list filter.
///
/// A name matches iff its lowercase form contains the lowercase filter.
///
/// # Examples
/// ```
/// use talkoo_tui::logic::filter::name_matches;
///
/// assert!(name_matches("abc", "ABCdef"));
/// assert!(name_matches("", "anything"));
/// assert!(!name_matches("abc", "xyz"));
/// ```
pub fn name_matches(filter: &str, name: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&filter.to_lowercase())
}

/// Names matching `filter`, in input order
pub fn filter_names(names: &[String], filter: &str) -> Vec<String> {
    names
        .iter()
        .filter(|name| name_matches(filter, name))
        .cloned()
        .collect()
}

/// Whether an entry matches the entry-viewer query (on `word` or `kor`)
pub fn entry_matches(query: &str, entry: &DictEntry) -> bool {
    if query.is_empty() {
        return true;
    }
    let q = query.to_lowercase();
    entry.word.to_lowercase().contains(&q) || entry.kor.to_lowercase().contains(&q)
}

pub fn filter_entries<'a>(entries: &'a [DictEntry], query: &str) -> Vec<&'a DictEntry> {
    entries.iter().filter(|e| entry_matches(query, e)).collect()
}
