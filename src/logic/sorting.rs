//! Sorting comparison logic
//!
//! Pure functions for ordering dictionary names across sort modes.

use crate::SortMode;
use std::cmp::Ordering;

/// Case-insensitive name comparison.
///
/// Names are compared by their lowercase form; on a tie lowercase sorts
/// before uppercase, so the order is total and deterministic. This is not
/// locale collation: punctuation, digits and accented letters order by
/// code point of the lowercased text (`"_a" < "a"`, `"z" < "é"`).
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        // Ties differ only in case: reversed byte order puts lowercase first
        .then_with(|| b.cmp(a))
}

/// Compare two names according to the given sort mode
///
/// # Sort Rules
/// - NameAsc / NameDesc: `compare_names`, optionally reversed
/// - SelectedFirst: the selected name first, the rest ascending
pub fn compare_for_mode(a: &str, b: &str, sort_mode: SortMode, selected: Option<&str>) -> Ordering {
    match sort_mode {
        SortMode::NameAsc => compare_names(a, b),
        SortMode::NameDesc => compare_names(b, a),
        SortMode::SelectedFirst => {
            let a_sel = Some(a) == selected;
            let b_sel = Some(b) == selected;
            b_sel.cmp(&a_sel).then_with(|| compare_names(a, b))
        }
    }
}

pub fn sort_names(names: &mut [String], sort_mode: SortMode, selected: Option<&str>) {
    names.sort_by(|a, b| compare_for_mode(a, b, sort_mode, selected));
}

/// Order used by the select animation: `selected` first, others ascending
pub fn selected_first_order(names: &[&str], selected: &str) -> Vec<String> {
    let mut others: Vec<String> = names
        .iter()
        .filter(|n| **n != selected)
        .map(|n| n.to_string())
        .collect();
    others.sort_by(|a, b| compare_names(a, b));

    let mut order = Vec::with_capacity(others.len() + 1);
    order.push(selected.to_string());
    order.extend(others);
    order
}
