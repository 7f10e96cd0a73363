//! Dictionary list renderer
//!
//! Pure function of (server snapshot, view preferences) to the list the
//! panel shows. Rendering the same inputs twice yields the same view.

use crate::model::dictionary::{
    DictListView, DictRow, DictionaryCollection, RowAction, ViewPreferences,
};

use super::filter::filter_names;
use super::sorting::sort_names;

pub const EMPTY_LIST_MESSAGE: &str = "No dictionaries. Upload one to add it.";

/// Render the dictionary list.
///
/// Rows are filtered by the trimmed filter text, then sorted by the sort
/// mode. The selected row gets no select/delete controls.
pub fn render_dict_list(
    collection: &DictionaryCollection,
    prefs: &ViewPreferences,
) -> DictListView {
    let selected = collection.selected.as_deref();

    let mut names = filter_names(&collection.names, prefs.filter_text.trim());
    sort_names(&mut names, prefs.sort_mode, selected);

    if names.is_empty() {
        return DictListView {
            rows: Vec::new(),
            empty_message: Some(EMPTY_LIST_MESSAGE),
        };
    }

    let rows = names
        .into_iter()
        .map(|name| {
            let is_selected = selected == Some(name.as_str());
            let actions = if is_selected {
                vec![RowAction::Open]
            } else {
                vec![RowAction::Open, RowAction::Select, RowAction::Delete]
            };
            DictRow {
                name,
                selected: is_selected,
                actions,
                show_controls: true,
            }
        })
        .collect();

    DictListView {
        rows,
        empty_message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SortMode;

    fn collection(names: &[&str], selected: Option<&str>) -> DictionaryCollection {
        DictionaryCollection::new(
            names.iter().map(|s| s.to_string()).collect(),
            selected.map(|s| s.to_string()),
        )
    }

    fn prefs(filter: &str, sort_mode: SortMode) -> ViewPreferences {
        ViewPreferences {
            filter_text: filter.to_string(),
            sort_mode,
        }
    }

    #[test]
    fn test_filter_then_sort_example() {
        let view = render_dict_list(
            &collection(&["ABCdef", "xyz", "abcxyz"], None),
            &prefs("abc", SortMode::NameAsc),
        );
        assert_eq!(view.names(), vec!["ABCdef", "abcxyz"]);
    }

    #[test]
    fn test_selected_first_example() {
        let view = render_dict_list(
            &collection(&["b", "a", "c"], Some("c")),
            &prefs("", SortMode::SelectedFirst),
        );
        assert_eq!(view.names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_selected_row_has_no_select_or_delete() {
        let view = render_dict_list(
            &collection(&["a", "b"], Some("a")),
            &prefs("", SortMode::NameAsc),
        );
        assert!(view.rows[0].selected);
        assert_eq!(view.rows[0].actions, vec![RowAction::Open]);
        assert!(view.rows[1].has_action(RowAction::Select));
        assert!(view.rows[1].has_action(RowAction::Delete));
    }

    #[test]
    fn test_render_is_idempotent() {
        let c = collection(&["b.tkdic", "A.tkdic", "c.tkdic"], Some("c.tkdic"));
        for mode in [SortMode::NameAsc, SortMode::NameDesc, SortMode::SelectedFirst] {
            for filter in ["", "tk", "B", "zzz"] {
                let p = prefs(filter, mode);
                assert_eq!(render_dict_list(&c, &p), render_dict_list(&c, &p));
            }
        }
    }

    #[test]
    fn test_empty_results_show_message() {
        let view = render_dict_list(&collection(&["a"], None), &prefs("zzz", SortMode::NameAsc));
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_message, Some(EMPTY_LIST_MESSAGE));

        let view = render_dict_list(&collection(&[], None), &prefs("", SortMode::NameAsc));
        assert_eq!(view.empty_message, Some(EMPTY_LIST_MESSAGE));
    }

    #[test]
    fn test_filter_text_is_trimmed() {
        let view = render_dict_list(
            &collection(&["abc", "xyz"], None),
            &prefs("  ab ", SortMode::NameAsc),
        );
        assert_eq!(view.names(), vec!["abc"]);
    }
}
