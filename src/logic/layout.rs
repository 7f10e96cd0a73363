//! Layout calculation logic
//!
//! Pure functions for calculating UI layout dimensions and constraints.

/// First visible row of a scrolling list so that `cursor` stays on screen.
///
/// Keeps the previous offset when the cursor is already visible, so the
/// list only scrolls when the cursor would leave the viewport.
///
/// # Examples
/// ```
/// use talkoo_tui::logic::layout::scroll_offset;
///
/// // Cursor inside the viewport: offset unchanged
/// assert_eq!(scroll_offset(3, 20, 10, 0), 0);
/// // Cursor below the viewport: scroll so it is the last visible row
/// assert_eq!(scroll_offset(12, 20, 10, 0), 3);
/// // Cursor above the viewport: scroll up to it
/// assert_eq!(scroll_offset(2, 20, 10, 5), 2);
/// ```
pub fn scroll_offset(cursor: usize, len: usize, height: usize, current: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    let max_offset = len - height;
    let offset = if cursor < current {
        cursor
    } else if cursor >= current + height {
        cursor + 1 - height
    } else {
        current
    };
    offset.min(max_offset)
}

/// Height of the entry viewer pane for a screen of `total` rows
///
/// The viewer takes roughly half of the dictionary screen, never less than
/// 6 rows, and never so much that the list gets fewer than 4.
pub fn entries_pane_height(total: u16) -> u16 {
    const MIN_VIEWER: u16 = 6;
    const MIN_LIST: u16 = 4;

    let half = total / 2;
    half.max(MIN_VIEWER).min(total.saturating_sub(MIN_LIST))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_short_list() {
        assert_eq!(scroll_offset(4, 5, 10, 3), 0);
    }

    #[test]
    fn test_scroll_offset_clamped_to_end() {
        assert_eq!(scroll_offset(19, 20, 10, 15), 10);
    }

    #[test]
    fn test_scroll_offset_zero_height() {
        assert_eq!(scroll_offset(5, 20, 0, 0), 0);
    }

    #[test]
    fn test_entries_pane_height() {
        assert_eq!(entries_pane_height(40), 20);
        assert_eq!(entries_pane_height(10), 6);
        assert_eq!(entries_pane_height(8), 4);
    }
}
