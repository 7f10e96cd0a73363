use ratatui::layout::{Constraint, Direction, Layout, Rect};

use talkoo_tui::logic::layout::entries_pane_height;

/// Layout information for rendering
pub struct LayoutInfo {
    /// Top tab bar area
    pub tab_area: Rect,
    /// Active screen area
    pub content_area: Rect,
    /// Hotkey legend area (full width)
    pub legend_area: Rect,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Calculate the screen layout for all UI components
pub fn calculate_layout(terminal_size: Rect, legend_height: u16) -> LayoutInfo {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Tab bar (top border, text, bottom border)
            Constraint::Min(3),                // Active screen
            Constraint::Length(legend_height), // Legend (exact fit for wrapped content)
            Constraint::Length(1),             // Status bar
        ])
        .split(terminal_size);

    LayoutInfo {
        tab_area: main_chunks[0],
        content_area: main_chunks[1],
        legend_area: main_chunks[2],
        status_area: main_chunks[3],
    }
}

/// Areas of the dictionary screen
pub struct DictionaryLayout {
    pub filter_area: Rect,
    pub list_area: Rect,
    /// Entry viewer below the list, when one is open
    pub entries_area: Option<Rect>,
}

pub fn dictionary_layout(area: Rect, has_entries: bool) -> DictionaryLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);
    let filter_area = chunks[0];
    let body = chunks[1];

    if !has_entries {
        return DictionaryLayout {
            filter_area,
            list_area: body,
            entries_area: None,
        };
    }

    let entries_height = entries_pane_height(body.height);
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(entries_height)])
        .split(body);

    DictionaryLayout {
        filter_area,
        list_area: split[0],
        entries_area: Some(split[1]),
    }
}

/// Center a `width` x `height` box inside `area`, clamped to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_terminal() {
        let info = calculate_layout(Rect::new(0, 0, 80, 24), 3);
        assert_eq!(info.tab_area.height, 3);
        assert_eq!(info.legend_area.height, 3);
        assert_eq!(info.status_area.height, 1);
        assert_eq!(info.content_area.height, 24 - 3 - 3 - 1);
    }

    #[test]
    fn test_entries_pane_only_when_open() {
        let area = Rect::new(0, 0, 80, 30);
        assert!(dictionary_layout(area, false).entries_area.is_none());

        let split = dictionary_layout(area, true);
        let entries = split.entries_area.unwrap();
        assert!(entries.height >= 6);
        assert_eq!(split.list_area.height + entries.height, 27);
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect(area, 50, 4);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, 3);
    }
}
