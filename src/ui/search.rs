//! Filter Input UI
//!
//! Renders the dictionary filter box with the sort mode and a blinking cursor.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the filter input above the dictionary list
///
/// # Arguments
/// - `query`: Current filter text
/// - `active`: Whether input is actively receiving keystrokes
/// - `sort_label`: Current sort mode
pub fn render_filter_input(f: &mut Frame, area: Rect, query: &str, active: bool, sort_label: &str) {
    let title = if active {
        " Filter - Enter/Esc to finish ".to_string()
    } else {
        format!(" Filter (/)  Sort: {} (o) ", sort_label)
    };

    let border_color = if active { Color::Cyan } else { Color::Gray };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(Style::default().fg(border_color));

    let cursor_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::SLOW_BLINK);

    let input_line = if active {
        Line::from(vec![
            Span::raw(query.to_string()),
            Span::styled("█", cursor_style),
        ])
    } else if query.is_empty() {
        Line::from(Span::styled("(none)", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(Span::styled(query.to_string(), Style::default().fg(Color::Gray)))
    };

    f.render_widget(Paragraph::new(input_line).block(block), area);
}
