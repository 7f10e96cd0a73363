//! Dictionary list panel
//!
//! Rows are drawn one per line. While a reorder slide runs, every row is
//! drawn at its original line plus its eased offset, and moving rows are
//! drawn last so they pass over the rows they cross.

use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use talkoo_tui::logic::flip::Transition;
use talkoo_tui::logic::formatting::{format_count, truncate_to_width};
use talkoo_tui::logic::layout::scroll_offset;
use talkoo_tui::model::dictionary::{DictPanel, DictRow, RowAction};

use super::icons::IconRenderer;

/// Line (relative to the first row) each row is drawn at, in draw order.
///
/// Without a transition this is simply the row index. Moving rows come
/// last in the returned order.
pub fn row_positions(
    rows: &[DictRow],
    transition: Option<&Transition>,
    now: Instant,
) -> Vec<(usize, i32)> {
    let Some(transition) = transition else {
        return rows.iter().enumerate().map(|(i, _)| (i, i as i32)).collect();
    };

    let (mut still, mut moving): (Vec<_>, Vec<_>) = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let offset = transition.offset_at(&row.name, now).round() as i32;
            (i, i as i32 + offset, transition.delta(&row.name) != 0)
        })
        .partition(|(_, _, moves)| !moves);

    still.append(&mut moving);
    still.into_iter().map(|(i, y, _)| (i, y)).collect()
}

/// Control hints shown after the name
fn controls_text(row: &DictRow) -> &'static str {
    if !row.show_controls {
        return "";
    }
    match (
        row.has_action(RowAction::Select),
        row.has_action(RowAction::Delete),
    ) {
        (true, true) => "  [s]elect [d]elete",
        (true, false) => "  [s]elect",
        (false, true) => "  [d]elete",
        (false, false) => "",
    }
}

fn row_line(row: &DictRow, icons: &IconRenderer, width: usize) -> Line<'static> {
    let mut spans = icons.dictionary(row.selected);
    let name_style = if row.selected {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    // Icons take roughly four cells
    let controls = controls_text(row);
    let name_budget = width.saturating_sub(4 + controls.len());
    spans.push(Span::styled(truncate_to_width(&row.name, name_budget), name_style));
    spans.push(Span::styled(controls, Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

/// Render the dictionary list. `scroll` keeps the viewport between frames.
pub fn render_dict_list(
    f: &mut Frame,
    area: Rect,
    panel: &DictPanel,
    is_focused: bool,
    icons: &IconRenderer,
    scroll: &mut usize,
    now: Instant,
) {
    let title = if panel.loading {
        format!("Dictionaries ({}, loading...)", format_count(panel.view.rows.len()))
    } else {
        format!("Dictionaries ({})", format_count(panel.view.rows.len()))
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        });
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(error) = &panel.load_error {
        let message = Paragraph::new(format!("Failed to load dictionaries: {}", error))
            .style(Style::default().fg(Color::Red))
            .wrap(ratatui::widgets::Wrap { trim: false });
        f.render_widget(message, inner);
        return;
    }

    if panel.view.rows.is_empty() {
        let text = if panel.loading {
            "Loading..."
        } else {
            panel.view.empty_message.unwrap_or("")
        };
        f.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::Gray)),
            inner,
        );
        return;
    }

    let height = inner.height as usize;
    *scroll = scroll_offset(
        panel.cursor.unwrap_or(0),
        panel.view.rows.len(),
        height,
        *scroll,
    );

    let highlight = Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);

    for (idx, y) in row_positions(&panel.view.rows, panel.transition.as_ref(), now) {
        let line_y = y - *scroll as i32;
        if line_y < 0 || line_y >= height as i32 {
            continue;
        }
        let row_area = Rect {
            x: inner.x,
            y: inner.y + line_y as u16,
            width: inner.width,
            height: 1,
        };
        let row = &panel.view.rows[idx];
        let is_cursor = panel.cursor == Some(idx);
        let marker = if is_cursor && is_focused { "> " } else { "  " };

        let mut line = row_line(row, icons, (inner.width as usize).saturating_sub(2));
        line.spans.insert(0, Span::raw(marker));
        let mut paragraph = Paragraph::new(line);
        if is_cursor {
            paragraph = paragraph.style(highlight);
        }
        // Moving rows overwrite whatever was drawn on their line
        f.render_widget(Clear, row_area);
        f.render_widget(paragraph, row_area);
    }
}
