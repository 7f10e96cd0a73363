use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use talkoo_tui::logic::formatting::format_fuzzy;
use talkoo_tui::model::entries::EntryView;

pub const NO_ENTRIES: &str = "No entries.";

/// Render the entry viewer: query line on top, word/kor/fuzzy table below
pub fn render_entries(f: &mut Frame, area: Rect, view: &EntryView, is_focused: bool) {
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };
    let block = Block::default()
        .title(format!(" {} - Esc to close ", view.title()))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let visible = view.visible();

    let mut query_spans = vec![
        Span::styled("Filter: ", Style::default().fg(Color::Yellow)),
        Span::raw(view.query.clone()),
    ];
    if is_focused {
        query_spans.push(Span::styled(
            "█",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    query_spans.push(Span::styled(
        format!("  ({}/{})", visible.len(), view.entries.len()),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(Line::from(query_spans)), chunks[0]);

    if visible.is_empty() {
        f.render_widget(
            Paragraph::new(NO_ENTRIES).style(Style::default().fg(Color::Gray)),
            chunks[1],
        );
        return;
    }

    let rows: Vec<Row> = visible
        .iter()
        .skip(view.scroll)
        .map(|entry| {
            Row::new(vec![
                Cell::from(entry.word.clone()),
                Cell::from(entry.kor.clone()),
                Cell::from(format_fuzzy(entry.fuzzy)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45),
            Constraint::Percentage(45),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["word", "kor", "fuzzy"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    );

    f.render_widget(table, chunks[1]);
}
