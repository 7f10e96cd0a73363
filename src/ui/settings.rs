use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use talkoo_tui::logic::settings::{display_value, FieldKind, SettingsTab};
use talkoo_tui::model::SettingsModel;

fn tab_title(current: SettingsTab, saving: bool, loading: bool) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for tab in SettingsTab::all() {
        let style = if tab == current {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(tab.title().to_string(), style));
        spans.push(Span::raw(" "));
    }
    if saving {
        spans.push(Span::styled("(saving...) ", Style::default().fg(Color::Yellow)));
    } else if loading {
        spans.push(Span::styled("(loading...) ", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

/// Render the settings form for the current tab
pub fn render_settings(f: &mut Frame, area: Rect, settings: &SettingsModel) {
    let rows: Vec<Row> = settings
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, def)| {
            let is_cursor = idx == settings.cursor;
            let value = match (&settings.editing, is_cursor) {
                (Some(text), true) => format!("{}█", text),
                _ => {
                    let shown = display_value(def, &settings.value_of(def.id));
                    match def.kind {
                        FieldKind::Select(_) => format!("◀ {} ▶", shown),
                        FieldKind::Input { .. } => shown,
                    }
                }
            };

            let value_style = if !def.is_editable() {
                Style::default().fg(Color::DarkGray)
            } else if is_cursor && settings.editing.is_some() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };

            let row = Row::new(vec![
                Cell::from(def.label),
                Cell::from(Span::styled(value, value_style)),
                Cell::from(Span::styled(def.desc, Style::default().fg(Color::DarkGray))),
            ]);
            if is_cursor {
                row.style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Length(28),
            Constraint::Min(10),
        ],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(tab_title(settings.tab, settings.saving, settings.loading)),
    );

    f.render_widget(table, area);
}
