use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use talkoo_tui::Screen;

const SCREENS: [(Screen, &str); 3] = [
    (Screen::Translate, "F1"),
    (Screen::Dictionaries, "F2"),
    (Screen::Settings, "F3"),
];

/// Build the tab spans (extracted for testability)
fn build_tab_spans(active: Screen, busy: Option<&str>) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (screen, key) in SCREENS {
        let style = if screen == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", key, screen.title()), style));
        spans.push(Span::raw(" "));
    }

    if let Some(label) = busy {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(label.to_string(), Style::default().fg(Color::Yellow)));
    }
    spans
}

/// Render the screen tabs at the top, titled with the server address
pub fn render_tab_bar(f: &mut Frame, area: Rect, active: Screen, base_url: &str, busy: Option<&str>) {
    let widget = Paragraph::new(Line::from(build_tab_spans(active, busy)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Talkoo ({})", base_url)),
        )
        .style(Style::default().fg(Color::Gray));

    f.render_widget(widget, area);
}
