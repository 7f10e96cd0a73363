use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use talkoo_tui::model::types::{Alert, ConfirmAction};

use super::layout::centered_rect;

/// Height needed for `text` wrapped into `width` columns, plus borders
fn dialog_height(lines: &[&str], width: u16) -> u16 {
    let inner = width.saturating_sub(2).max(1) as usize;
    let wrapped: usize = lines
        .iter()
        .map(|l| (l.width().max(1) + inner - 1) / inner)
        .sum();
    wrapped as u16 + 2
}

/// Render a blocking alert, dismissed with Enter/Esc
pub fn render_alert(f: &mut Frame, alert: &Alert) {
    let area = f.area();
    let width = 60.min(area.width);

    let mut lines: Vec<&str> = alert.message.lines().collect();
    lines.push("");
    lines.push("[Enter] OK");
    let height = dialog_height(&lines, width);

    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.to_string())).collect();
    let prompt = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", alert.title))
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    let prompt_area = centered_rect(area, width, height);
    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

/// Render the y/n confirmation for deleting or overwriting a dictionary
pub fn render_confirm(f: &mut Frame, action: &ConfirmAction) {
    let (title, color) = match action {
        ConfirmAction::DeleteDictionary { .. } => ("Confirm Delete", Color::Red),
        ConfirmAction::OverwriteUpload { .. } => ("Confirm Overwrite", Color::Yellow),
    };
    let question = action.question();
    let lines = [question.as_str(), "", "Continue? (y/n)"];

    let area = f.area();
    let width = 50.min(area.width);
    let height = dialog_height(&lines, width);

    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.to_string())).collect();
    let prompt = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    let prompt_area = centered_rect(area, width, height);
    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

/// Render the upload prompt (paths or glob patterns)
pub fn render_upload_prompt(f: &mut Frame, input: &str) {
    let area = f.area();
    let prompt_area = centered_rect(area, 70, 6);

    let text = vec![
        Line::from(vec![
            Span::raw(input.to_string()),
            Span::styled(
                "█",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Paths or globs (e.g. ~/dicts/*.tkdic)  Enter: upload  Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let prompt = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Upload dictionaries ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}
