use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use talkoo_tui::model::translation::{TranslateMode, TranslationModel};

use super::icons::IconRenderer;
use super::layout::centered_rect;

/// Mode selector line, current mode highlighted
fn mode_spans(current: TranslateMode, locked: bool) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled("Mode: ", Style::default().fg(Color::Yellow))];
    for mode in TranslateMode::all() {
        let style = if mode == current {
            Style::default()
                .fg(Color::Black)
                .bg(if locked { Color::DarkGray } else { Color::Cyan })
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Render the translation form: source box, mode selector, result box
pub fn render_translate(f: &mut Frame, area: Rect, model: &TranslationModel, icons: &IconRenderer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(area);

    // Source text
    let source_title = if model.in_flight {
        " Source (translating...) "
    } else if model.editing {
        " Source - Enter to translate, Alt-Enter newline, Esc to finish "
    } else {
        " Source (i to edit) "
    };
    let source_style = if model.in_flight {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let mut source_lines: Vec<Line> = model
        .source
        .split('\n')
        .map(|l| Line::from(l.to_string()))
        .collect();
    if model.editing && !model.in_flight {
        if let Some(last) = source_lines.last_mut() {
            last.spans.push(Span::styled(
                "█",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
            ));
        }
    }
    let source = Paragraph::new(source_lines)
        .style(source_style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(source_title)
                .border_style(if model.editing {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                }),
        );
    f.render_widget(source, chunks[0]);

    f.render_widget(
        Paragraph::new(Line::from(mode_spans(model.mode, model.in_flight))),
        chunks[1],
    );

    // Result
    let (text, is_valid) = model.display();
    let result_style = if is_valid {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    };
    let mut result_lines = vec![Line::from(vec![
        icons.result_marker(is_valid),
        Span::styled(text.to_string(), result_style),
    ])];
    if model.can_show_reason() && !model.in_flight {
        result_lines.push(Line::from(""));
        result_lines.push(Line::from(Span::styled(
            "r: show Gemini's reasoning",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let result = Paragraph::new(result_lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Result ({}) ", model.mode.label())),
    );
    f.render_widget(result, chunks[2]);

    if model.show_reason {
        render_reason_popup(f, area, &model.gemini_reason);
    }
}

fn render_reason_popup(f: &mut Frame, area: Rect, reason: &str) {
    let popup_area = centered_rect(area, area.width.saturating_sub(8).max(40), area.height.saturating_sub(4));
    let popup = Paragraph::new(reason.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Gemini reasoning - r/Esc to close ")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black));

    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}
