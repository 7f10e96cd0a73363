use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use talkoo_tui::model::Model;
use talkoo_tui::Screen;

/// One-line summary of the active screen
pub fn status_text(model: &Model) -> String {
    match model.ui.screen {
        Screen::Translate => {
            let t = &model.translation;
            format!(
                "Mode: {} │ {} chars{}",
                t.mode.label(),
                t.source.chars().count(),
                if t.in_flight { " │ translating..." } else { "" }
            )
        }
        Screen::Dictionaries => {
            let dict = &model.dict;
            let selected = dict
                .snapshot
                .as_ref()
                .and_then(|s| s.selected.as_deref())
                .unwrap_or("none");
            let filter = dict.prefs.filter_text.trim();
            let mut text = format!(
                "Selected: {} │ Sort: {} │ {} shown",
                selected,
                dict.prefs.sort_mode.as_str(),
                dict.view.rows.len()
            );
            if !filter.is_empty() {
                text.push_str(&format!(" │ Filter: {}", filter));
            }
            if model.ui.uploading {
                text.push_str(" │ uploading...");
            }
            text
        }
        Screen::Settings => {
            let s = &model.settings;
            match s.current_field() {
                Some(def) => format!("{} │ {}", s.tab.title(), def.id),
                None => s.tab.title().to_string(),
            }
        }
    }
}

/// Render the bottom status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, model: &Model) {
    let widget = Paragraph::new(status_text(model)).style(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}
