use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use talkoo_tui::model::dictionary::DictFocus;
use talkoo_tui::Screen;

/// What the legend needs to know about the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendContext {
    pub screen: Screen,
    pub vim_mode: bool,
    pub dict_focus: DictFocus,
    pub entries_open: bool,
    pub editing: bool,
}

fn key(k: &'static str, action: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(k, Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ]
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(ctx: LegendContext) -> Vec<Span<'static>> {
    let mut hotkey_spans = vec![];

    match ctx.screen {
        Screen::Translate if ctx.editing => {
            hotkey_spans.extend(key("Enter", ":Translate  "));
            hotkey_spans.extend(key("Alt-Enter", ":Newline  "));
            hotkey_spans.extend(key("Esc", ":Done  "));
        }
        Screen::Translate => {
            hotkey_spans.extend(key("i", ":Edit  "));
            hotkey_spans.extend(key("t", ":Translate  "));
            hotkey_spans.extend(key("m/←/→", ":Mode  "));
            hotkey_spans.extend(key("r", ":Reason  "));
            hotkey_spans.extend(key("x", ":Clear  "));
        }
        Screen::Dictionaries => match ctx.dict_focus {
            DictFocus::Filter => {
                hotkey_spans.extend(key("Enter/Esc", ":Done  "));
                hotkey_spans.extend(key("^U", ":Clear  "));
            }
            DictFocus::Entries => {
                hotkey_spans.extend(key("type", ":Filter  "));
                hotkey_spans.extend(key("↑/↓", ":Scroll  "));
                hotkey_spans.extend(key("Tab", ":List  "));
                hotkey_spans.extend(key("Esc", ":Close  "));
            }
            DictFocus::List => {
                if ctx.vim_mode {
                    hotkey_spans.extend(key("jk", ":Nav  "));
                    hotkey_spans.extend(key("gg/G", ":First/Last  "));
                } else {
                    hotkey_spans.extend(key("↑/↓", ":Nav  "));
                }
                hotkey_spans.extend(key("Enter", ":Entries  "));
                hotkey_spans.extend(key("s", ":Select  "));
                hotkey_spans.extend(key("d", ":Delete  "));
                hotkey_spans.extend(key("/", ":Filter  "));
                hotkey_spans.extend(key("o", ":Sort  "));
                hotkey_spans.extend(key("u", ":Upload  "));
                hotkey_spans.extend(key("R", ":Reload  "));
                if ctx.entries_open {
                    hotkey_spans.extend(key("Tab", ":Entries pane  "));
                }
            }
        },
        Screen::Settings if ctx.editing => {
            hotkey_spans.extend(key("Enter", ":Apply  "));
            hotkey_spans.extend(key("Esc", ":Cancel  "));
        }
        Screen::Settings => {
            hotkey_spans.extend(key("Tab", ":Tab  "));
            if ctx.vim_mode {
                hotkey_spans.extend(key("jk", ":Nav  "));
                hotkey_spans.extend(key("hl", ":Change  "));
            } else {
                hotkey_spans.extend(key("↑/↓", ":Nav  "));
                hotkey_spans.extend(key("←/→", ":Change  "));
            }
            hotkey_spans.extend(key("Enter", ":Edit  "));
            hotkey_spans.extend(key("s", ":Save  "));
            hotkey_spans.extend(key("R", ":Reload  "));
        }
    }

    hotkey_spans.extend(key("F1-F3", ":Screens  "));
    if !ctx.editing && ctx.dict_focus == DictFocus::List {
        hotkey_spans.extend(key("q", ":Quit"));
    } else {
        hotkey_spans.extend(key("^C", ":Quit"));
    }

    hotkey_spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(ctx: LegendContext) -> Paragraph<'static> {
    Paragraph::new(vec![Line::from(build_hotkey_spans(ctx))])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

/// Render the hotkey legend (changes with screen, focus and vim mode)
pub fn render_legend(f: &mut Frame, area: Rect, ctx: LegendContext) {
    f.render_widget(build_legend_paragraph(ctx), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, ctx: LegendContext) -> u16 {
    // line_count() does not account for borders when a block is attached
    let paragraph_for_counting = Paragraph::new(vec![Line::from(build_hotkey_spans(ctx))])
        .wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_to_text(spans: &[Span]) -> String {
        spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect::<Vec<_>>()
            .join("")
    }

    fn ctx(screen: Screen) -> LegendContext {
        LegendContext {
            screen,
            vim_mode: false,
            dict_focus: DictFocus::List,
            entries_open: false,
            editing: false,
        }
    }

    #[test]
    fn test_dictionary_legend_lists_actions() {
        let text = spans_to_text(&build_hotkey_spans(ctx(Screen::Dictionaries)));
        for action in ["Select", "Delete", "Filter", "Sort", "Upload", "q:Quit"] {
            assert!(text.contains(action), "missing {} in {}", action, text);
        }
        assert!(!text.contains("Entries pane"));
    }

    #[test]
    fn test_entries_pane_key_only_when_open() {
        let mut c = ctx(Screen::Dictionaries);
        c.entries_open = true;
        let text = spans_to_text(&build_hotkey_spans(c));
        assert!(text.contains("Tab:Entries pane"));
    }

    #[test]
    fn test_vim_navigation_keys() {
        let mut c = ctx(Screen::Dictionaries);
        c.vim_mode = true;
        let text = spans_to_text(&build_hotkey_spans(c));
        assert!(text.contains("gg/G"));
    }

    #[test]
    fn test_typing_hides_q_quit() {
        let mut c = ctx(Screen::Translate);
        c.editing = true;
        let text = spans_to_text(&build_hotkey_spans(c));
        assert!(!text.contains("q:Quit"));
        assert!(text.contains("^C:Quit"));
    }

    #[test]
    fn test_narrow_terminal_needs_more_lines() {
        let c = ctx(Screen::Dictionaries);
        assert!(calculate_legend_height(40, c) > calculate_legend_height(400, c));
        assert_eq!(calculate_legend_height(400, c), 3);
    }
}
