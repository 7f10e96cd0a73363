use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Icon display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    Emoji,    // Standard emoji icons (📘, ✅, etc.)
    NerdFont, // Nerd Fonts icons (U+F02D, etc.)
}

impl IconMode {
    /// Parse the `icon_mode` config value. Unknown values fall back to emoji.
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "nerdfont" | "nerd" | "nerd-font" => IconMode::NerdFont,
            _ => IconMode::Emoji,
        }
    }
}

/// Icon theme using terminal colors (respects user's terminal theme)
#[derive(Debug, Clone)]
pub struct IconTheme {
    pub dictionary_color: Color,
    pub selected_color: Color,
    pub unselected_color: Color,
    pub valid_color: Color,
    pub invalid_color: Color,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            dictionary_color: Color::Blue,
            selected_color: Color::Green,
            unselected_color: Color::Gray,
            valid_color: Color::Green,
            invalid_color: Color::Red,
        }
    }
}

/// Icon renderer that handles both emoji and Nerd Font modes
#[derive(Debug, Clone)]
pub struct IconRenderer {
    mode: IconMode,
    theme: IconTheme,
}

impl IconRenderer {
    pub fn new(mode: IconMode, theme: IconTheme) -> Self {
        Self { mode, theme }
    }

    /// Book icon followed by the selected/unselected marker
    pub fn dictionary(&self, selected: bool) -> Vec<Span<'static>> {
        let book = match self.mode {
            IconMode::Emoji => "📘",
            IconMode::NerdFont => "\u{F02D} ",
        };
        vec![
            Span::styled(book, Style::default().fg(self.theme.dictionary_color)),
            self.selection_marker(selected),
        ]
    }

    fn selection_marker(&self, selected: bool) -> Span<'static> {
        let (emoji_icon, nerd_icon, color) = if selected {
            ("✅ ", "\u{F00C} ", self.theme.selected_color)
        } else {
            ("⬜ ", "\u{F096} ", self.theme.unselected_color)
        };
        let icon = match self.mode {
            IconMode::Emoji => emoji_icon,
            IconMode::NerdFont => nerd_icon,
        };
        Span::styled(icon, Style::default().fg(color))
    }

    /// Marker in front of a translation result
    pub fn result_marker(&self, valid: bool) -> Span<'static> {
        let (emoji_icon, nerd_icon, color) = if valid {
            ("✔ ", "\u{F00C} ", self.theme.valid_color)
        } else {
            ("✗ ", "\u{F00D} ", self.theme.invalid_color)
        };
        let icon = match self.mode {
            IconMode::Emoji => emoji_icon,
            IconMode::NerdFont => nerd_icon,
        };
        Span::styled(icon, Style::default().fg(color))
    }
}
