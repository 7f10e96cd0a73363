//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shown for missing fuzzy scores
pub const MISSING: &str = "-";

/// Format an optional fuzzy score
///
/// # Examples
/// ```
/// use talkoo_tui::logic::formatting::format_fuzzy;
///
/// assert_eq!(format_fuzzy(Some(90)), "90");
/// assert_eq!(format_fuzzy(None), "-");
/// ```
pub fn format_fuzzy(value: Option<i64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Truncate `text` to at most `max_width` terminal cells, adding "…" when cut.
///
/// Wide characters (Hangul, CJK) count as two cells.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1; // room for the ellipsis
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// "1 dictionary" / "3 dictionaries"
pub fn format_count(n: usize) -> String {
    if n == 1 {
        "1 dictionary".to_string()
    } else {
        format!("{} dictionaries", n)
    }
}
