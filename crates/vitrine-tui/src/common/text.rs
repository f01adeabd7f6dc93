//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds `max_width` (unicode-aware).
///
/// Uses unicode width for accurate terminal column calculation, handling
/// wide characters (CJK, emoji) correctly.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    for ch in text.chars() {
        let next_width = truncated.width() + ch.width().unwrap_or(0);
        if next_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_pass_through() {
        assert_eq!(truncate_with_ellipsis("Cadeira", 10), "Cadeira");
        assert_eq!(truncate_with_ellipsis("Cadeira", 7), "Cadeira");
    }

    #[test]
    fn long_names_get_an_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Cadeira de escritório", 10), "Cadeira d…");
    }

    #[test]
    fn degenerate_width() {
        assert_eq!(truncate_with_ellipsis("Cadeira", 1), "…");
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(truncate_with_ellipsis("中文test", 6), "中文t…");
    }
}
