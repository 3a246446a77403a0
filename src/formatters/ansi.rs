//! ANSI styling that follows the formatter's `colors` option only
//!
//! Painting does not consult terminal detection or `CLICOLOR`; callers decide
//! whether to paint at all.

use colored::Color;

/// Wrap `text` in the foreground SGR code of `color`
pub fn paint(text: &str, color: Color) -> String {
    format!("\x1b[{}m{}\x1b[39m", color.to_fg_str(), text)
}

/// Paint when a color is given, otherwise return `text` unchanged
pub fn paint_opt(text: &str, color: Option<Color>) -> String {
    match color {
        Some(color) => paint(text, color),
        None => text.to_string(),
    }
}

pub fn bold(text: &str) -> String {
    format!("\x1b[1m{}\x1b[22m", text)
}
