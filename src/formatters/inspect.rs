//! Inspect-style rendering of metadata values
//!
//! Produces the indented, type-colored object notation developers know from
//! interactive consoles: unquoted identifier keys, single-quoted strings and
//! short containers collapsed onto one line.

use super::ansi::{bold, paint};
use colored::Color;
use serde_json::{Map, Value};

const BREAK_LENGTH: usize = 80;
const INDENT: &str = "  ";

/// Render `value`, coloring scalars by type when `colors` is set.
pub fn inspect(value: &Value, colors: bool) -> String {
    render(value, colors, 0)
}

fn render(value: &Value, colors: bool, depth: usize) -> String {
    match value {
        Value::Null => style(colors, "null", bold),
        Value::Bool(b) => style(colors, &b.to_string(), |s| paint(s, Color::Yellow)),
        Value::Number(n) => style(colors, &n.to_string(), |s| paint(s, Color::Yellow)),
        Value::String(s) => style(colors, &quote(s), |s| paint(s, Color::Green)),
        Value::Array(items) => {
            let entries: Vec<String> = items
                .iter()
                .map(|item| render(item, colors, depth + 1))
                .collect();
            group(entries, ('[', ']'), depth)
        }
        Value::Object(map) => render_object(map, colors, depth),
    }
}

fn render_object(map: &Map<String, Value>, colors: bool, depth: usize) -> String {
    let entries: Vec<String> = map
        .iter()
        .map(|(key, value)| format!("{}: {}", format_key(key), render(value, colors, depth + 1)))
        .collect();
    group(entries, ('{', '}'), depth)
}

fn group(entries: Vec<String>, (open, close): (char, char), depth: usize) -> String {
    if entries.is_empty() {
        return format!("{}{}", open, close);
    }

    let single_line = entries.iter().all(|e| !e.contains('\n')) && {
        let total: usize = entries.iter().map(|e| visible_len(e)).sum::<usize>() + entries.len();
        total + depth * INDENT.len() + 10 <= BREAK_LENGTH
    };

    if single_line {
        return format!("{} {} {}", open, entries.join(", "), close);
    }

    let inner_indent = INDENT.repeat(depth + 1);
    let outer_indent = INDENT.repeat(depth);
    let body = entries
        .iter()
        .map(|e| format!("{}{}", inner_indent, e))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{}\n{}\n{}{}", open, body, outer_indent, close)
}

fn style(colors: bool, text: &str, painter: impl Fn(&str) -> String) -> String {
    if colors {
        painter(text)
    } else {
        text.to_string()
    }
}

fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };
    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

/// Length of `s` as displayed, ignoring ANSI SGR sequences.
fn visible_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            len += 1;
        }
    }
    len
}
