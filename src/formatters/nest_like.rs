//! Nest-like console formatter
//!
//! Renders records in the familiar framework console layout:
//!
//! ```text
//! [App] 4242   1/1/2024, 12:00:00 AM    WARN abc123       [Disk] disk low - { freeMb: 12 } +3ms
//! ```

use super::inspect::inspect;
use crate::core::{timestamp, LogRecord, RecordFormatter};
use super::ansi::paint_opt;
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// App tag used when none is configured
pub const DEFAULT_APP_NAME: &str = "RustLogger";

/// Whether the environment asks for colorless output (`NO_COLOR` set and non-empty)
pub fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Resolved formatter toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterOptions {
    /// ANSI colors
    pub colors: bool,
    /// Inspect-style metadata instead of compact JSON
    pub pretty_print: bool,
    /// Include the process id
    pub process_id: bool,
    /// Include the leading `[app]` tag
    pub app_name: bool,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self::from_env()
    }
}

impl FormatterOptions {
    /// Defaults, with colors disabled when `NO_COLOR` is set
    pub fn from_env() -> Self {
        Self {
            colors: !no_color_requested(),
            pretty_print: true,
            process_id: true,
            app_name: true,
        }
    }

    /// Apply the toggles present in `overrides`
    #[must_use]
    pub fn merged(mut self, overrides: &FormatterOverrides) -> Self {
        if let Some(colors) = overrides.colors {
            self.colors = colors;
        }
        if let Some(pretty_print) = overrides.pretty_print {
            self.pretty_print = pretty_print;
        }
        if let Some(process_id) = overrides.process_id {
            self.process_id = process_id;
        }
        if let Some(app_name) = overrides.app_name {
            self.app_name = app_name;
        }
        self
    }
}

/// User-supplied toggles; unset entries keep their defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatterOverrides {
    pub colors: Option<bool>,
    pub pretty_print: Option<bool>,
    pub process_id: Option<bool>,
    pub app_name: Option<bool>,
}

impl FormatterOverrides {
    #[must_use]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = Some(enabled);
        self
    }

    #[must_use]
    pub fn pretty_print(mut self, enabled: bool) -> Self {
        self.pretty_print = Some(enabled);
        self
    }

    #[must_use]
    pub fn process_id(mut self, enabled: bool) -> Self {
        self.process_id = Some(enabled);
        self
    }

    #[must_use]
    pub fn app_name(mut self, enabled: bool) -> Self {
        self.app_name = Some(enabled);
        self
    }
}

/// Build a nest-like formatter for `app_name`, merging `overrides` over
/// [`FormatterOptions::from_env`].
///
/// # Example
///
/// ```
/// use rust_logger_bridge::core::{LogLevel, LogRecord, RecordFormatter};
/// use rust_logger_bridge::formatters::{configure_formatter, FormatterOverrides};
///
/// let formatter = configure_formatter("Shop", &FormatterOverrides::default().colors(false));
/// let line = formatter.format(&LogRecord::new(LogLevel::Info, "ready"));
/// assert!(line.starts_with("[Shop] "));
/// assert!(line.ends_with("    LOG  ready"));
/// ```
pub fn configure_formatter(app_name: &str, overrides: &FormatterOverrides) -> NestLikeFormatter {
    NestLikeFormatter::new(app_name, FormatterOptions::from_env().merged(overrides))
}

#[derive(Debug, Clone)]
pub struct NestLikeFormatter {
    app_name: String,
    options: FormatterOptions,
    pid: u32,
}

impl NestLikeFormatter {
    pub fn new(app_name: impl Into<String>, options: FormatterOptions) -> Self {
        Self {
            app_name: app_name.into(),
            options,
            pid: std::process::id(),
        }
    }

    pub fn options(&self) -> &FormatterOptions {
        &self.options
    }

    /// Turn the formatter into a plain closure
    pub fn into_fn(self) -> impl Fn(&LogRecord) -> String + Send + Sync {
        move |record| self.render(record)
    }

    fn render(&self, record: &LogRecord) -> String {
        let level_color = record.level.color_code().filter(|_| self.options.colors);
        let accent = self.options.colors.then_some(Color::Yellow);

        let mut line = String::new();

        if self.options.app_name {
            let _ = write!(line, "{} ", paint_opt(&format!("[{}]", self.app_name), level_color));
        }
        if self.options.process_id {
            let _ = write!(line, "{:<6} ", paint_opt(&self.pid.to_string(), level_color));
        }
        if let Some(stamp) = &record.meta.timestamp {
            let _ = write!(line, "{} ", timestamp::localize(stamp));
        }

        let label = format!("{:>7}", record.level.display_label().to_uppercase());
        let _ = write!(line, "{} ", paint_opt(&label, level_color));

        if !record.meta.request_id.is_empty() {
            let _ = write!(line, "{:<12} ", paint_opt(&record.meta.request_id, accent));
        }
        if let Some(context) = &record.meta.context {
            line.push_str(&paint_opt(&format!("[{}]", context), accent));
        }
        let _ = write!(line, " {}", paint_opt(&record.message, level_color));

        if let Some(meta) = self.render_meta(record) {
            let _ = write!(line, " - {}", meta);
        }
        if let Some(ms) = &record.meta.ms {
            let _ = write!(line, " {}", paint_opt(ms, accent));
        }

        line
    }

    fn render_meta(&self, record: &LogRecord) -> Option<String> {
        let residual = record.residual_fields();
        if residual.is_empty() {
            return None;
        }
        let value = serde_json::Value::Object(residual);
        let rendered = if self.options.pretty_print {
            inspect(&value, self.options.colors)
        } else {
            serde_json::to_string(&value).unwrap_or_default()
        };
        (!rendered.is_empty() && rendered != "{}").then_some(rendered)
    }
}

impl RecordFormatter for NestLikeFormatter {
    fn format(&self, record: &LogRecord) -> String {
        self.render(record)
    }

    fn name(&self) -> &str {
        "nest-like"
    }
}
