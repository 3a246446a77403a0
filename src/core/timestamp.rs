//! Timestamp formatting utilities
//!
//! The engine stamps records with one of the [`TimestampFormat`]s; the console
//! formatter turns ISO 8601 stamps back into a local, human-friendly form and
//! leaves every other representation as it is.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Display format for localized timestamps: `1/1/2024, 12:00:00 AM`
pub const LOCALE_DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const ISO8601_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Timestamp representation written into `@timestamp`
///
/// # Examples
///
/// ```
/// use rust_logger_bridge::core::TimestampFormat;
/// use chrono::Utc;
///
/// let stamp = TimestampFormat::Iso8601.format(&Utc::now());
/// assert!(stamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    ///
    /// The only form the console formatter localizes.
    #[default]
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format(ISO8601_MILLIS).to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                // Invalid strftime specifiers surface as fmt errors
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => datetime.format(ISO8601_MILLIS).to_string(),
                }
            }
        }
    }
}

/// Parse `raw` as a canonical ISO 8601 UTC stamp.
///
/// Accepts only strings that round-trip exactly through
/// [`TimestampFormat::Iso8601`]; anything else yields `None`.
pub fn parse_canonical_iso(raw: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw).ok()?.with_timezone(&Utc);
    (TimestampFormat::Iso8601.format(&parsed) == raw).then_some(parsed)
}

/// Render a canonical ISO 8601 stamp in local time, or return it unchanged.
pub fn localize(raw: &str) -> String {
    match parse_canonical_iso(raw) {
        Some(datetime) => datetime
            .with_timezone(&Local)
            .format(LOCALE_DISPLAY_FORMAT)
            .to_string(),
        None => raw.to_string(),
    }
}
