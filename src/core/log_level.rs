//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[serde(alias = "trace")]
    Verbose = 0,
    Debug = 1,
    #[default]
    #[serde(alias = "log")]
    Info = 2,
    #[serde(alias = "warning")]
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// Wire name used in records and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }

    /// Label shown by the console formatter. `info` is displayed as `log`.
    pub fn display_label(&self) -> &'static str {
        match self {
            LogLevel::Info => "log",
            other => other.as_str(),
        }
    }

    /// Console color of the level; fatal has none and prints plain
    pub fn color_code(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match self {
            LogLevel::Verbose => Some(BrightCyan),
            LogLevel::Debug => Some(BrightMagenta),
            LogLevel::Info => Some(Green),
            LogLevel::Warn => Some(Yellow),
            LogLevel::Error => Some(Red),
            LogLevel::Fatal => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verbose" | "trace" => Ok(LogLevel::Verbose),
            "debug" => Ok(LogLevel::Debug),
            "info" | "log" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
