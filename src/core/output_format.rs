//! Output format selection for console lines
//!
//! - NestLike: human-readable, optionally colorized (default)
//! - Json: one compact JSON object per record

use super::error::{LoggerError, Result};
use super::formatter::RecordFormatter;
use crate::formatters::{configure_formatter, FormatterOverrides, JsonFormatter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Example: `[App] 4242   1/8/2025, 10:30:45 AM     LOG [Http] Request processed`
    #[default]
    NestLike,

    /// Example: `{"level":"info","message":"Request processed","requestId":""}`
    Json,
}

impl OutputFormat {
    /// Build the formatter for this output format
    pub fn formatter(
        &self,
        app_name: &str,
        overrides: &FormatterOverrides,
    ) -> Box<dyn RecordFormatter> {
        match self {
            OutputFormat::NestLike => Box::new(configure_formatter(app_name, overrides)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nest-like" | "nestlike" | "text" => Ok(OutputFormat::NestLike),
            "json" => Ok(OutputFormat::Json),
            other => Err(LoggerError::config(
                "OutputFormat",
                format!("unknown output format '{}'", other),
            )),
        }
    }
}
