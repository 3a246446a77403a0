//! JSON formatter for structured console output

use crate::core::{LogRecord, LoggerError, RecordFormatter, Result};

/// Writes each record as a single-line JSON object (JSONL)
///
/// Compatible with log aggregation tools like ELK, Loki, etc.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn try_format(&self, record: &LogRecord) -> Result<String> {
        record
            .to_json()
            .map_err(|e| LoggerError::formatter("json", e.to_string()))
    }
}

impl RecordFormatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> String {
        // A record that cannot be serialized still yields a line
        self.try_format(record).unwrap_or_else(|e| {
            serde_json::json!({
                "level": record.level,
                "message": record.message,
                "formatError": e.to_string(),
            })
            .to_string()
        })
    }

    fn name(&self) -> &str {
        "json"
    }
}
