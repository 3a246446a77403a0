//! Formatter trait turning records into text lines

use super::log_record::LogRecord;

/// Renders one record as one line of text, without a trailing newline.
///
/// Implementations must not panic on any record.
pub trait RecordFormatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> String;

    fn name(&self) -> &str;
}

impl<F> RecordFormatter for F
where
    F: Fn(&LogRecord) -> String + Send + Sync,
{
    fn format(&self, record: &LogRecord) -> String {
        self(record)
    }

    fn name(&self) -> &str {
        "custom"
    }
}
