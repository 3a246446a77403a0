//! Logging engine contract consumed by the adapter

use super::{
    error::Result,
    log_level::LogLevel,
    log_record::{LogRecord, RecordMeta},
};

/// The structured logging engine behind a [`LoggerAdapter`](super::LoggerAdapter).
///
/// Only [`log_record`](LogEngine::log_record) is required; the leveled
/// methods build a record and route through it unless an engine wants to
/// treat them differently.
pub trait LogEngine: Send + Sync {
    /// Generic entry point taking a complete record.
    fn log_record(&self, record: LogRecord) -> Result<()>;

    /// Whether the engine has a native severity for `level`.
    fn supports(&self, _level: LogLevel) -> bool {
        true
    }

    fn log(&self, level: LogLevel, message: String, meta: RecordMeta) -> Result<()> {
        self.log_record(LogRecord::from_parts(level, message, meta))
    }

    fn error(&self, message: String, meta: RecordMeta) -> Result<()> {
        self.log(LogLevel::Error, message, meta)
    }

    fn warn(&self, message: String, meta: RecordMeta) -> Result<()> {
        self.log(LogLevel::Warn, message, meta)
    }

    fn info(&self, message: String, meta: RecordMeta) -> Result<()> {
        self.log(LogLevel::Info, message, meta)
    }

    fn debug(&self, message: String, meta: RecordMeta) -> Result<()> {
        self.log(LogLevel::Debug, message, meta)
    }

    fn verbose(&self, message: String, meta: RecordMeta) -> Result<()> {
        self.log(LogLevel::Verbose, message, meta)
    }
}
