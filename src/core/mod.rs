//! Core logger types and traits

pub mod adapter;
pub mod appender;
pub mod correlation;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod output_format;
pub mod timestamp;

pub use adapter::{LoggerAdapter, LoggerService};
pub use appender::Appender;
#[cfg(feature = "tokio")]
pub use correlation::TaskCorrelation;
pub use correlation::{
    CorrelationGuard, CorrelationSource, RequestContext, ScopedCorrelation, StaticCorrelation,
};
pub use engine::LogEngine;
pub use error::{LoggerError, Result};
pub use formatter::RecordFormatter;
pub use log_level::LogLevel;
pub use log_record::{LogRecord, RecordMeta};
pub use logger::{Logger, LoggerBuilder};
pub use message::{ErrorLike, LogMessage};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use timestamp::TimestampFormat;
