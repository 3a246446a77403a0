//! Built-in logging engine

use super::{
    appender::Appender,
    engine::LogEngine,
    error::{LoggerError, Result},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    timestamp::TimestampFormat,
};
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

/// Synchronous engine fanning records out to its appenders.
///
/// Records below the minimum level are discarded, the rest are stamped
/// with `@timestamp` (unless disabled or already present) and written by
/// every appender in turn.
pub struct Logger {
    min_level: Arc<RwLock<LogLevel>>,
    appenders: Arc<RwLock<Vec<Box<dyn Appender>>>>,
    timestamp_format: Option<TimestampFormat>,
    silent: bool,
    /// Metrics for observability (written, failed, filtered)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: Arc::new(RwLock::new(LogLevel::Info)),
            appenders: Arc::new(RwLock::new(Vec::new())),
            timestamp_format: Some(TimestampFormat::Iso8601),
            silent: false,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Write a record with per-appender panic isolation
    ///
    /// One failing appender never prevents the others from receiving the
    /// record. The first failure is returned after all appenders ran.
    fn process_sync(
        appenders: &mut [Box<dyn Appender>],
        record: &LogRecord,
        metrics: &LoggerMetrics,
    ) -> Result<()> {
        let mut first_error: Option<LoggerError> = None;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(record)
            }));

            let failure = match append_result {
                Ok(Ok(())) => None,
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender #{} ({}) failed: {}", idx, appender.name(), e);
                    Some(LoggerError::appender(appender.name(), e.to_string()))
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} ({}) panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        appender.name(),
                        panic_msg
                    );
                    Some(LoggerError::appender(
                        appender.name(),
                        format!("panicked: {}", panic_msg),
                    ))
                }
            };

            if first_error.is_none() {
                first_error = failure;
            }
        }

        match first_error {
            Some(err) => {
                metrics.record_failed_write();
                Err(err)
            }
            None => {
                metrics.record_logged();
                Ok(())
            }
        }
    }

    pub fn add_appender(&mut self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        !self.silent && level >= self.min_level()
    }

    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    /// Get metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    /// Create a builder for configuring a logger
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_bridge::{ConsoleAppender, Logger, LogLevel};
    ///
    /// let logger = Logger::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .appender(ConsoleAppender::new())
    ///     .build();
    /// assert_eq!(logger.appender_count(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl LogEngine for Logger {
    fn log_record(&self, mut record: LogRecord) -> Result<()> {
        if !self.is_enabled(record.level) {
            self.metrics.record_filtered();
            return Ok(());
        }

        if record.meta.timestamp.is_none() {
            if let Some(format) = &self.timestamp_format {
                record.meta.timestamp = Some(format.format(&Utc::now()));
            }
        }

        let mut appenders = self.appenders.write();
        Self::process_sync(&mut appenders, &record, &self.metrics)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Some(mut appenders) = self.appenders.try_write() {
            for appender in appenders.iter_mut() {
                let _ = appender.flush();
            }
        }
    }
}

/// Builder for configuring a [`Logger`]
pub struct LoggerBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    timestamp_format: Option<TimestampFormat>,
    silent: bool,
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appenders: Vec::new(),
            timestamp_format: Some(TimestampFormat::Iso8601),
            silent: false,
        }
    }

    /// Set the minimum log level
    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Add an appender
    #[must_use]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Add an already boxed appender
    #[must_use]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Set the `@timestamp` representation
    #[must_use]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    /// Do not stamp records with `@timestamp`
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamp_format = None;
        self
    }

    /// Discard every record
    #[must_use]
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            min_level: Arc::new(RwLock::new(self.min_level)),
            appenders: Arc::new(RwLock::new(self.appenders)),
            timestamp_format: self.timestamp_format,
            silent: self.silent,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
