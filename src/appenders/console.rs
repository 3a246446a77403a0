//! Console appender implementation

use crate::core::{Appender, LogLevel, LogRecord, RecordFormatter, Result};
use crate::formatters::{configure_formatter, FormatterOverrides, DEFAULT_APP_NAME};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

enum Target {
    /// stdout, with error and fatal routed to stderr
    Std,
    Writer(Arc<Mutex<dyn Write + Send>>),
}

pub struct ConsoleAppender {
    formatter: Box<dyn RecordFormatter>,
    target: Target,
}

impl ConsoleAppender {
    /// Console appender with the default nest-like formatter
    pub fn new() -> Self {
        Self::with_formatter(configure_formatter(
            DEFAULT_APP_NAME,
            &FormatterOverrides::default(),
        ))
    }

    pub fn with_formatter<F: RecordFormatter + 'static>(formatter: F) -> Self {
        Self::with_boxed_formatter(Box::new(formatter))
    }

    pub fn with_boxed_formatter(formatter: Box<dyn RecordFormatter>) -> Self {
        Self {
            formatter,
            target: Target::Std,
        }
    }

    /// Write lines to `writer` instead of the standard streams
    ///
    /// # Example
    ///
    /// ```
    /// use parking_lot::Mutex;
    /// use rust_logger_bridge::appenders::ConsoleAppender;
    /// use std::sync::Arc;
    ///
    /// let buffer = Arc::new(Mutex::new(Vec::<u8>::new()));
    /// let appender = ConsoleAppender::new().to_writer(buffer.clone());
    /// ```
    #[must_use]
    pub fn to_writer<W: Write + Send + 'static>(mut self, writer: Arc<Mutex<W>>) -> Self {
        self.target = Target::Writer(writer);
        self
    }

    pub fn formatter(&self) -> &dyn RecordFormatter {
        self.formatter.as_ref()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.formatter.format(record);

        match &self.target {
            Target::Std => match record.level {
                // Route Error and Fatal levels to stderr, others to stdout
                LogLevel::Error | LogLevel::Fatal => writeln!(std::io::stderr(), "{}", output)?,
                _ => writeln!(std::io::stdout(), "{}", output)?,
            },
            Target::Writer(writer) => writeln!(writer.lock(), "{}", output)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match &self.target {
            Target::Std => {
                std::io::stdout().flush()?;
                std::io::stderr().flush()?;
            }
            Target::Writer(writer) => writer.lock().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
