//! Adapter wiring
//!
//! Builds a [`LoggerAdapter`] from either a ready engine instance or engine
//! options, plus an optional correlation source. Options can also be
//! resolved asynchronously, once, from a factory closure or an
//! [`AdapterOptionsFactory`] implementation.

use crate::appenders::ConsoleAppender;
use crate::core::{
    CorrelationSource, LogEngine, LogLevel, Logger, LoggerAdapter, LoggerError, OutputFormat,
    Result, TimestampFormat,
};
use crate::formatters::{FormatterOverrides, DEFAULT_APP_NAME};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Options for the built-in [`Logger`] engine
///
/// # Example
///
/// ```
/// use rust_logger_bridge::config::EngineOptions;
/// use rust_logger_bridge::{LogLevel, OutputFormat};
///
/// let options = EngineOptions::from_json(
///     r#"{"level": "debug", "format": "json", "appName": "Billing"}"#,
/// ).unwrap();
/// assert_eq!(options.level, LogLevel::Debug);
/// assert_eq!(options.format, OutputFormat::Json);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    /// Minimum level written
    pub level: LogLevel,
    pub format: OutputFormat,
    /// Tag shown by the nest-like format
    pub app_name: String,
    pub formatter: FormatterOverrides,
    /// Stamp records with `@timestamp`
    pub timestamps: bool,
    /// Representation of `@timestamp`; only `iso8601` is shown in local time
    pub timestamp_format: TimestampFormat,
    /// Discard every record
    pub silent: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: OutputFormat::NestLike,
            app_name: DEFAULT_APP_NAME.to_string(),
            formatter: FormatterOverrides::default(),
            timestamps: true,
            timestamp_format: TimestampFormat::Iso8601,
            silent: false,
        }
    }
}

impl EngineOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoggerError::config("EngineOptions", e.to_string()))
    }

    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    #[must_use]
    pub fn formatter(mut self, overrides: FormatterOverrides) -> Self {
        self.formatter = overrides;
        self
    }

    #[must_use]
    pub fn timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

/// Everything needed to build an adapter
#[derive(Clone, Default)]
pub struct AdapterOptions {
    /// Engine to use; takes precedence over `engine`
    pub instance: Option<Arc<dyn LogEngine>>,
    /// Options for a built-in engine, used when `instance` is `None`
    pub engine: EngineOptions,
    /// Source of request ids
    pub correlation: Option<Arc<dyn CorrelationSource>>,
}

impl AdapterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn instance(mut self, engine: Arc<dyn LogEngine>) -> Self {
        self.instance = Some(engine);
        self
    }

    #[must_use]
    pub fn engine(mut self, options: EngineOptions) -> Self {
        self.engine = options;
        self
    }

    #[must_use]
    pub fn correlation(mut self, source: Arc<dyn CorrelationSource>) -> Self {
        self.correlation = Some(source);
        self
    }
}

/// Build a console [`Logger`] from `options`
pub fn create_engine(options: &EngineOptions) -> Logger {
    let formatter = options.format.formatter(&options.app_name, &options.formatter);
    let builder = Logger::builder()
        .min_level(options.level)
        .silent(options.silent)
        .appender(ConsoleAppender::with_boxed_formatter(formatter));

    if options.timestamps {
        builder.timestamp_format(options.timestamp_format.clone()).build()
    } else {
        builder.without_timestamps().build()
    }
}

/// Build an adapter; a supplied engine instance wins over engine options
pub fn create_adapter(options: AdapterOptions) -> LoggerAdapter {
    let engine = match options.instance {
        Some(engine) => engine,
        None => Arc::new(create_engine(&options.engine)),
    };
    LoggerAdapter::with_correlation(engine, options.correlation)
}

/// Produces adapter options at startup
#[async_trait]
pub trait AdapterOptionsFactory: Send + Sync {
    async fn create_adapter_options(&self) -> Result<AdapterOptions>;
}

pub type OptionsFuture = Pin<Box<dyn Future<Output = Result<AdapterOptions>> + Send>>;

/// Deferred adapter configuration
pub enum AsyncAdapterOptions {
    /// A one-shot closure returning the options
    Factory(Box<dyn FnOnce() -> OptionsFuture + Send>),
    /// An options factory object
    Class(Arc<dyn AdapterOptionsFactory>),
}

impl AsyncAdapterOptions {
    pub fn factory<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<AdapterOptions>> + Send + 'static,
    {
        AsyncAdapterOptions::Factory(Box::new(move || Box::pin(f())))
    }

    pub fn class<T: AdapterOptionsFactory + 'static>(factory: T) -> Self {
        AsyncAdapterOptions::Class(Arc::new(factory))
    }

    /// Resolve the options
    pub async fn resolve(self) -> Result<AdapterOptions> {
        match self {
            AsyncAdapterOptions::Factory(f) => f().await,
            AsyncAdapterOptions::Class(factory) => factory.create_adapter_options().await,
        }
    }
}

/// Resolve `options` and build the adapter
pub async fn create_adapter_async(options: AsyncAdapterOptions) -> Result<LoggerAdapter> {
    let resolved = options.resolve().await?;
    Ok(create_adapter(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogRecord, StaticCorrelation};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        records: Mutex<Vec<LogRecord>>,
    }

    impl LogEngine for Recorder {
        fn log_record(&self, record: LogRecord) -> Result<()> {
            self.records.lock().push(record);
            Ok(())
        }
    }

    struct StaticFactory {
        engine: Arc<Recorder>,
    }

    #[async_trait]
    impl AdapterOptionsFactory for StaticFactory {
        async fn create_adapter_options(&self) -> Result<AdapterOptions> {
            Ok(AdapterOptions::new()
                .instance(self.engine.clone())
                .correlation(Arc::new(StaticCorrelation::new("boot"))))
        }
    }

    #[test]
    fn test_engine_options_defaults() {
        let options = EngineOptions::default();
        assert_eq!(options.level, LogLevel::Info);
        assert_eq!(options.format, OutputFormat::NestLike);
        assert_eq!(options.app_name, DEFAULT_APP_NAME);
        assert!(options.timestamps);
    }

    #[test]
    fn test_engine_options_from_json() {
        let options = EngineOptions::from_json(
            r#"{"level": "log", "formatter": {"colors": false, "processId": false}, "timestamps": false}"#,
        )
        .unwrap();
        assert_eq!(options.level, LogLevel::Info);
        assert_eq!(options.formatter.colors, Some(false));
        assert_eq!(options.formatter.process_id, Some(false));
        assert_eq!(options.formatter.pretty_print, None);
        assert!(!options.timestamps);
    }

    #[test]
    fn test_engine_options_timestamp_format() {
        let options = EngineOptions::from_json(r#"{"timestampFormat": "unix-millis"}"#).unwrap();
        assert_eq!(options.timestamp_format, TimestampFormat::UnixMillis);

        let options =
            EngineOptions::from_json(r#"{"timestampFormat": {"custom": "%H:%M"}}"#).unwrap();
        assert_eq!(options.timestamp_format, TimestampFormat::Custom("%H:%M".to_string()));
    }

    #[test]
    fn test_engine_options_invalid() {
        let err = EngineOptions::from_json(r#"{"level": "loud"}"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_create_engine_applies_options() {
        let engine = create_engine(&EngineOptions::default().level(LogLevel::Warn));
        assert_eq!(engine.min_level(), LogLevel::Warn);
        assert_eq!(engine.appender_count(), 1);
    }

    #[test]
    fn test_instance_takes_precedence() {
        let recorder = Arc::new(Recorder::default());
        let adapter = create_adapter(
            AdapterOptions::new()
                .instance(recorder.clone())
                .engine(EngineOptions::default().silent(true)),
        );
        adapter.log("to the instance", None).unwrap();
        assert_eq!(recorder.records.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_async_factory_closure() {
        let recorder = Arc::new(Recorder::default());
        let engine = recorder.clone();
        let adapter = create_adapter_async(AsyncAdapterOptions::factory(move || async move {
            Ok(AdapterOptions::new().instance(engine))
        }))
        .await
        .unwrap();

        adapter.warn("resolved", None).unwrap();
        assert_eq!(recorder.records.lock()[0].message, "resolved");
    }

    #[tokio::test]
    async fn test_async_factory_class() {
        let recorder = Arc::new(Recorder::default());
        let adapter = create_adapter_async(AsyncAdapterOptions::class(StaticFactory {
            engine: recorder.clone(),
        }))
        .await
        .unwrap();

        adapter.log("from class", None).unwrap();
        assert_eq!(recorder.records.lock()[0].request_id(), "boot");
    }

    #[tokio::test]
    async fn test_async_factory_error_propagates() {
        let result = create_adapter_async(AsyncAdapterOptions::factory(|| async {
            Err(LoggerError::config("AdapterOptions", "vault unreachable"))
        }))
        .await;
        assert!(result.is_err());
    }
}
