//! Framework logger contract and its adapter onto a [`LogEngine`]

use super::{
    correlation::CorrelationSource,
    engine::LogEngine,
    error::Result,
    log_level::LogLevel,
    log_record::{LogRecord, RecordMeta},
    message::{value_to_text, ErrorLike, LogMessage},
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Logging contract the hosting framework calls into.
pub trait LoggerService: Send + Sync {
    fn log(&self, message: LogMessage, context: Option<&str>) -> Result<()>;
    fn fatal(&self, message: LogMessage, trace: Option<&str>, context: Option<&str>) -> Result<()>;
    fn error(&self, message: LogMessage, trace: Option<&str>, context: Option<&str>) -> Result<()>;
    fn warn(&self, message: LogMessage, context: Option<&str>) -> Result<()>;
    fn debug(&self, message: LogMessage, context: Option<&str>) -> Result<()>;
    fn verbose(&self, message: LogMessage, context: Option<&str>) -> Result<()>;
    fn set_context(&mut self, context: &str);
}

/// Normalizes framework log calls into [`LogRecord`]s for an engine.
///
/// Every call resolves the request id from the correlation source, picks the
/// explicit context or falls back to the sticky one, classifies the message
/// and performs exactly one engine call.
///
/// The sticky context is plain state of this instance; share one adapter per
/// component rather than mutating a shared one from several call chains.
///
/// # Example
///
/// ```
/// use rust_logger_bridge::{LoggerAdapter, Logger};
/// use std::sync::Arc;
///
/// let adapter = LoggerAdapter::new(Arc::new(Logger::new())).with_context("Bootstrap");
/// adapter.log("listening on :8080", None).unwrap();
/// ```
#[derive(Clone)]
pub struct LoggerAdapter {
    engine: Arc<dyn LogEngine>,
    correlation: Option<Arc<dyn CorrelationSource>>,
    context: Option<String>,
}

impl LoggerAdapter {
    pub fn new(engine: Arc<dyn LogEngine>) -> Self {
        Self {
            engine,
            correlation: None,
            context: None,
        }
    }

    pub fn with_correlation(
        engine: Arc<dyn LogEngine>,
        correlation: Option<Arc<dyn CorrelationSource>>,
    ) -> Self {
        Self {
            engine,
            correlation,
            context: None,
        }
    }

    /// Set the sticky context label (builder form)
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = Some(context.into());
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// The engine records are forwarded to
    pub fn engine(&self) -> &Arc<dyn LogEngine> {
        &self.engine
    }

    pub fn log(&self, message: impl Into<LogMessage>, context: Option<&str>) -> Result<()> {
        let (level, message, meta) = self.normalize(message.into(), context, Severity::Log);
        self.engine.log(level, message, meta)
    }

    pub fn fatal(
        &self,
        message: impl Into<LogMessage>,
        trace: Option<&str>,
        context: Option<&str>,
    ) -> Result<()> {
        let (_, message, mut meta) =
            self.normalize(message.into(), context, Severity::Failure { trace });

        if self.engine.supports(LogLevel::Fatal) {
            return self
                .engine
                .log_record(LogRecord::from_parts(LogLevel::Fatal, message, meta));
        }
        meta.fields.insert("fatal".to_string(), Value::Bool(true));
        self.engine
            .log_record(LogRecord::from_parts(LogLevel::Error, message, meta))
    }

    pub fn error(
        &self,
        message: impl Into<LogMessage>,
        trace: Option<&str>,
        context: Option<&str>,
    ) -> Result<()> {
        let (_, message, meta) =
            self.normalize(message.into(), context, Severity::Failure { trace });
        self.engine.error(message, meta)
    }

    pub fn warn(&self, message: impl Into<LogMessage>, context: Option<&str>) -> Result<()> {
        let (_, message, meta) = self.normalize(message.into(), context, Severity::Plain);
        self.engine.warn(message, meta)
    }

    pub fn debug(&self, message: impl Into<LogMessage>, context: Option<&str>) -> Result<()> {
        let (_, message, meta) = self.normalize(message.into(), context, Severity::Plain);
        self.engine.debug(message, meta)
    }

    pub fn verbose(&self, message: impl Into<LogMessage>, context: Option<&str>) -> Result<()> {
        let (_, message, meta) = self.normalize(message.into(), context, Severity::Plain);
        self.engine.verbose(message, meta)
    }

    fn request_id(&self) -> String {
        self.correlation
            .as_ref()
            .and_then(|source| source.current())
            .and_then(|ctx| ctx.request_id)
            .unwrap_or_default()
    }

    fn resolve_context(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .or_else(|| self.context.clone())
    }

    /// Turn a classified message into level, text and metadata.
    ///
    /// The returned level is only meaningful for [`Severity::Log`].
    fn normalize(
        &self,
        message: LogMessage,
        context: Option<&str>,
        severity: Severity<'_>,
    ) -> (LogLevel, String, RecordMeta) {
        let mut meta = RecordMeta {
            context: self.resolve_context(context),
            request_id: self.request_id(),
            ..RecordMeta::default()
        };
        let mut level = LogLevel::Info;
        let explicit_trace = match severity {
            Severity::Failure { trace } => Some(trace.filter(|t| !t.is_empty())),
            _ => None,
        };

        let text = match message {
            LogMessage::Text(text) => {
                if let Some(trace) = explicit_trace {
                    meta.stack = Some(trace.map(str::to_string).into_iter().collect());
                }
                text
            }
            LogMessage::Error(error) => match explicit_trace {
                Some(trace) => {
                    let stack = trace.map(str::to_string).or_else(|| error.stack.clone());
                    meta.stack = Some(stack.into_iter().collect());
                    let text = error.message.clone();
                    let fields = error.fields.clone();
                    meta.error = Some(error);
                    spread(&mut meta, fields);
                    text
                }
                None => {
                    let ErrorLike { message, fields, .. } = error;
                    if let (Severity::Log, Some(declared)) = (severity, fields.get("level")) {
                        level = declared_level(declared);
                    }
                    spread(&mut meta, fields);
                    message
                }
            },
            LogMessage::Fields(mut fields) => {
                let text = fields
                    .shift_remove("message")
                    .map(|value| value_to_text(&value))
                    .unwrap_or_default();
                if let (Severity::Log, Some(declared)) = (severity, fields.get("level")) {
                    level = declared_level(declared);
                }
                if let Some(trace) = explicit_trace {
                    meta.stack = Some(trace.map(str::to_string).into_iter().collect());
                }
                spread(&mut meta, fields);
                text
            }
        };

        (level, text, meta)
    }
}

/// Which family of operation is normalizing.
#[derive(Debug, Clone, Copy)]
enum Severity<'a> {
    /// The generic `log` call, which honours a declared `level` field
    Log,
    /// `error` and `fatal`, which carry a trace
    Failure { trace: Option<&'a str> },
    Plain,
}

/// Spread extra fields into the metadata.
///
/// Keys with a dedicated slot in [`RecordMeta`] overwrite that slot, so every
/// key appears once in the record. `level` and `message` are already consumed.
fn spread(meta: &mut RecordMeta, fields: Map<String, Value>) {
    for (key, value) in fields {
        match key.as_str() {
            "context" => meta.context = slot_text(value),
            "requestId" => meta.request_id = slot_text(value).unwrap_or_default(),
            "@timestamp" => meta.timestamp = slot_text(value),
            "ms" => meta.ms = slot_text(value),
            "stack" => meta.stack = slot_stack(value),
            "error" => meta.error = slot_error(value),
            "level" | "message" => {}
            _ => {
                meta.fields.insert(key, value);
            }
        }
    }
}

fn slot_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(value_to_text(&other)),
    }
}

fn slot_stack(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(frames) => Some(frames.iter().map(value_to_text).collect()),
        other => slot_text(other).map(|frame| vec![frame]),
    }
}

fn slot_error(value: Value) -> Option<ErrorLike> {
    match value {
        Value::Null => None,
        Value::Object(_) => Some(
            serde_json::from_value(value.clone())
                .unwrap_or_else(|_| ErrorLike::new("Error", value_to_text(&value))),
        ),
        other => Some(ErrorLike::new("Error", value_to_text(&other))),
    }
}

fn declared_level(value: &Value) -> LogLevel {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogLevel::Info)
}

impl LoggerService for LoggerAdapter {
    fn log(&self, message: LogMessage, context: Option<&str>) -> Result<()> {
        LoggerAdapter::log(self, message, context)
    }

    fn fatal(&self, message: LogMessage, trace: Option<&str>, context: Option<&str>) -> Result<()> {
        LoggerAdapter::fatal(self, message, trace, context)
    }

    fn error(&self, message: LogMessage, trace: Option<&str>, context: Option<&str>) -> Result<()> {
        LoggerAdapter::error(self, message, trace, context)
    }

    fn warn(&self, message: LogMessage, context: Option<&str>) -> Result<()> {
        LoggerAdapter::warn(self, message, context)
    }

    fn debug(&self, message: LogMessage, context: Option<&str>) -> Result<()> {
        LoggerAdapter::debug(self, message, context)
    }

    fn verbose(&self, message: LogMessage, context: Option<&str>) -> Result<()> {
        LoggerAdapter::verbose(self, message, context)
    }

    fn set_context(&mut self, context: &str) {
        LoggerAdapter::set_context(self, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RequestContext, ScopedCorrelation, StaticCorrelation};
    use parking_lot::Mutex;
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(&'static str, LogRecord)>>,
        no_fatal: bool,
    }

    impl Recorder {
        fn push(&self, method: &'static str, record: LogRecord) -> Result<()> {
            self.calls.lock().push((method, record));
            Ok(())
        }

        fn last(&self) -> (&'static str, LogRecord) {
            self.calls.lock().last().cloned().expect("a recorded call")
        }
    }

    impl LogEngine for Recorder {
        fn log_record(&self, record: LogRecord) -> Result<()> {
            self.push("log_record", record)
        }

        fn supports(&self, level: LogLevel) -> bool {
            !(self.no_fatal && level == LogLevel::Fatal)
        }

        fn log(&self, level: LogLevel, message: String, meta: RecordMeta) -> Result<()> {
            self.push("log", LogRecord::from_parts(level, message, meta))
        }

        fn error(&self, message: String, meta: RecordMeta) -> Result<()> {
            self.push("error", LogRecord::from_parts(LogLevel::Error, message, meta))
        }

        fn warn(&self, message: String, meta: RecordMeta) -> Result<()> {
            self.push("warn", LogRecord::from_parts(LogLevel::Warn, message, meta))
        }
    }

    fn adapter() -> (LoggerAdapter, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (LoggerAdapter::new(recorder.clone()), recorder)
    }

    #[test]
    fn test_log_string() {
        let (adapter, recorder) = adapter();
        adapter.log("hello", None).unwrap();

        let (method, record) = recorder.last();
        assert_eq!(method, "log");
        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.message, "hello");
        assert_eq!(record.request_id(), "");
        assert!(record.context().is_none());
        assert!(record.meta.stack.is_none());
    }

    #[test]
    fn test_log_fields_with_declared_level() {
        let (adapter, recorder) = adapter();
        adapter
            .log(json!({"message": "cache miss", "level": "debug", "key": "user:1"}), None)
            .unwrap();

        let (_, record) = recorder.last();
        assert_eq!(record.level, LogLevel::Debug);
        assert_eq!(record.message, "cache miss");
        assert_eq!(record.field("key"), Some(&json!("user:1")));
        assert!(record.field("level").is_none());
        assert!(record.field("message").is_none());
    }

    #[test]
    fn test_unknown_declared_level_defaults_to_info() {
        let (adapter, recorder) = adapter();
        adapter.log(json!({"message": "m", "level": 3}), None).unwrap();
        assert_eq!(recorder.last().1.level, LogLevel::Info);
    }

    #[test]
    fn test_level_field_ignored_outside_log() {
        let (adapter, recorder) = adapter();
        adapter.warn(json!({"message": "m", "level": "debug"}), None).unwrap();

        let (method, record) = recorder.last();
        assert_eq!(method, "warn");
        assert_eq!(record.level, LogLevel::Warn);
        assert!(record.field("level").is_none());
    }

    #[test]
    fn test_missing_message_key_is_empty_text() {
        let (adapter, recorder) = adapter();
        adapter.debug(json!({"count": 2}), None).unwrap();
        assert_eq!(recorder.last().1.message, "");
    }

    #[test]
    fn test_non_string_message_key_is_coerced() {
        let (adapter, recorder) = adapter();
        adapter.warn(json!({"message": {"nested": true}}), None).unwrap();
        assert_eq!(recorder.last().1.message, "{\"nested\":true}");
    }

    #[test]
    fn test_error_like_with_explicit_trace() {
        let (adapter, recorder) = adapter();
        let err = ErrorLike::new("TypeError", "bad input")
            .with_stack("TypeError: bad input\n    at parse")
            .with_field("code", "E_INPUT");
        adapter.error(err.clone(), Some("explicit trace"), None).unwrap();

        let (method, record) = recorder.last();
        assert_eq!(method, "error");
        assert_eq!(record.message, "bad input");
        assert_eq!(record.meta.stack, Some(vec!["explicit trace".to_string()]));
        assert_eq!(record.meta.error, Some(err));
        assert_eq!(record.field("code"), Some(&json!("E_INPUT")));
        assert!(record.field("name").is_none());
    }

    #[test]
    fn test_error_like_falls_back_to_own_stack() {
        let (adapter, recorder) = adapter();
        let err = ErrorLike::new("Error", "boom").with_stack("Error: boom\n    at main");
        adapter.error(err, None, None).unwrap();
        adapter.error(ErrorLike::new("Error", "boom").with_stack("own"), Some(""), None).unwrap();

        let calls = recorder.calls.lock();
        assert_eq!(calls[0].1.meta.stack, Some(vec!["Error: boom\n    at main".to_string()]));
        assert_eq!(calls[1].1.meta.stack, Some(vec!["own".to_string()]));
    }

    #[test]
    fn test_error_with_string_and_trace() {
        let (adapter, recorder) = adapter();
        adapter.error("request failed", Some("at handler"), Some("Http")).unwrap();

        let (_, record) = recorder.last();
        assert_eq!(record.message, "request failed");
        assert_eq!(record.meta.stack, Some(vec!["at handler".to_string()]));
        assert_eq!(record.context(), Some("Http"));
        assert!(record.meta.error.is_none());
    }

    #[test]
    fn test_error_without_trace_has_empty_stack() {
        let (adapter, recorder) = adapter();
        adapter.error("plain failure", None, None).unwrap();
        assert_eq!(recorder.last().1.meta.stack, Some(vec![]));
    }

    #[test]
    fn test_error_like_on_warn_is_flattened() {
        let (adapter, recorder) = adapter();
        let err = ErrorLike::new("Error", "retrying").with_field("attempt", 2);
        adapter.warn(err, None).unwrap();

        let (_, record) = recorder.last();
        assert_eq!(record.message, "retrying");
        assert!(record.meta.error.is_none());
        assert!(record.meta.stack.is_none());
        assert_eq!(record.field("attempt"), Some(&json!(2)));
    }

    #[test]
    fn test_fatal_goes_through_generic_entry() {
        let (adapter, recorder) = adapter();
        adapter.fatal(ErrorLike::new("Error", "boom"), None, None).unwrap();

        let (method, record) = recorder.last();
        assert_eq!(method, "log_record");
        assert_eq!(record.level, LogLevel::Fatal);
        assert_eq!(record.message, "boom");
        assert_eq!(record.request_id(), "");
        assert!(record.meta.error.is_some());
    }

    #[test]
    fn test_fatal_on_engine_without_fatal_level() {
        let recorder = Arc::new(Recorder {
            no_fatal: true,
            ..Recorder::default()
        });
        let adapter = LoggerAdapter::new(recorder.clone());
        adapter.fatal("out of memory", None, None).unwrap();

        let (_, record) = recorder.last();
        assert_eq!(record.level, LogLevel::Error);
        assert_eq!(record.field("fatal"), Some(&json!(true)));
    }

    #[test]
    fn test_context_resolution() {
        let (adapter, recorder) = adapter();
        let mut adapter = adapter;

        adapter.set_context("Sticky");
        adapter.warn("a", None).unwrap();
        adapter.warn("b", Some("Explicit")).unwrap();
        adapter.warn("c", Some("")).unwrap();

        let calls = recorder.calls.lock();
        assert_eq!(calls[0].1.context(), Some("Sticky"));
        assert_eq!(calls[1].1.context(), Some("Explicit"));
        assert_eq!(calls[2].1.context(), Some("Sticky"));
    }

    #[test]
    fn test_request_id_from_scope() {
        let recorder = Arc::new(Recorder::default());
        let adapter = LoggerAdapter::with_correlation(
            recorder.clone(),
            Some(Arc::new(ScopedCorrelation::new())),
        );

        adapter.log("outside", None).unwrap();
        ScopedCorrelation::run(RequestContext::new("req-42"), || {
            adapter.log("inside", None).unwrap();
        });

        let calls = recorder.calls.lock();
        assert_eq!(calls[0].1.request_id(), "");
        assert_eq!(calls[1].1.request_id(), "req-42");
    }

    #[test]
    fn test_scope_without_request_id() {
        let recorder = Arc::new(Recorder::default());
        let adapter = LoggerAdapter::with_correlation(
            recorder.clone(),
            Some(Arc::new(ScopedCorrelation::new())),
        );
        let _guard = ScopedCorrelation::enter(RequestContext::default());
        adapter.log("no id", None).unwrap();
        assert_eq!(recorder.last().1.request_id(), "");
    }

    #[test]
    fn test_fields_override_context_and_request_id() {
        let recorder = Arc::new(Recorder::default());
        let adapter = LoggerAdapter::with_correlation(
            recorder.clone(),
            Some(Arc::new(StaticCorrelation::new("from-source"))),
        )
        .with_context("Sticky");

        adapter
            .log(json!({"message": "m", "context": "Inline", "requestId": "inline-id"}), None)
            .unwrap();

        let (_, record) = recorder.last();
        assert_eq!(record.context(), Some("Inline"));
        assert_eq!(record.request_id(), "inline-id");
        assert!(record.meta.fields.is_empty());
    }

    #[test]
    fn test_reserved_fields_fill_their_slots() {
        let (adapter, recorder) = adapter();
        adapter
            .log(
                json!({
                    "message": "n",
                    "@timestamp": "2024-01-01T00:00:00.000Z",
                    "ms": "+5ms",
                    "context": 42,
                    "requestId": null,
                }),
                None,
            )
            .unwrap();

        let (_, record) = recorder.last();
        assert_eq!(record.meta.timestamp.as_deref(), Some("2024-01-01T00:00:00.000Z"));
        assert_eq!(record.meta.ms.as_deref(), Some("+5ms"));
        assert_eq!(record.context(), Some("42"));
        assert_eq!(record.request_id(), "");
        assert!(record.meta.fields.is_empty());
    }

    #[test]
    fn test_spread_stack_wins_over_trace() {
        let (adapter, recorder) = adapter();
        adapter
            .error(json!({"message": "m", "stack": "custom"}), Some("t"), None)
            .unwrap();

        let (_, record) = recorder.last();
        assert_eq!(record.meta.stack, Some(vec!["custom".to_string()]));
        assert!(record.field("stack").is_none());

        let line = record.to_json().unwrap();
        assert_eq!(line.matches("\"stack\"").count(), 1);
        assert_eq!(LogRecord::from_json(&line).unwrap(), record);
    }

    #[test]
    fn test_spread_error_field() {
        let (adapter, recorder) = adapter();
        adapter
            .warn(json!({"message": "m", "error": {"name": "Timeout", "message": "5s", "code": 7}}), None)
            .unwrap();
        adapter.warn(json!({"message": "m", "error": "plain"}), None).unwrap();

        let calls = recorder.calls.lock();
        let error = calls[0].1.meta.error.clone().unwrap();
        assert_eq!(error.name, "Timeout");
        assert_eq!(error.message, "5s");
        assert_eq!(error.fields["code"], json!(7));
        assert!(calls[0].1.field("error").is_none());
        assert_eq!(calls[1].1.meta.error, Some(ErrorLike::new("Error", "plain")));
    }

    #[test]
    fn test_error_field_overrides_captured_error() {
        let (adapter, recorder) = adapter();
        let err = ErrorLike::new("Error", "outer").with_field("error", json!({"name": "Inner"}));
        adapter.error(err, None, None).unwrap();

        let (_, record) = recorder.last();
        assert_eq!(record.meta.error.as_ref().map(|e| e.name.as_str()), Some("Inner"));
        assert!(record.field("error").is_none());
    }

    #[test]
    fn test_log_error_like_with_declared_level() {
        let (adapter, recorder) = adapter();
        let err = ErrorLike::new("Error", "slow query").with_field("level", "warn");
        adapter.log(err, None).unwrap();
        adapter.log(ErrorLike::new("Error", "plain"), None).unwrap();

        let calls = recorder.calls.lock();
        assert_eq!(calls[0].1.level, LogLevel::Warn);
        assert!(calls[0].1.field("level").is_none());
        assert_eq!(calls[1].1.level, LogLevel::Info);
    }

    #[test]
    fn test_through_service_trait() {
        let (adapter, recorder) = adapter();
        let mut service: Box<dyn LoggerService> = Box::new(adapter);
        service.set_context("Svc");
        service.verbose(LogMessage::from("tick"), None).unwrap();

        let (method, record) = recorder.last();
        assert_eq!(method, "log");
        assert_eq!(record.level, LogLevel::Verbose);
        assert_eq!(record.context(), Some("Svc"));
    }
}
