//! Normalized log record

use super::log_level::LogLevel;
use super::message::ErrorLike;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Everything a record carries besides its level and message.
///
/// This is the `meta` argument of the leveled [`LogEngine`](super::LogEngine)
/// methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(rename = "requestId", default)]
    pub request_id: String,

    /// Trace of an error or fatal record; holds at most one entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorLike>,

    #[serde(rename = "@timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Elapsed time since the previous record, e.g. `+5ms`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ms: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RecordMeta {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// A normalized log record as handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            meta: RecordMeta::default(),
        }
    }

    pub fn from_parts(level: LogLevel, message: impl Into<String>, meta: RecordMeta) -> Self {
        Self {
            level,
            message: message.into(),
            meta,
        }
    }

    pub fn context(&self) -> Option<&str> {
        self.meta.context.as_deref()
    }

    pub fn request_id(&self) -> &str {
        &self.meta.request_id
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.meta.fields.get(key)
    }

    /// Fields not rendered in a dedicated slot of a text line: the trace,
    /// the captured error and the extra fields, in that order. An empty
    /// trace is left out.
    pub fn residual_fields(&self) -> Map<String, Value> {
        let mut residual = Map::new();
        if let Some(stack) = self.meta.stack.as_ref().filter(|s| !s.is_empty()) {
            residual.insert(
                "stack".to_string(),
                Value::Array(stack.iter().cloned().map(Value::String).collect()),
            );
        }
        if let Some(error) = &self.meta.error {
            if let Ok(value) = serde_json::to_value(error) {
                residual.insert("error".to_string(), value);
            }
        }
        for (key, value) in &self.meta.fields {
            if key == "log.level" {
                continue;
            }
            residual.insert(key.clone(), value.clone());
        }
        residual
    }

    /// Serialize to a single-line JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
