//! Call-site message classification
//!
//! Framework call sites hand the logger strings, field maps and errors
//! interchangeably. [`LogMessage`] is the single classification step that
//! turns any of them into one of three shapes before normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// An error captured as plain data so it can travel inside a log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLike {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Additional properties carried by the error (codes, causes, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ErrorLike {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
            fields: Map::new(),
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Capture a Rust error. The source chain is kept under `causes`.
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let name = short_type_name(std::any::type_name::<E>());
        let mut captured = Self::new(name, error.to_string());

        let causes: Vec<Value> = std::iter::successors(error.source(), |e| e.source())
            .map(|cause| Value::String(cause.to_string()))
            .collect();
        if !causes.is_empty() {
            captured.fields.insert("causes".to_string(), Value::Array(causes));
        }
        captured
    }
}

impl fmt::Display for ErrorLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// A call-site message after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum LogMessage {
    /// Plain text, used as-is
    Text(String),
    /// A field map; its `message` key becomes the text, the rest is metadata
    Fields(Map<String, Value>),
    /// An error-like value
    Error(ErrorLike),
}

impl LogMessage {
    /// Classify a Rust error.
    pub fn error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        LogMessage::Error(ErrorLike::from_error(error))
    }

    /// Classify any serializable value.
    ///
    /// Values that do not serialize to an object, or fail to serialize at
    /// all, degrade to text instead of failing the log call.
    pub fn fields_of<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => LogMessage::from(value),
            Err(e) => LogMessage::Text(format!("[unserializable: {}]", e)),
        }
    }
}

/// Coerce an arbitrary JSON value to display text.
pub(crate) fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

impl From<&str> for LogMessage {
    fn from(s: &str) -> Self {
        LogMessage::Text(s.to_string())
    }
}

impl From<String> for LogMessage {
    fn from(s: String) -> Self {
        LogMessage::Text(s)
    }
}

impl From<&String> for LogMessage {
    fn from(s: &String) -> Self {
        LogMessage::Text(s.clone())
    }
}

impl From<Cow<'_, str>> for LogMessage {
    fn from(s: Cow<'_, str>) -> Self {
        LogMessage::Text(s.into_owned())
    }
}

macro_rules! impl_text_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogMessage {
                fn from(v: $ty) -> Self {
                    LogMessage::Text(v.to_string())
                }
            }
        )*
    };
}

impl_text_from_display!(i32, i64, u32, u64, usize, f64, bool);

impl From<Map<String, Value>> for LogMessage {
    fn from(map: Map<String, Value>) -> Self {
        LogMessage::Fields(map)
    }
}

impl From<Value> for LogMessage {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => LogMessage::Fields(map),
            other => LogMessage::Text(value_to_text(&other)),
        }
    }
}

impl From<ErrorLike> for LogMessage {
    fn from(error: ErrorLike) -> Self {
        LogMessage::Error(error)
    }
}
