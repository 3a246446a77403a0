//! Formatter implementations

mod ansi;
pub mod inspect;
pub mod json;
pub mod nest_like;

pub use inspect::inspect;
pub use json::JsonFormatter;
pub use nest_like::{
    configure_formatter, no_color_requested, FormatterOptions, FormatterOverrides,
    NestLikeFormatter, DEFAULT_APP_NAME,
};

// Re-export the trait for convenience
pub use crate::core::RecordFormatter;
