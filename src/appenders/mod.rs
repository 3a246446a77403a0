//! Appender implementations

pub mod console;

pub use console::ConsoleAppender;

// Re-export the trait for convenience
pub use crate::core::Appender;
