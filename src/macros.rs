//! Logging macros for ergonomic log message formatting.
//!
//! Each macro formats its arguments like `format!` and forwards the text to
//! the matching [`LoggerAdapter`](crate::core::LoggerAdapter) operation.
//! A leading `context = ...;` passes an explicit context label.
//!
//! # Examples
//!
//! ```
//! use rust_logger_bridge::prelude::*;
//! use rust_logger_bridge::{log, warn};
//! use std::sync::Arc;
//!
//! let adapter = LoggerAdapter::new(Arc::new(Logger::new()));
//!
//! log!(adapter, "Server started").unwrap();
//!
//! let port = 8080;
//! log!(adapter, "Server listening on port {}", port).unwrap();
//! warn!(adapter, context = "Health"; "{} checks failing", 2).unwrap();
//! ```

/// Log a message at the default level.
///
/// # Examples
///
/// ```
/// # use rust_logger_bridge::prelude::*;
/// # use std::sync::Arc;
/// # let adapter = LoggerAdapter::new(Arc::new(Logger::new()));
/// use rust_logger_bridge::log;
/// log!(adapter, "Simple message").unwrap();
/// log!(adapter, context = "Bootstrap"; "Loaded {} modules", 12).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($adapter:expr, context = $ctx:expr; $($arg:tt)+) => {
        $adapter.log(format!($($arg)+), Some($ctx))
    };
    ($adapter:expr, $($arg:tt)+) => {
        $adapter.log(format!($($arg)+), None)
    };
}

/// Log a fatal message.
///
/// # Examples
///
/// ```
/// # use rust_logger_bridge::prelude::*;
/// # use std::sync::Arc;
/// # let adapter = LoggerAdapter::new(Arc::new(Logger::new()));
/// use rust_logger_bridge::fatal;
/// fatal!(adapter, "Unable to recover from error: {}", "disk full").unwrap();
/// ```
#[macro_export]
macro_rules! fatal {
    ($adapter:expr, context = $ctx:expr; $($arg:tt)+) => {
        $adapter.fatal(format!($($arg)+), None, Some($ctx))
    };
    ($adapter:expr, $($arg:tt)+) => {
        $adapter.fatal(format!($($arg)+), None, None)
    };
}

/// Log an error message.
///
/// # Examples
///
/// ```
/// # use rust_logger_bridge::prelude::*;
/// # use std::sync::Arc;
/// # let adapter = LoggerAdapter::new(Arc::new(Logger::new()));
/// use rust_logger_bridge::error;
/// error!(adapter, "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($adapter:expr, context = $ctx:expr; $($arg:tt)+) => {
        $adapter.error(format!($($arg)+), None, Some($ctx))
    };
    ($adapter:expr, $($arg:tt)+) => {
        $adapter.error(format!($($arg)+), None, None)
    };
}

/// Log a warning message.
#[macro_export]
macro_rules! warn {
    ($adapter:expr, context = $ctx:expr; $($arg:tt)+) => {
        $adapter.warn(format!($($arg)+), Some($ctx))
    };
    ($adapter:expr, $($arg:tt)+) => {
        $adapter.warn(format!($($arg)+), None)
    };
}

/// Log a debug message.
#[macro_export]
macro_rules! debug {
    ($adapter:expr, context = $ctx:expr; $($arg:tt)+) => {
        $adapter.debug(format!($($arg)+), Some($ctx))
    };
    ($adapter:expr, $($arg:tt)+) => {
        $adapter.debug(format!($($arg)+), None)
    };
}

/// Log a verbose message.
#[macro_export]
macro_rules! verbose {
    ($adapter:expr, context = $ctx:expr; $($arg:tt)+) => {
        $adapter.verbose(format!($($arg)+), Some($ctx))
    };
    ($adapter:expr, $($arg:tt)+) => {
        $adapter.verbose(format!($($arg)+), None)
    };
}
