//! # Rust Logger Bridge
//!
//! Connects a framework-style logging contract (`log`, `fatal`, `error`,
//! `warn`, `debug`, `verbose` with an optional context label) to a
//! structured logging engine, and renders records as nest-like console
//! lines or JSON.
//!
//! ## Features
//!
//! - **Normalization**: strings, field maps and error values become one
//!   uniform record shape
//! - **Correlation**: request ids read from an injected source
//! - **Console formatting**: pid, timestamp, level label, request id,
//!   context and metadata, colored on terminals
//! - **Wiring**: build adapters from options, synchronously or from an
//!   async factory
//!
//! ## Example
//!
//! ```
//! use rust_logger_bridge::config::{create_adapter, AdapterOptions, EngineOptions};
//! use rust_logger_bridge::core::StaticCorrelation;
//! use std::sync::Arc;
//!
//! let adapter = create_adapter(
//!     AdapterOptions::new()
//!         .engine(EngineOptions::default().app_name("Orders"))
//!         .correlation(Arc::new(StaticCorrelation::new("req-42"))),
//! )
//! .with_context("Checkout");
//!
//! adapter.warn("payment retry", None).unwrap();
//! ```

pub mod appenders;
pub mod config;
pub mod core;
pub mod formatters;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::ConsoleAppender;
    pub use crate::config::{
        create_adapter, create_adapter_async, create_engine, AdapterOptions,
        AdapterOptionsFactory, AsyncAdapterOptions, EngineOptions,
    };
    pub use crate::core::{
        Appender, CorrelationSource, ErrorLike, LogEngine, LogLevel, LogMessage, LogRecord,
        Logger, LoggerAdapter, LoggerBuilder, LoggerError, LoggerMetrics, LoggerService,
        OutputFormat, RecordFormatter, RecordMeta, RequestContext, Result, ScopedCorrelation,
        StaticCorrelation, TimestampFormat,
    };
    #[cfg(feature = "tokio")]
    pub use crate::core::TaskCorrelation;
    pub use crate::formatters::{
        configure_formatter, FormatterOverrides, JsonFormatter, NestLikeFormatter,
    };
}

pub use appenders::ConsoleAppender;
pub use config::{create_adapter, create_adapter_async, AdapterOptions, EngineOptions};
pub use core::{
    Appender, CorrelationSource, ErrorLike, LogEngine, LogLevel, LogMessage, LogRecord, Logger,
    LoggerAdapter, LoggerBuilder, LoggerError, LoggerMetrics, LoggerService, OutputFormat,
    RecordFormatter, RecordMeta, RequestContext, Result, TimestampFormat,
};
pub use formatters::{configure_formatter, FormatterOverrides, JsonFormatter, NestLikeFormatter};
