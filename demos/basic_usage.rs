//! Basic adapter usage example
//!
//! Demonstrates the nest-like console output, correlation scopes and the
//! different message shapes.
//!
//! Run with: cargo run --example basic_usage

use rust_logger_bridge::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Logger Bridge - Basic Usage Example ===\n");

    let adapter = create_adapter(
        AdapterOptions::new()
            .engine(EngineOptions::default().level(LogLevel::Verbose).app_name("Demo"))
            .correlation(Arc::new(ScopedCorrelation::new())),
    )
    .with_context("Main");

    println!("1. Logging at different levels:");
    adapter.verbose("This is a verbose message", None)?;
    adapter.debug("This is a debug message", None)?;
    adapter.log("This is a log message", None)?;
    adapter.warn("This is a warning message", None)?;
    adapter.error("This is an error message", Some("Error: trace\n    at main"), None)?;
    adapter.fatal("This is a fatal message", None, None)?;

    println!("\n2. Structured messages and errors:");
    adapter.log(json!({"message": "user signed in", "userId": 42, "roles": ["admin"]}), None)?;
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml missing");
    adapter.error(LogMessage::error(&io_error), None, Some("Config"))?;

    println!("\n3. Inside a request scope:");
    ScopedCorrelation::run(RequestContext::new("req-7f3a"), || {
        adapter.log("handling request", Some("Http"))
    })?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
