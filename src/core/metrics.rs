//! Engine write metrics
//!
//! Counters for monitoring how many records reached the appenders, how many
//! were filtered by level, and how many appender writes failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for engine observability
///
/// # Example
///
/// ```
/// use rust_logger_bridge::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_logged();
/// metrics.record_failed_write();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.failed_writes(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records written by every appender
    total_logged: AtomicU64,

    /// Records at least one appender failed (error or panic) to write
    failed_writes: AtomicU64,

    /// Records discarded by the minimum level
    filtered: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            failed_writes: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    /// Record a fully written entry; returns the previous count
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed_write(&self) -> u64 {
        self.failed_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_logged: AtomicU64::new(self.total_logged()),
            failed_writes: AtomicU64::new(self.failed_writes()),
            filtered: AtomicU64::new(self.filtered()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.total_logged(), 0);
        assert_eq!(metrics.failed_writes(), 0);
        assert_eq!(metrics.filtered(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_failed_write(), 0);
        assert_eq!(metrics.failed_writes(), 1);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let metrics = LoggerMetrics::new();
        metrics.record_filtered();

        let snapshot = metrics.clone();
        metrics.record_filtered();

        assert_eq!(snapshot.filtered(), 1);
        assert_eq!(metrics.filtered(), 2);
    }
}
