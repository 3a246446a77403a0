//! Request correlation sources
//!
//! This module provides:
//! - `CorrelationSource`: the narrow read-only capability the adapter is given
//! - `ScopedCorrelation`: thread-local scopes entered through an RAII guard
//! - `StaticCorrelation`: a fixed request id
//! - `TaskCorrelation`: tokio task-local scopes (feature `tokio`)

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::marker::PhantomData;

/// Per-call-chain data visible to the logger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(rename = "requestId", skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
        }
    }
}

/// Read access to the request context of the current call chain.
///
/// Implementations must not panic when no context is active; they return
/// `None` instead.
pub trait CorrelationSource: Send + Sync {
    fn current(&self) -> Option<RequestContext>;
}

thread_local! {
    static SCOPE_STACK: RefCell<Vec<RequestContext>> = const { RefCell::new(Vec::new()) };
}

/// Thread-local correlation scopes.
///
/// Request-entry code enters a scope for the duration of the request; any
/// adapter holding a `ScopedCorrelation` sees the innermost scope of the
/// calling thread.
///
/// # Example
///
/// ```
/// use rust_logger_bridge::core::{CorrelationSource, RequestContext, ScopedCorrelation};
///
/// let source = ScopedCorrelation::new();
/// {
///     let _guard = ScopedCorrelation::enter(RequestContext::new("req-1"));
///     assert_eq!(source.current().unwrap().request_id.as_deref(), Some("req-1"));
/// }
/// assert!(source.current().is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedCorrelation;

impl ScopedCorrelation {
    pub fn new() -> Self {
        Self
    }

    /// Push `context` for the current thread until the guard is dropped.
    pub fn enter(context: RequestContext) -> CorrelationGuard {
        SCOPE_STACK.with(|stack| stack.borrow_mut().push(context));
        CorrelationGuard {
            _not_send: PhantomData,
        }
    }

    /// Run `f` inside a scope for `context`.
    pub fn run<R>(context: RequestContext, f: impl FnOnce() -> R) -> R {
        let _guard = Self::enter(context);
        f()
    }
}

impl CorrelationSource for ScopedCorrelation {
    fn current(&self) -> Option<RequestContext> {
        SCOPE_STACK
            .try_with(|stack| stack.borrow().last().cloned())
            .ok()
            .flatten()
    }
}

/// RAII guard for a thread-local correlation scope.
///
/// Dropping the guard restores the enclosing scope. The guard is tied to the
/// thread that created it.
pub struct CorrelationGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for CorrelationGuard {
    fn drop(&mut self) {
        let _ = SCOPE_STACK.try_with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// A source that always reports the same request id.
#[derive(Debug, Clone)]
pub struct StaticCorrelation {
    context: RequestContext,
}

impl StaticCorrelation {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            context: RequestContext::new(request_id),
        }
    }
}

impl CorrelationSource for StaticCorrelation {
    fn current(&self) -> Option<RequestContext> {
        Some(self.context.clone())
    }
}

#[cfg(feature = "tokio")]
pub use task::TaskCorrelation;

#[cfg(feature = "tokio")]
mod task {
    use super::{CorrelationSource, RequestContext};
    use std::future::Future;

    tokio::task_local! {
        static TASK_CONTEXT: RequestContext;
    }

    /// Correlation scoped to a tokio task, following the request across
    /// `.await` points.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct TaskCorrelation;

    impl TaskCorrelation {
        pub fn new() -> Self {
            Self
        }

        /// Drive `future` with `context` as its request context.
        pub async fn scope<F: Future>(context: RequestContext, future: F) -> F::Output {
            TASK_CONTEXT.scope(context, future).await
        }
    }

    impl CorrelationSource for TaskCorrelation {
        fn current(&self) -> Option<RequestContext> {
            TASK_CONTEXT.try_with(|ctx| ctx.clone()).ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_id(source: &dyn CorrelationSource) -> Option<String> {
        source.current().and_then(|ctx| ctx.request_id)
    }

    #[test]
    fn test_no_scope_is_none() {
        assert_eq!(current_id(&ScopedCorrelation::new()), None);
    }

    #[test]
    fn test_nested_scopes_restore_outer() {
        let source = ScopedCorrelation::new();
        let _outer = ScopedCorrelation::enter(RequestContext::new("outer"));
        {
            let _inner = ScopedCorrelation::enter(RequestContext::new("inner"));
            assert_eq!(current_id(&source).as_deref(), Some("inner"));
        }
        assert_eq!(current_id(&source).as_deref(), Some("outer"));
    }

    #[test]
    fn test_scopes_are_per_thread() {
        let _guard = ScopedCorrelation::enter(RequestContext::new("main"));
        let seen = std::thread::spawn(|| current_id(&ScopedCorrelation::new()))
            .join()
            .unwrap();
        assert_eq!(seen, None);
    }

    #[test]
    fn test_run_returns_closure_value() {
        let source = ScopedCorrelation::new();
        let id = ScopedCorrelation::run(RequestContext::new("r-9"), || current_id(&source));
        assert_eq!(id.as_deref(), Some("r-9"));
        assert_eq!(current_id(&source), None);
    }

    #[test]
    fn test_static_source() {
        assert_eq!(current_id(&StaticCorrelation::new("batch")).as_deref(), Some("batch"));
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn test_task_correlation_across_await() {
        let source = TaskCorrelation::new();
        assert_eq!(current_id(&source), None);

        let seen = TaskCorrelation::scope(RequestContext::new("task-1"), async move {
            tokio::task::yield_now().await;
            current_id(&source)
        })
        .await;
        assert_eq!(seen.as_deref(), Some("task-1"));
    }
}
