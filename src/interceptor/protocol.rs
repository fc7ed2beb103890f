//! Callback protocols offered by the host dispatch framework.
//!
//! Two shapes with identical policy: a single-shot deferred-task style and
//! a deferred-result style. They differ only in signatures and in how the
//! "not handled" sentinel is represented (a distinguished constant vs a
//! boolean).
//!
//! The host guarantees ordering: the start hook fires before the
//! post-dispatch hook, which fires before at most one round of
//! timeout/error hooks, which fire before exactly one completion hook.

use crate::context::RequestContext;
use crate::error::{BoxError, ScopeError};

/// Outcome of a timeout/error hook in the deferred-task protocol.
///
/// [`HandleResult::NotHandled`] is the distinguished "not handled"
/// constant: the event stays visible to later interceptors in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult<T> {
    /// This interceptor does not resolve the event.
    NotHandled,
    /// Resolve the request with a substitute result, ending chain
    /// traversal.
    Resolved(T),
}

impl<T> HandleResult<T> {
    /// Whether the event was exclusively resolved.
    pub fn is_handled(&self) -> bool {
        matches!(self, HandleResult::Resolved(_))
    }
}

/// Lifecycle hooks around a single-shot deferred task.
///
/// All methods default to doing nothing so chain participants implement
/// only the hooks they care about.
pub trait TaskProcessingInterceptor<T>: Send + Sync {
    /// Async processing is about to begin.
    fn pre_process(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        let _ = ctx;
        Ok(())
    }

    /// The task handoff has been made; the task now runs independently.
    fn post_process(&self, ctx: &RequestContext, result: Option<&T>) -> Result<(), ScopeError> {
        let _ = (ctx, result);
        Ok(())
    }

    /// The task exceeded its deadline before completing.
    fn handle_timeout(&self, ctx: &RequestContext) -> HandleResult<T> {
        let _ = ctx;
        HandleResult::NotHandled
    }

    /// The task raised an error before completing.
    fn handle_error(&self, ctx: &RequestContext, error: &BoxError) -> HandleResult<T> {
        let _ = (ctx, error);
        HandleResult::NotHandled
    }

    /// The lifecycle reached its terminal point, regardless of outcome.
    fn after_completion(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        let _ = ctx;
        Ok(())
    }
}

/// Lifecycle hooks around a deferred result.
///
/// Same ordering contract as [`TaskProcessingInterceptor`]; the
/// timeout/error hooks return `true` when the event is not exclusively
/// handled, letting the rest of the chain see it.
pub trait DeferredProcessingInterceptor<T>: Send + Sync {
    /// Async processing is about to begin.
    fn pre_process(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        let _ = ctx;
        Ok(())
    }

    /// The deferred result has been produced or abandoned.
    fn post_process(&self, ctx: &RequestContext, result: Option<&T>) -> Result<(), ScopeError> {
        let _ = (ctx, result);
        Ok(())
    }

    /// The operation exceeded its deadline; `true` keeps the event visible
    /// to later interceptors.
    fn handle_timeout(&self, ctx: &RequestContext) -> bool {
        let _ = ctx;
        true
    }

    /// The operation raised an error; `true` keeps the event visible to
    /// later interceptors.
    fn handle_error(&self, ctx: &RequestContext, error: &BoxError) -> bool {
        let _ = (ctx, error);
        true
    }

    /// The lifecycle reached its terminal point, regardless of outcome.
    fn after_completion(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        let _ = ctx;
        Ok(())
    }
}
