//! Internal state machine shared by both protocol surfaces.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::ScopePolicy;
use crate::context::RequestContext;
use crate::error::ScopeError;
use crate::observability::metrics;
use crate::registry::{RegistryKey, ResourceRegistry};
use crate::resource::ScopedResource;

/// Binding and closure state for one request attempt.
///
/// The flags are plain atomic stores/loads: the host may run the
/// timeout/error hooks on a different thread than the one that bound, so
/// visibility is required, but ordering between hooks is the host's
/// happens-before contract. No read-modify-write exists here.
pub(crate) struct BindingState {
    registry: Arc<dyn ResourceRegistry>,
    key: RegistryKey,
    resource: Arc<dyn ScopedResource>,
    policy: ScopePolicy,
    timeout_in_progress: AtomicBool,
    error_in_progress: AtomicBool,
}

impl BindingState {
    pub(crate) fn new(
        registry: Arc<dyn ResourceRegistry>,
        key: RegistryKey,
        resource: Arc<dyn ScopedResource>,
        policy: ScopePolicy,
    ) -> Self {
        Self {
            registry,
            key,
            resource,
            policy,
            timeout_in_progress: AtomicBool::new(false),
            error_in_progress: AtomicBool::new(false),
        }
    }

    /// Reset both flags and bind the resource under the key.
    ///
    /// Idempotent per request attempt: a restarted attempt may find its
    /// own stale binding still in place and leaves it as is.
    pub(crate) fn bind(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        self.timeout_in_progress.store(false, Ordering::Relaxed);
        self.error_in_progress.store(false, Ordering::Relaxed);

        let already_ours = self
            .registry
            .lookup(&self.key)
            .is_some_and(|bound| Arc::ptr_eq(&bound, &self.resource));
        if !already_ours {
            self.registry.bind(&self.key, self.resource.clone())?;
        }

        metrics::record_binding();
        tracing::debug!(
            request_id = %ctx.id(),
            key = %self.key,
            "bound scoped resource for async processing"
        );
        Ok(())
    }

    /// Unbind the key; the resource stays open.
    pub(crate) fn unbind(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        self.registry.unbind(&self.key)?;
        tracing::debug!(
            request_id = %ctx.id(),
            key = %self.key,
            "unbound scoped resource after task handoff"
        );
        Ok(())
    }

    pub(crate) fn mark_timeout(&self) {
        self.timeout_in_progress.store(true, Ordering::Relaxed);
        metrics::record_timeout();
    }

    pub(crate) fn mark_error(&self) {
        self.error_in_progress.store(true, Ordering::Relaxed);
        metrics::record_error();
    }

    /// Close the resource if this attempt timed out or errored.
    ///
    /// The normal path is a no-op: the resource's lifecycle stays with the
    /// original caller.
    pub(crate) fn complete(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        let timed_out = self.timeout_in_progress.load(Ordering::Relaxed);
        let errored = self.error_in_progress.load(Ordering::Relaxed);

        let close = (timed_out && self.policy.close_on_timeout)
            || (errored && self.policy.close_on_error);
        if !close {
            return Ok(());
        }

        tracing::debug!(
            request_id = %ctx.id(),
            key = %self.key,
            timed_out,
            errored,
            "closing scoped resource after async timeout/error"
        );
        metrics::record_abnormal_close(if timed_out { "timeout" } else { "error" });
        self.resource.close().map_err(ScopeError::Resource)
    }
}
