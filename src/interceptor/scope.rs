//! The request-scoped resource interceptor.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::ScopePolicy;
use crate::context::RequestContext;
use crate::error::{BoxError, ScopeError};
use crate::registry::{RegistryKey, ResourceRegistry};
use crate::resource::ScopedResource;

use super::protocol::{DeferredProcessingInterceptor, HandleResult, TaskProcessingInterceptor};
use super::state::BindingState;

/// Keeps a resource bound to the current logical request across
/// asynchronous execution boundaries and closes it when the async work
/// concludes abnormally.
///
/// One instance is scoped to exactly one request attempt. The five-hook
/// contract lives here; [`task_surface`] and [`deferred_surface`] expose
/// the same state through the two host callback protocols.
///
/// [`task_surface`]: ScopeInterceptor::task_surface
/// [`deferred_surface`]: ScopeInterceptor::deferred_surface
#[derive(Clone)]
pub struct ScopeInterceptor {
    state: Arc<BindingState>,
}

impl ScopeInterceptor {
    /// Create an interceptor for one request attempt.
    ///
    /// The resource and key are supplied by the owning filter; their
    /// lifetime is managed outside this type.
    pub fn new(
        registry: Arc<dyn ResourceRegistry>,
        key: RegistryKey,
        resource: Arc<dyn ScopedResource>,
    ) -> Self {
        Self::with_policy(registry, key, resource, ScopePolicy::default())
    }

    /// Like [`ScopeInterceptor::new`] with an explicit closure policy.
    pub fn with_policy(
        registry: Arc<dyn ResourceRegistry>,
        key: RegistryKey,
        resource: Arc<dyn ScopedResource>,
        policy: ScopePolicy,
    ) -> Self {
        Self {
            state: Arc::new(BindingState::new(registry, key, resource, policy)),
        }
    }

    /// Start hook: reset the timeout/error flags and bind the resource.
    pub fn bind_resource(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        self.state.bind(ctx)
    }

    /// Post-dispatch hook: unbind the key; the resource stays open.
    pub fn unbind_resource(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        self.state.unbind(ctx)
    }

    /// Timeout hook: record that the async operation timed out.
    pub fn record_timeout(&self) {
        self.state.mark_timeout();
    }

    /// Error hook: record that the async operation errored.
    pub fn record_error(&self) {
        self.state.mark_error();
    }

    /// Completion hook: close the resource iff a timeout or error was
    /// recorded since the last bind.
    pub fn complete(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        self.state.complete(ctx)
    }

    /// This interceptor as a deferred-task protocol participant.
    pub fn task_surface<T>(&self) -> TaskScopeInterceptor<T> {
        TaskScopeInterceptor {
            state: self.state.clone(),
            _result: PhantomData,
        }
    }

    /// This interceptor as a deferred-result protocol participant.
    pub fn deferred_surface<T>(&self) -> DeferredScopeInterceptor<T> {
        DeferredScopeInterceptor {
            state: self.state.clone(),
            _result: PhantomData,
        }
    }
}

/// Deferred-task protocol surface over a [`ScopeInterceptor`].
pub struct TaskScopeInterceptor<T> {
    state: Arc<BindingState>,
    _result: PhantomData<fn() -> T>,
}

impl<T> TaskProcessingInterceptor<T> for TaskScopeInterceptor<T> {
    fn pre_process(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        self.state.bind(ctx)
    }

    fn post_process(&self, ctx: &RequestContext, _result: Option<&T>) -> Result<(), ScopeError> {
        self.state.unbind(ctx)
    }

    fn handle_timeout(&self, _ctx: &RequestContext) -> HandleResult<T> {
        self.state.mark_timeout();
        HandleResult::NotHandled
    }

    fn handle_error(&self, _ctx: &RequestContext, _error: &BoxError) -> HandleResult<T> {
        self.state.mark_error();
        HandleResult::NotHandled
    }

    fn after_completion(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        self.state.complete(ctx)
    }
}

/// Deferred-result protocol surface over a [`ScopeInterceptor`].
pub struct DeferredScopeInterceptor<T> {
    state: Arc<BindingState>,
    _result: PhantomData<fn() -> T>,
}

impl<T> DeferredProcessingInterceptor<T> for DeferredScopeInterceptor<T> {
    fn pre_process(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        self.state.bind(ctx)
    }

    fn post_process(&self, ctx: &RequestContext, _result: Option<&T>) -> Result<(), ScopeError> {
        self.state.unbind(ctx)
    }

    fn handle_timeout(&self, _ctx: &RequestContext) -> bool {
        self.state.mark_timeout();
        true
    }

    fn handle_error(&self, _ctx: &RequestContext, _error: &BoxError) -> bool {
        self.state.mark_error();
        true
    }

    fn after_completion(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        self.state.complete(ctx)
    }
}
