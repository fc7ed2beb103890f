//! Ordered interceptor chains.

use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::{BoxError, ScopeError};

use super::protocol::{DeferredProcessingInterceptor, HandleResult, TaskProcessingInterceptor};

/// Chain of interceptors sharing one request lifecycle.
///
/// Start, post-dispatch, and completion hooks run on every member in
/// registration order; timeout/error events are offered to each member
/// until one resolves the event exclusively.
pub struct InterceptorChain<I: ?Sized> {
    interceptors: Vec<Arc<I>>,
}

impl<I: ?Sized> InterceptorChain<I> {
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    pub fn add(&mut self, interceptor: Arc<I>) {
        self.interceptors.push(interceptor);
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn clear(&mut self) {
        self.interceptors.clear()
    }
}

impl<I: ?Sized> Default for InterceptorChain<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized> Clone for InterceptorChain<I> {
    fn clone(&self) -> Self {
        Self {
            interceptors: self.interceptors.clone(),
        }
    }
}

impl<T: 'static> InterceptorChain<dyn TaskProcessingInterceptor<T>> {
    /// Run the start hook on every member in registration order.
    pub fn pre_process(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        for interceptor in &self.interceptors {
            interceptor.pre_process(ctx)?;
        }
        Ok(())
    }

    /// Run the post-dispatch hook on every member.
    pub fn post_process(&self, ctx: &RequestContext, result: Option<&T>) -> Result<(), ScopeError> {
        for interceptor in &self.interceptors {
            interceptor.post_process(ctx, result)?;
        }
        Ok(())
    }

    /// Offer the timeout to each member until one resolves it.
    pub fn handle_timeout(&self, ctx: &RequestContext) -> HandleResult<T> {
        for interceptor in &self.interceptors {
            if let HandleResult::Resolved(value) = interceptor.handle_timeout(ctx) {
                return HandleResult::Resolved(value);
            }
        }
        HandleResult::NotHandled
    }

    /// Offer the error to each member until one resolves it.
    pub fn handle_error(&self, ctx: &RequestContext, error: &BoxError) -> HandleResult<T> {
        for interceptor in &self.interceptors {
            if let HandleResult::Resolved(value) = interceptor.handle_error(ctx, error) {
                return HandleResult::Resolved(value);
            }
        }
        HandleResult::NotHandled
    }

    /// Run completion on every member; the first failure is reported after
    /// the remaining members have run.
    pub fn after_completion(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        let mut first_failure = None;
        for interceptor in &self.interceptors {
            if let Err(err) = interceptor.after_completion(ctx) {
                first_failure.get_or_insert(err);
            }
        }
        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<T: 'static> InterceptorChain<dyn DeferredProcessingInterceptor<T>> {
    /// Run the start hook on every member in registration order.
    pub fn pre_process(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        for interceptor in &self.interceptors {
            interceptor.pre_process(ctx)?;
        }
        Ok(())
    }

    /// Run the post-dispatch hook on every member.
    pub fn post_process(&self, ctx: &RequestContext, result: Option<&T>) -> Result<(), ScopeError> {
        for interceptor in &self.interceptors {
            interceptor.post_process(ctx, result)?;
        }
        Ok(())
    }

    /// Offer the timeout to each member; returns `false` once a member
    /// handles it exclusively.
    pub fn handle_timeout(&self, ctx: &RequestContext) -> bool {
        for interceptor in &self.interceptors {
            if !interceptor.handle_timeout(ctx) {
                return false;
            }
        }
        true
    }

    /// Offer the error to each member; returns `false` once a member
    /// handles it exclusively.
    pub fn handle_error(&self, ctx: &RequestContext, error: &BoxError) -> bool {
        for interceptor in &self.interceptors {
            if !interceptor.handle_error(ctx, error) {
                return false;
            }
        }
        true
    }

    /// Run completion on every member; the first failure is reported after
    /// the remaining members have run.
    pub fn after_completion(&self, ctx: &RequestContext) -> Result<(), ScopeError> {
        let mut first_failure = None;
        for interceptor in &self.interceptors {
            if let Err(err) = interceptor.after_completion(ctx) {
                first_failure.get_or_insert(err);
            }
        }
        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
