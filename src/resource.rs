//! Scoped resource collaborator traits.
//!
//! # Responsibilities
//! - Opaque handle to the per-request resource (e.g. a database session)
//! - Disposal (`close`) and diagnosability (`is_open`)
//! - Factory seam the web filter uses to open one resource per request

use std::sync::Arc;

use crate::error::{BoxError, ScopeError};
use crate::registry::RegistryKey;

/// A resource whose usefulness is scoped to one logical request.
///
/// The interceptor never owns the resource; it shares the handle with the
/// caller that constructed it and only ever calls [`close`] on abnormal
/// completion. Whether repeated closes are tolerated is the resource's own
/// concern.
///
/// [`close`]: ScopedResource::close
pub trait ScopedResource: Send + Sync {
    /// Dispose of the resource.
    ///
    /// Failures propagate unchanged to whoever invoked the completion
    /// hook.
    fn close(&self) -> Result<(), BoxError>;

    /// Whether the resource is still usable.
    fn is_open(&self) -> bool;
}

/// Opens one scoped resource per request.
///
/// Consumed by the web filter; embedders driving the interceptor directly
/// construct resources however they like.
pub trait ResourceFactory: Send + Sync {
    /// Open a fresh resource for the current request.
    fn open(&self) -> Result<Arc<dyn ScopedResource>, ScopeError>;

    /// Base key resources from this factory are bound under.
    fn registry_key(&self) -> RegistryKey;
}
