//! Resource-binding registry.
//!
//! # Data Flow
//! ```text
//! filter / embedder
//!     → registry.bind(key, resource)       (async processing starts)
//!     → handler code: registry.lookup(key) (same logical request)
//!     → registry.unbind(key)               (task handoff complete)
//! ```
//!
//! # Design Decisions
//! - The registry is an explicit collaborator trait, not ambient state, so
//!   tests can supply a fake and embedders can plug in their own store
//! - Keys are cheap to clone and hash; when the backing store is
//!   process-wide, per-request keys are derived with
//!   [`RegistryKey::for_request`]

mod local;

pub use local::LocalRegistry;

use std::fmt;
use std::sync::Arc;

use crate::context::RequestId;
use crate::error::ScopeError;
use crate::resource::ScopedResource;

/// Identifier a resource is bound under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistryKey(Arc<str>);

impl RegistryKey {
    /// Create a key from a logical name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::from(name.into()))
    }

    /// Derive a key unique to one request.
    ///
    /// A process-wide store needs disjoint keys per concurrent request;
    /// a request-local store can bind under the base key directly.
    pub fn for_request(&self, id: &RequestId) -> Self {
        Self(Arc::from(format!("{}/{}", self.0, id)))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegistryKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Key-value store mapping a logical key to the currently-active resource.
///
/// Implementations must be safe for concurrent use across unrelated
/// requests; within one request lifecycle a key has a single writer.
pub trait ResourceRegistry: Send + Sync {
    /// Bind a resource under `key`.
    ///
    /// Errors with [`ScopeError::AlreadyBound`] if the key is occupied.
    fn bind(&self, key: &RegistryKey, resource: Arc<dyn ScopedResource>) -> Result<(), ScopeError>;

    /// Remove and return the binding for `key`.
    ///
    /// Errors with [`ScopeError::NotBound`] if the key is absent.
    fn unbind(&self, key: &RegistryKey) -> Result<Arc<dyn ScopedResource>, ScopeError>;

    /// The current binding for `key`, if any.
    fn lookup(&self, key: &RegistryKey) -> Option<Arc<dyn ScopedResource>>;
}
