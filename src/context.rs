//! Per-request correlation context handed to the lifecycle hooks.

use std::fmt;

use uuid::Uuid;

/// Unique identifier of one logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a fresh request id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Context the host dispatch framework passes to every hook invocation.
///
/// Hooks only use it for correlation; the request itself stays with the
/// host.
#[derive(Debug, Clone)]
pub struct RequestContext {
    id: RequestId,
}

impl RequestContext {
    /// Create a context with a fresh request id.
    pub fn new() -> Self {
        Self {
            id: RequestId::new(),
        }
    }

    /// Create a context for an already-assigned request id.
    pub fn with_id(id: RequestId) -> Self {
        Self { id }
    }

    /// The request this context belongs to.
    pub fn id(&self) -> RequestId {
        self.id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
