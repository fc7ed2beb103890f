//! Error types for scope binding and teardown.

use thiserror::Error;

use crate::registry::RegistryKey;

/// Boxed error produced by an opaque scoped resource.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced while binding, unbinding, or closing a scoped resource.
///
/// Nothing here is generated by the interceptor itself; every variant
/// surfaces a collaborator failure unchanged.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// A resource is already bound under this key.
    #[error("a resource is already bound under key `{0}`")]
    AlreadyBound(RegistryKey),

    /// No resource is bound under this key.
    #[error("no resource is bound under key `{0}`")]
    NotBound(RegistryKey),

    /// The underlying resource failed to open or close.
    #[error("scoped resource failure: {0}")]
    Resource(#[source] BoxError),
}
