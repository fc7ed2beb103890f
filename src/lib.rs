//! Request-scoped resource binding across asynchronous request boundaries.
//!
//! Keeps a per-request resource (canonically a database session) bound to
//! a shared registry while request processing is deferred across async
//! execution boundaries, and guarantees the resource is closed exactly
//! when the deferred work ends in a timeout or error. Normal completions
//! leave the resource's lifecycle with the original caller.

// Core subsystems
pub mod config;
pub mod interceptor;
pub mod registry;
pub mod resource;

// Cross-cutting concerns
pub mod context;
pub mod error;
pub mod observability;
pub mod web;

pub use config::{ScopeConfig, ScopePolicy, TimeoutConfig};
pub use context::{RequestContext, RequestId};
pub use error::{BoxError, ScopeError};
pub use interceptor::{InterceptorChain, ScopeInterceptor};
pub use registry::{LocalRegistry, RegistryKey, ResourceRegistry};
pub use resource::{ResourceFactory, ScopedResource};
pub use web::ScopeLayer;
