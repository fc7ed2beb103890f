//! Web framework integration.
//!
//! # Data Flow
//! ```text
//! request
//!     → ScopeService::call
//!         factory.open() → ScopeInterceptor → bind
//!         → inner service, under the configured deadline
//!         → unbind (task handoff complete)
//!         → classify: deadline expiry → timeout hook
//!                     5xx response   → error hook
//!         → completion (closes the resource iff a hook fired)
//! ```
//!
//! # Design Decisions
//! - The filter owns interceptor construction; one interceptor per request
//! - Deadline expiry maps to 504 Gateway Timeout
//! - A 5xx from the inner service stands in for the host's error callback,
//!   which has no separate channel in a tower stack
//! - Registry keys are derived per request; the shared map is
//!   process-wide, where a request-local registry could bind the base key

pub mod filter;

pub use filter::{ScopeLayer, ScopeService};
