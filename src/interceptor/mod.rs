//! Async request lifecycle interception.
//!
//! # Data Flow
//! ```text
//! host dispatch framework
//!     → pre_process            bind resource into registry, clear flags
//!     → post_process           unbind key (resource stays open)
//!     → handle_timeout/error   record the fact, defer teardown
//!     → after_completion       close resource iff timeout/error recorded
//! ```
//!
//! # Design Decisions
//! - One internal state machine backs everything; [`ScopeInterceptor`]
//!   exposes it through both callback protocol shapes
//! - Hooks never block and raise nothing of their own; collaborator
//!   failures propagate unchanged
//! - Timeout/error hooks return a non-exclusive "not handled" signal so
//!   later interceptors in a chain still see the event

pub mod chain;
pub mod protocol;
pub mod scope;

pub(crate) mod state;

pub use chain::InterceptorChain;
pub use protocol::{DeferredProcessingInterceptor, HandleResult, TaskProcessingInterceptor};
pub use scope::{DeferredScopeInterceptor, ScopeInterceptor, TaskScopeInterceptor};
