//! Configuration management.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ScopeConfig (validated, immutable)
//!     → shared by the filter / embedder
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty document is a valid config
//! - Validation separates syntactic (serde) from semantic checks
//! - Defaults close on both timeout and error, the contract embedders get
//!   without any configuration

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ScopeConfig, ScopePolicy, TimeoutConfig};
