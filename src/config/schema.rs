//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for request-scoped resource binding.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ScopeConfig {
    /// Closure policy for abnormal completions.
    pub policy: ScopePolicy,

    /// Deadline configuration for deferred request processing.
    pub timeouts: TimeoutConfig,
}

/// Controls which abnormal outcomes close the bound resource.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScopePolicy {
    /// Close the resource when the async operation timed out.
    pub close_on_timeout: bool,

    /// Close the resource when the async operation errored.
    pub close_on_error: bool,
}

impl Default for ScopePolicy {
    fn default() -> Self {
        Self {
            close_on_timeout: true,
            close_on_error: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for deferred request processing, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

impl TimeoutConfig {
    /// The deadline as a [`Duration`].
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}
