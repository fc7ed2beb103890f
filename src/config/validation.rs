//! Semantic configuration checks.

use std::fmt;

use super::schema::ScopeConfig;

/// A semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate constraints serde cannot express.
pub fn validate_config(config: &ScopeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs",
            message: "deadline must be at least one second".into(),
        });
    }

    if !config.policy.close_on_timeout && !config.policy.close_on_error {
        tracing::warn!(
            "close_on_timeout and close_on_error are both disabled; \
             abnormal completions will leave resources open"
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
