//! Metric recording helpers.
//!
//! # Metrics
//! - `scope_bindings_total` (counter): resources bound for async processing
//! - `scope_timeouts_total` (counter): timeout events recorded
//! - `scope_errors_total` (counter): error events recorded
//! - `scope_abnormal_closures_total` (counter): resources closed after a
//!   timeout/error, labeled by reason

use metrics::counter;

/// Record a resource bound for async processing.
pub fn record_binding() {
    counter!("scope_bindings_total").increment(1);
}

/// Record a timeout event observed by an interceptor.
pub fn record_timeout() {
    counter!("scope_timeouts_total").increment(1);
}

/// Record an error event observed by an interceptor.
pub fn record_error() {
    counter!("scope_errors_total").increment(1);
}

/// Record a resource closed after an abnormal completion.
pub fn record_abnormal_close(reason: &'static str) {
    counter!("scope_abnormal_closures_total", "reason" => reason).increment(1);
}
