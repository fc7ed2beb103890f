//! Observability.
//!
//! # Design Decisions
//! - Structured tracing events carry the request id for correlation
//! - Counters go through the `metrics` facade; the embedder installs a
//!   recorder/exporter
//! - Metric updates are cheap (atomic increments in the recorder)

pub mod metrics;
