//! In-process metrics for segment timings.
//!
//! Used by [`RecordingAgent`](crate::agent::RecordingAgent) to aggregate
//! per-label call counts and latency distributions without an external
//! monitoring backend.

pub mod metrics;

pub use metrics::{Counter, Histogram, SegmentMetrics, SegmentStats};
