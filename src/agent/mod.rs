//! Monitoring agent seam.
//!
//! An [`Agent`] is the external monitoring system the adapter reports to.
//! It exposes exactly two capabilities: naming the current transaction and
//! opening a timed segment. Segments are RAII guards: dropping a
//! [`Segment`] closes it, so a segment wrapping a delegate closes on
//! normal return, on an `Err` result, and during unwinding alike.
//!
//! # Agents
//!
//! - [`RecordingAgent`]: in-memory event log plus per-label latency stats
//! - [`NoopAgent`]: discards everything
//! - [`TracingAgent`]: one `tracing` span per segment (requires `tracing-integration`)
//! - [`OtelAgent`]: OpenTelemetry histogram per label (requires `metrics`)
//!
//! Agents are infallible at this interface. An agent whose backend can fail
//! is expected to fail loudly inside its own implementation; the adapter
//! does not mask or recover from agent failures.

mod recording;

#[cfg(feature = "metrics")]
mod otel;
#[cfg(feature = "tracing-integration")]
mod tracing_agent;

pub use recording::{AgentEvent, RecordingAgent};

#[cfg(feature = "metrics")]
pub use otel::OtelAgent;
#[cfg(feature = "tracing-integration")]
pub use tracing_agent::TracingAgent;

use std::fmt;
use std::sync::Arc;

/// A monitoring agent that receives transaction names and timed segments.
pub trait Agent: Send + Sync {
    /// Names the transaction the current request is reported under.
    fn set_transaction_name(&self, name: &str);

    /// Opens a segment labelled `label`. The segment closes when the
    /// returned guard is dropped or finished.
    fn start_segment(&self, label: &str) -> Segment;
}

impl<A: Agent + ?Sized> Agent for &A {
    fn set_transaction_name(&self, name: &str) {
        (**self).set_transaction_name(name);
    }

    fn start_segment(&self, label: &str) -> Segment {
        (**self).start_segment(label)
    }
}

impl<A: Agent + ?Sized> Agent for Arc<A> {
    fn set_transaction_name(&self, name: &str) {
        (**self).set_transaction_name(name);
    }

    fn start_segment(&self, label: &str) -> Segment {
        (**self).start_segment(label)
    }
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn set_transaction_name(&self, name: &str) {
        (**self).set_transaction_name(name);
    }

    fn start_segment(&self, label: &str) -> Segment {
        (**self).start_segment(label)
    }
}

/// Agent-side completion hook for an open segment.
pub trait SegmentHandle {
    /// Closes the segment. Called exactly once.
    fn finish(self: Box<Self>);
}

impl<F: FnOnce()> SegmentHandle for F {
    fn finish(self: Box<Self>) {
        (*self)();
    }
}

/// Guard for an open segment.
#[must_use = "a segment closes as soon as it is dropped"]
pub struct Segment {
    handle: Option<Box<dyn SegmentHandle>>,
}

impl Segment {
    /// Wraps an agent's completion hook.
    pub fn new(handle: impl SegmentHandle + 'static) -> Self {
        Self {
            handle: Some(Box::new(handle)),
        }
    }

    /// A segment that records nothing.
    pub const fn noop() -> Self {
        Self { handle: None }
    }

    /// Returns true until the segment has been closed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Closes the segment now.
    pub fn finish(mut self) {
        self.close();
    }

    fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.finish();
        }
    }
}

impl Drop for Segment {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("open", &self.is_open())
            .finish()
    }
}

/// Runs `f` inside a segment labelled `label` and returns its result
/// unchanged.
pub fn trace_execution_scoped<A, R>(agent: &A, label: &str, f: impl FnOnce() -> R) -> R
where
    A: Agent + ?Sized,
{
    let _segment = agent.start_segment(label);
    f()
}

/// An agent that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAgent;

impl Agent for NoopAgent {
    fn set_transaction_name(&self, _name: &str) {}

    fn start_segment(&self, _label: &str) -> Segment {
        Segment::noop()
    }
}
