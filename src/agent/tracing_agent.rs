//! Agent backed by the `tracing` crate.

use super::{Agent, Segment};

/// Reports each segment as an entered `tracing` span.
///
/// Spans are named `segment` and carry the label in both `label` and
/// `otel.name`, so an OpenTelemetry bridge exports them under the label.
/// Transaction names are emitted as an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAgent;

impl TracingAgent {
    /// Creates the agent.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Agent for TracingAgent {
    fn set_transaction_name(&self, name: &str) {
        tracing::info!(target: "querytrace::agent", transaction = name, "transaction named");
    }

    fn start_segment(&self, label: &str) -> Segment {
        let entered = tracing::info_span!(
            target: "querytrace::segment",
            "segment",
            label = label,
            otel.name = label
        )
        .entered();
        Segment::new(move || drop(entered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::trace_execution_scoped;

    #[test]
    fn segments_pass_results_through() {
        let agent = TracingAgent::new();
        agent.set_transaction_name("GraphQL/query.anonymous");
        let out = trace_execution_scoped(&agent, "GraphQL/validate", || 3 + 4);
        assert_eq!(out, 7);
    }
}
