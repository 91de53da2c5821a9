//! Agent backed by OpenTelemetry metrics.

use super::{Agent, Segment};
use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram, Meter};
use std::time::Instant;

/// Instrument name for segment durations, in seconds.
pub const SEGMENT_DURATION: &str = "querytrace.segment.duration";
/// Instrument name for transaction naming calls.
pub const TRANSACTIONS_NAMED: &str = "querytrace.transaction.named";

/// Records segment durations into an OpenTelemetry histogram tagged with
/// the segment label, and counts transaction naming per name.
#[derive(Debug, Clone)]
pub struct OtelAgent {
    durations: Histogram<f64>,
    transactions: Counter<u64>,
}

impl OtelAgent {
    /// Builds the agent's instruments on `meter`.
    #[must_use]
    pub fn new(meter: &Meter) -> Self {
        Self {
            durations: meter
                .f64_histogram(SEGMENT_DURATION)
                .with_unit("s")
                .with_description("Time spent inside a traced pipeline segment")
                .build(),
            transactions: meter
                .u64_counter(TRANSACTIONS_NAMED)
                .with_description("Transactions named from the selected operation")
                .build(),
        }
    }
}

impl Agent for OtelAgent {
    fn set_transaction_name(&self, name: &str) {
        self.transactions
            .add(1, &[KeyValue::new("transaction", name.to_owned())]);
    }

    fn start_segment(&self, label: &str) -> Segment {
        let durations = self.durations.clone();
        let label = label.to_owned();
        let started = Instant::now();
        Segment::new(move || {
            durations.record(
                started.elapsed().as_secs_f64(),
                &[KeyValue::new("label", label)],
            );
        })
    }
}
