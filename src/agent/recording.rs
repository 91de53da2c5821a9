//! In-memory agent that records every call.

use super::{Agent, Segment};
use crate::observability::SegmentMetrics;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One call observed by a [`RecordingAgent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentEvent {
    /// A segment was opened.
    SegmentStarted {
        /// Segment label.
        label: String,
    },
    /// A segment was closed.
    SegmentFinished {
        /// Segment label.
        label: String,
        /// Wall time between open and close.
        elapsed: Duration,
    },
    /// The transaction was named.
    TransactionNamed {
        /// Transaction name.
        name: String,
    },
}

#[derive(Debug, Default)]
struct RecordingState {
    events: Vec<AgentEvent>,
    metrics: SegmentMetrics,
}

/// Agent that keeps an ordered log of calls and per-label timing stats.
///
/// Cloning shares the underlying log, so a clone can be handed to the
/// adapter while the original is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingAgent {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingAgent {
    /// Creates an agent with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded event, in call order.
    #[must_use]
    pub fn events(&self) -> Vec<AgentEvent> {
        self.state.lock().events.clone()
    }

    /// Returns the labels of opened segments, in open order.
    #[must_use]
    pub fn started_labels(&self) -> Vec<String> {
        self.state
            .lock()
            .events
            .iter()
            .filter_map(|event| match event {
                AgentEvent::SegmentStarted { label } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the labels of closed segments, in close order.
    #[must_use]
    pub fn finished_labels(&self) -> Vec<String> {
        self.state
            .lock()
            .events
            .iter()
            .filter_map(|event| match event {
                AgentEvent::SegmentFinished { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns every transaction name set, in call order.
    #[must_use]
    pub fn transaction_names(&self) -> Vec<String> {
        self.state
            .lock()
            .events
            .iter()
            .filter_map(|event| match event {
                AgentEvent::TransactionNamed { name } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the number of segments opened but not yet closed.
    #[must_use]
    pub fn open_segments(&self) -> usize {
        let state = self.state.lock();
        let mut open = 0usize;
        for event in &state.events {
            match event {
                AgentEvent::SegmentStarted { .. } => open += 1,
                AgentEvent::SegmentFinished { .. } => open = open.saturating_sub(1),
                AgentEvent::TransactionNamed { .. } => {}
            }
        }
        open
    }

    /// Returns a snapshot of the per-label timing stats.
    #[must_use]
    pub fn metrics(&self) -> SegmentMetrics {
        self.state.lock().metrics.clone()
    }

    /// Clears the log and the stats.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.events.clear();
        state.metrics.reset();
    }
}

impl Agent for RecordingAgent {
    fn set_transaction_name(&self, name: &str) {
        self.state.lock().events.push(AgentEvent::TransactionNamed {
            name: name.to_owned(),
        });
    }

    fn start_segment(&self, label: &str) -> Segment {
        self.state.lock().events.push(AgentEvent::SegmentStarted {
            label: label.to_owned(),
        });

        let state = Arc::clone(&self.state);
        let label = label.to_owned();
        let started = Instant::now();
        Segment::new(move || {
            let elapsed = started.elapsed();
            let mut state = state.lock();
            state.metrics.record(&label, elapsed);
            state
                .events
                .push(AgentEvent::SegmentFinished { label, elapsed });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_nested_segments_in_order() {
        let agent = RecordingAgent::new();
        let outer = agent.start_segment("GraphQL/execute");
        let inner = agent.start_segment("GraphQL/Query/posts");
        assert_eq!(agent.open_segments(), 2);
        drop(inner);
        drop(outer);

        assert_eq!(
            agent.started_labels(),
            vec!["GraphQL/execute", "GraphQL/Query/posts"]
        );
        assert_eq!(
            agent.finished_labels(),
            vec!["GraphQL/Query/posts", "GraphQL/execute"]
        );
        assert_eq!(agent.open_segments(), 0);
    }

    #[test]
    fn records_transaction_names() {
        let agent = RecordingAgent::new();
        agent.set_transaction_name("GraphQL/query.GetPost");
        assert_eq!(
            agent.events(),
            vec![AgentEvent::TransactionNamed {
                name: "GraphQL/query.GetPost".to_owned()
            }]
        );
    }

    #[test]
    fn clones_share_the_log() {
        let agent = RecordingAgent::new();
        let handle = agent.clone();
        handle.start_segment("GraphQL/lex").finish();

        assert_eq!(agent.finished_labels(), vec!["GraphQL/lex"]);
        let metrics = agent.metrics();
        assert_eq!(metrics.get("GraphQL/lex").map(|s| s.calls()), Some(1));

        agent.clear();
        assert!(handle.events().is_empty());
        assert!(handle.metrics().is_empty());
    }
}
