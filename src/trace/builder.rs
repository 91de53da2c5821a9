//! Builder for composing trace decorators.

use super::{AgentTraceLayer, Identity, Layer, Passthrough, Stack};
use crate::config::TracerConfig;

/// Composes layers into a trace chain.
///
/// The first layer added is the outermost: it sees every hook first and
/// brackets everything added after it.
#[derive(Debug, Clone)]
pub struct TraceBuilder<L> {
    layer: L,
}

impl TraceBuilder<Identity> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { layer: Identity }
    }
}

impl Default for TraceBuilder<Identity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> TraceBuilder<L> {
    /// Adds a layer beneath the ones already added.
    #[must_use]
    pub fn layer<N>(self, layer: N) -> TraceBuilder<Stack<N, L>> {
        TraceBuilder {
            layer: Stack::new(layer, self.layer),
        }
    }

    /// Adds an agent-reporting layer.
    #[must_use]
    pub fn agent<A: Clone>(
        self,
        agent: A,
        config: TracerConfig,
    ) -> TraceBuilder<Stack<AgentTraceLayer<A>, L>> {
        self.layer(AgentTraceLayer::new(agent, config))
    }

    /// Wraps `inner` with every layer added so far.
    pub fn trace<T>(&self, inner: T) -> L::Trace
    where
        L: Layer<T>,
    {
        self.layer.layer(inner)
    }

    /// Builds the chain on top of [`Passthrough`].
    pub fn build(&self) -> L::Trace
    where
        L: Layer<Passthrough>,
    {
        self.trace(Passthrough)
    }

    /// Returns the composed layer.
    #[must_use]
    pub fn into_inner(self) -> L {
        self.layer
    }
}
