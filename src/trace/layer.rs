//! Layering primitives for trace decorators.

/// Factory for a trace decorator.
///
/// A layer holds what a decorator needs (an agent handle, configuration)
/// and builds a fresh decorator around the next trace in the chain. The
/// produced trace must forward every hook to `inner` exactly once, so
/// decorators can be stacked in any order without losing pipeline work.
pub trait Layer<T> {
    /// The decorator wrapping `T`.
    type Trace;

    /// Builds the decorator around `inner`, the next trace in the chain.
    fn layer(&self, inner: T) -> Self::Trace;
}

/// Layer that adds no decorator; the chain stays as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T> Layer<T> for Identity {
    type Trace = T;

    fn layer(&self, inner: T) -> Self::Trace {
        inner
    }
}

/// Two layers composed into one: `inner` wraps the trace first, then
/// `outer` wraps the result.
///
/// Hooks reach the decorator built by `outer` first, so its segments
/// enclose those opened by `inner`.
#[derive(Debug, Clone)]
pub struct Stack<Inner, Outer> {
    inner: Inner,
    outer: Outer,
}

impl<Inner, Outer> Stack<Inner, Outer> {
    /// Composes `inner` beneath `outer`.
    pub fn new(inner: Inner, outer: Outer) -> Self {
        Self { inner, outer }
    }

    /// Returns a reference to the inner layer.
    pub fn inner(&self) -> &Inner {
        &self.inner
    }

    /// Returns a reference to the outer layer.
    pub fn outer(&self) -> &Outer {
        &self.outer
    }
}

impl<T, Inner, Outer> Layer<T> for Stack<Inner, Outer>
where
    Inner: Layer<T>,
    Outer: Layer<Inner::Trace>,
{
    type Trace = Outer::Trace;

    fn layer(&self, trace: T) -> Self::Trace {
        self.outer.layer(self.inner.layer(trace))
    }
}
