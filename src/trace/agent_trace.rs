//! The decorator that reports hooks to a monitoring [`Agent`].

use super::label::{
    HookKind, authorized_label, field_label, resolve_type_label, transaction_name,
};
use super::{Layer, Phase, Trace};
use crate::agent::{Agent, trace_execution_scoped};
use crate::config::TracerConfig;
use crate::query::{Query, SET_TRANSACTION_NAME};
use crate::tracing_compat::{debug, trace};
use crate::types::{FieldDef, TypeDef};
use serde_json::Value;
use std::sync::Arc;

/// Returns true if a segment should be opened for `field`.
///
/// Fields returning a scalar or enum (through any list/non-null wrapping)
/// follow their own trace flag, or `trace_scalars` when the flag is unset.
/// Every other field is traced.
#[must_use]
pub fn traces_field(field: &FieldDef, trace_scalars: bool) -> bool {
    if field.ty().named_type().kind().is_leaf() {
        field.trace().unwrap_or(trace_scalars)
    } else {
        true
    }
}

/// Wraps each hook of the inner trace in an agent segment.
///
/// Labels for fields, authorization, and type resolution are memoized in
/// the query's context, so repeated visits within one request share one
/// allocation. Results and errors of the wrapped work are returned
/// untouched; segments close on return and on unwind.
#[derive(Debug, Clone)]
pub struct AgentTrace<A, T> {
    agent: A,
    config: TracerConfig,
    inner: T,
}

impl<A, T> AgentTrace<A, T> {
    /// Decorates `inner`, reporting to `agent`.
    #[must_use]
    pub fn new(agent: A, config: TracerConfig, inner: T) -> Self {
        Self {
            agent,
            config,
            inner,
        }
    }

    /// Returns the agent.
    #[must_use]
    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Returns the adapter configuration.
    #[must_use]
    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Returns the next trace in the chain.
    #[must_use]
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consumes the decorator, returning the next trace in the chain.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Returns true if executing `query` should name the transaction.
    ///
    /// The context's `set_transaction_name` value wins when it is `true`;
    /// a missing key or `null` defers to the adapter default; any other
    /// value, `false` included, suppresses naming.
    #[must_use]
    pub fn names_transaction(&self, query: &Query) -> bool {
        match query.context().get(SET_TRANSACTION_NAME) {
            Some(Value::Bool(true)) => true,
            None | Some(Value::Null) => self.config.set_transaction_name,
            Some(_) => false,
        }
    }

    /// Returns the segment label for `field`, or `None` if the field is not
    /// traced.
    #[must_use]
    pub fn field_segment_label(&self, query: &Query, field: &Arc<FieldDef>) -> Option<Arc<str>> {
        if !traces_field(field, self.config.trace_scalars) {
            return None;
        }
        Some(cached_label(query, field, HookKind::Field, |field| {
            field_label(field.owner(), field)
        }))
    }

    /// Returns the authorization segment label for `ty`.
    #[must_use]
    pub fn authorized_segment_label(&self, query: &Query, ty: &Arc<TypeDef>) -> Arc<str> {
        cached_label(query, ty, HookKind::Authorized, authorized_label)
    }

    /// Returns the type-resolution segment label for `ty`.
    #[must_use]
    pub fn resolve_type_segment_label(&self, query: &Query, ty: &Arc<TypeDef>) -> Arc<str> {
        cached_label(query, ty, HookKind::ResolveType, resolve_type_label)
    }
}

fn cached_label<E>(
    query: &Query,
    entity: &Arc<E>,
    kind: HookKind,
    make_label: impl FnOnce(&E) -> String,
) -> Arc<str>
where
    E: Send + Sync + 'static,
{
    query
        .context()
        .label_cache()
        .get_or_insert_with(entity, kind, |entity| {
            let label = make_label(entity);
            trace!(label = %label, kind = ?kind, "segment label cached");
            label
        })
}

impl<A: Agent, T: Trace> Trace for AgentTrace<A, T> {
    fn phase<R>(&self, phase: Phase, f: impl FnOnce() -> R) -> R {
        trace_execution_scoped(&self.agent, phase.label(), || self.inner.phase(phase, f))
    }

    fn execute_query<R>(&self, query: &Query, f: impl FnOnce() -> R) -> R {
        if self.names_transaction(query) {
            let name = transaction_name(query);
            debug!(transaction = %name, "naming transaction");
            self.agent.set_transaction_name(&name);
        }
        trace_execution_scoped(&self.agent, Phase::ExecuteQuery.label(), || {
            self.inner.execute_query(query, f)
        })
    }

    fn execute_field<R>(&self, query: &Query, field: &Arc<FieldDef>, f: impl FnOnce() -> R) -> R {
        match self.field_segment_label(query, field) {
            Some(label) => trace_execution_scoped(&self.agent, &label, || {
                self.inner.execute_field(query, field, f)
            }),
            None => self.inner.execute_field(query, field, f),
        }
    }

    fn execute_field_lazy<R>(
        &self,
        query: &Query,
        field: &Arc<FieldDef>,
        f: impl FnOnce() -> R,
    ) -> R {
        match self.field_segment_label(query, field) {
            Some(label) => trace_execution_scoped(&self.agent, &label, || {
                self.inner.execute_field_lazy(query, field, f)
            }),
            None => self.inner.execute_field_lazy(query, field, f),
        }
    }

    fn authorized<R>(&self, query: &Query, ty: &Arc<TypeDef>, f: impl FnOnce() -> R) -> R {
        let label = self.authorized_segment_label(query, ty);
        trace_execution_scoped(&self.agent, &label, || self.inner.authorized(query, ty, f))
    }

    fn authorized_lazy<R>(&self, query: &Query, ty: &Arc<TypeDef>, f: impl FnOnce() -> R) -> R {
        let label = self.authorized_segment_label(query, ty);
        trace_execution_scoped(&self.agent, &label, || {
            self.inner.authorized_lazy(query, ty, f)
        })
    }

    fn resolve_type<R>(&self, query: &Query, ty: &Arc<TypeDef>, f: impl FnOnce() -> R) -> R {
        let label = self.resolve_type_segment_label(query, ty);
        trace_execution_scoped(&self.agent, &label, || self.inner.resolve_type(query, ty, f))
    }

    fn resolve_type_lazy<R>(
        &self,
        query: &Query,
        ty: &Arc<TypeDef>,
        f: impl FnOnce() -> R,
    ) -> R {
        let label = self.resolve_type_segment_label(query, ty);
        trace_execution_scoped(&self.agent, &label, || {
            self.inner.resolve_type_lazy(query, ty, f)
        })
    }
}

/// Layer producing [`AgentTrace`] decorators that share one agent.
#[derive(Debug, Clone)]
pub struct AgentTraceLayer<A> {
    agent: A,
    config: TracerConfig,
}

impl<A> AgentTraceLayer<A> {
    /// Creates the layer.
    #[must_use]
    pub fn new(agent: A, config: TracerConfig) -> Self {
        Self { agent, config }
    }
}

impl<A: Clone, T> Layer<T> for AgentTraceLayer<A> {
    type Trace = AgentTrace<A, T>;

    fn layer(&self, inner: T) -> Self::Trace {
        AgentTrace::new(self.agent.clone(), self.config.clone(), inner)
    }
}
