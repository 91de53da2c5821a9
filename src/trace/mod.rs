//! Pipeline trace hooks and the agent-reporting decorator.
//!
//! The execution pipeline calls into a [`Trace`] at fixed lifecycle points,
//! handing each hook the work it is about to do as a closure. A trace
//! decorates that work and must call it exactly once, returning its result
//! unchanged. Traces compose explicitly: a decorator owns the next trace in
//! the chain and forwards every hook to it, with [`Passthrough`] at the
//! bottom running the pipeline's closure directly.
//!
//! ```text
//! pipeline ──► AgentTrace ──► (decorators) ──► Passthrough ──► closure
//!                 │
//!                 └── label (cached per request) ──► Agent::start_segment
//! ```
//!
//! # Example
//!
//! ```
//! use querytrace::agent::RecordingAgent;
//! use querytrace::trace::{Phase, Trace, TraceBuilder};
//! use querytrace::TracerConfig;
//!
//! let agent = RecordingAgent::new();
//! let trace = TraceBuilder::new()
//!     .agent(agent.clone(), TracerConfig::default())
//!     .build();
//!
//! let tokens = trace.phase(Phase::Lex, || vec!["{", "posts", "}"]);
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(agent.finished_labels(), vec!["GraphQL/lex"]);
//! ```

mod agent_trace;
mod builder;
mod label;
mod layer;
mod phase;

pub use agent_trace::{AgentTrace, AgentTraceLayer, traces_field};
pub use builder::TraceBuilder;
pub use label::{
    HookKind, LabelCache, NAMESPACE, authorized_label, field_label, resolve_type_label,
    transaction_name,
};
pub use layer::{Identity, Layer, Stack};
pub use phase::{PHASE_LABELS, Phase};

use crate::query::Query;
use crate::types::{FieldDef, TypeDef};
use std::sync::Arc;

/// Lifecycle hooks invoked by the execution pipeline.
///
/// Every hook receives the pipeline's own work as `f` and must invoke it
/// exactly once, returning its result as-is. Results are generic, so a
/// pipeline's `Result<T, E>` passes through as an ordinary value.
///
/// The `_lazy` variants fire when the pipeline resolves deferred values
/// after its initial traversal.
pub trait Trace {
    /// A coarse stage with a static label.
    fn phase<R>(&self, phase: Phase, f: impl FnOnce() -> R) -> R;

    /// Execution of one query, including transaction naming.
    fn execute_query<R>(&self, query: &Query, f: impl FnOnce() -> R) -> R;

    /// Resolution of one field.
    fn execute_field<R>(&self, query: &Query, field: &Arc<FieldDef>, f: impl FnOnce() -> R) -> R;

    /// Deferred resolution of one field.
    fn execute_field_lazy<R>(
        &self,
        query: &Query,
        field: &Arc<FieldDef>,
        f: impl FnOnce() -> R,
    ) -> R;

    /// Authorization check for an object type.
    fn authorized<R>(&self, query: &Query, ty: &Arc<TypeDef>, f: impl FnOnce() -> R) -> R;

    /// Deferred authorization check for an object type.
    fn authorized_lazy<R>(&self, query: &Query, ty: &Arc<TypeDef>, f: impl FnOnce() -> R) -> R;

    /// Resolution of an abstract type to a concrete object type.
    fn resolve_type<R>(&self, query: &Query, ty: &Arc<TypeDef>, f: impl FnOnce() -> R) -> R;

    /// Deferred resolution of an abstract type.
    fn resolve_type_lazy<R>(&self, query: &Query, ty: &Arc<TypeDef>, f: impl FnOnce() -> R)
    -> R;
}

/// The undecorated pipeline: every hook runs its closure directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Trace for Passthrough {
    fn phase<R>(&self, _phase: Phase, f: impl FnOnce() -> R) -> R {
        f()
    }

    fn execute_query<R>(&self, _query: &Query, f: impl FnOnce() -> R) -> R {
        f()
    }

    fn execute_field<R>(&self, _query: &Query, _field: &Arc<FieldDef>, f: impl FnOnce() -> R) -> R {
        f()
    }

    fn execute_field_lazy<R>(
        &self,
        _query: &Query,
        _field: &Arc<FieldDef>,
        f: impl FnOnce() -> R,
    ) -> R {
        f()
    }

    fn authorized<R>(&self, _query: &Query, _ty: &Arc<TypeDef>, f: impl FnOnce() -> R) -> R {
        f()
    }

    fn authorized_lazy<R>(&self, _query: &Query, _ty: &Arc<TypeDef>, f: impl FnOnce() -> R) -> R {
        f()
    }

    fn resolve_type<R>(&self, _query: &Query, _ty: &Arc<TypeDef>, f: impl FnOnce() -> R) -> R {
        f()
    }

    fn resolve_type_lazy<R>(
        &self,
        _query: &Query,
        _ty: &Arc<TypeDef>,
        f: impl FnOnce() -> R,
    ) -> R {
        f()
    }
}

macro_rules! forward_trace {
    ($($ptr:ty),* $(,)?) => {$(
        impl<T: Trace + ?Sized> Trace for $ptr {
            fn phase<R>(&self, phase: Phase, f: impl FnOnce() -> R) -> R {
                (**self).phase(phase, f)
            }

            fn execute_query<R>(&self, query: &Query, f: impl FnOnce() -> R) -> R {
                (**self).execute_query(query, f)
            }

            fn execute_field<R>(
                &self,
                query: &Query,
                field: &Arc<FieldDef>,
                f: impl FnOnce() -> R,
            ) -> R {
                (**self).execute_field(query, field, f)
            }

            fn execute_field_lazy<R>(
                &self,
                query: &Query,
                field: &Arc<FieldDef>,
                f: impl FnOnce() -> R,
            ) -> R {
                (**self).execute_field_lazy(query, field, f)
            }

            fn authorized<R>(&self, query: &Query, ty: &Arc<TypeDef>, f: impl FnOnce() -> R) -> R {
                (**self).authorized(query, ty, f)
            }

            fn authorized_lazy<R>(
                &self,
                query: &Query,
                ty: &Arc<TypeDef>,
                f: impl FnOnce() -> R,
            ) -> R {
                (**self).authorized_lazy(query, ty, f)
            }

            fn resolve_type<R>(
                &self,
                query: &Query,
                ty: &Arc<TypeDef>,
                f: impl FnOnce() -> R,
            ) -> R {
                (**self).resolve_type(query, ty, f)
            }

            fn resolve_type_lazy<R>(
                &self,
                query: &Query,
                ty: &Arc<TypeDef>,
                f: impl FnOnce() -> R,
            ) -> R {
                (**self).resolve_type_lazy(query, ty, f)
            }
        }
    )*};
}

forward_trace!(&T, Arc<T>, Box<T>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeDef;

    #[test]
    fn passthrough_runs_each_closure_once() {
        let query = Query::new();
        let post = Arc::new(TypeDef::object("Post"));
        let field = Arc::new(FieldDef::new(
            Arc::clone(&post),
            "title",
            Arc::new(TypeDef::scalar("String")),
        ));
        let trace = Passthrough;
        let mut calls = 0;

        trace.phase(Phase::Parse, || calls += 1);
        trace.execute_query(&query, || calls += 1);
        trace.execute_field(&query, &field, || calls += 1);
        trace.execute_field_lazy(&query, &field, || calls += 1);
        trace.authorized(&query, &post, || calls += 1);
        trace.authorized_lazy(&query, &post, || calls += 1);
        trace.resolve_type(&query, &post, || calls += 1);
        trace.resolve_type_lazy(&query, &post, || calls += 1);

        assert_eq!(calls, 8);
    }

    #[test]
    fn forwarding_through_pointers() {
        let boxed: Box<Passthrough> = Box::new(Passthrough);
        let shared = Arc::new(Passthrough);
        assert_eq!(boxed.phase(Phase::Lex, || 1), 1);
        assert_eq!(shared.phase(Phase::Lex, || 2), 2);
    }
}
