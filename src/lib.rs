//! querytrace: segment timing for GraphQL execution pipelines.
//!
//! # Overview
//!
//! An execution engine calls a [`Trace`] at fixed points of its pipeline:
//! lexing, parsing, validation, analysis, execution, and per-field,
//! per-authorization and per-type-resolution work. [`AgentTrace`] wraps each
//! of those calls in a timed segment and reports it to an [`Agent`], leaving
//! the pipeline's inputs, results and errors untouched.
//!
//! Labels follow a fixed scheme (`GraphQL/parse`, `GraphQL/Post/title`,
//! `GraphQL/Authorize/Post`, ...) and the dynamic ones are computed once per
//! request, then served from a cache living in the request's
//! [`QueryContext`].
//!
//! # Module Structure
//!
//! - [`trace`](mod@trace): The `Trace` hooks, phase table, labels, and the agent decorator
//! - [`agent`]: The `Agent` interface, segment guards, and bundled agents
//! - [`query`]: Request and operation descriptors, and the request context
//! - [`types`]: Schema type and field descriptors
//! - [`config`]: Adapter configuration and loaders
//! - [`observability`]: Per-label counters and latency histograms
//! - [`error`](mod@error): Error types
//!
//! # Features
//!
//! - `tracing-integration` (default): internal logging through `tracing`, and
//!   the [`agent::TracingAgent`]
//! - `metrics`: the OpenTelemetry-backed `agent::OtelAgent`
//! - `config-file`: TOML loading for [`TracerConfig`]

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::doc_markdown)]

pub mod agent;
pub mod config;
pub mod error;
pub mod observability;
pub mod query;
pub mod trace;
mod tracing_compat;
pub mod types;

pub use agent::{Agent, NoopAgent, RecordingAgent, Segment, trace_execution_scoped};
pub use config::{ConfigError, TracerConfig};
pub use error::{Error, Result};
pub use query::{OperationDef, OperationType, Query, QueryContext};
pub use trace::{AgentTrace, AgentTraceLayer, Passthrough, Phase, Trace, TraceBuilder};
pub use types::{FieldDef, TypeDef, TypeKind, TypeRef};
