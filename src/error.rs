//! Error types for the crate's configuration and parsing surfaces.
//!
//! The tracing hooks themselves never fail: a pipeline's own errors are
//! returned through them as ordinary values.

use crate::config::ConfigError;
use thiserror::Error;

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    /// Adapter configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A phase name did not match any entry in the phase table.
    #[error("unknown pipeline phase `{0}`")]
    UnknownPhase(String),
}

/// Result alias defaulting to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
