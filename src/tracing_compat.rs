//! Logging macros that compile away without the `tracing-integration` feature.
//!
//! Internal code imports `debug!`/`trace!` from here instead of from
//! `tracing` directly, so the crate builds with or without the dependency.

#[cfg(feature = "tracing-integration")]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing-integration"))]
mod noop {
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    pub(crate) use {debug, trace};
}

#[cfg(not(feature = "tracing-integration"))]
pub(crate) use noop::{debug, trace};
