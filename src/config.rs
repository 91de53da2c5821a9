//! Adapter configuration.
//!
//! [`TracerConfig`] can be built in code, deserialized with serde, parsed
//! from TOML (`config-file` feature), or assembled from `key=value` pairs
//! such as those found in the process environment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix for environment variables read by [`TracerConfig::from_env`].
pub const ENV_PREFIX: &str = "QUERYTRACE_";

/// Errors produced while loading a [`TracerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML input was malformed or contained unknown fields.
    #[cfg(feature = "config-file")]
    #[error("invalid tracer config: {0}")]
    Toml(#[from] toml::de::Error),
    /// A pair named a setting that does not exist.
    #[error("unknown tracer setting `{0}`")]
    UnknownKey(String),
    /// A boolean setting had an unrecognized value.
    #[error("invalid boolean for `{key}`: `{value}`")]
    InvalidBool {
        /// Setting name.
        key: String,
        /// Rejected value.
        value: String,
    },
    /// A pair was missing its `=` separator.
    #[error("expected `key=value`, got `{0}`")]
    MalformedPair(String),
}

/// Settings for the agent-reporting adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TracerConfig {
    /// Name the agent's transaction after the executed operation, unless the
    /// request context overrides it.
    pub set_transaction_name: bool,
    /// Trace scalar and enum fields that carry no trace flag of their own.
    pub trace_scalars: bool,
}

impl TracerConfig {
    /// Sets the default for transaction naming.
    #[must_use]
    pub const fn with_set_transaction_name(mut self, enabled: bool) -> Self {
        self.set_transaction_name = enabled;
        self
    }

    /// Sets the default for leaf-field tracing.
    #[must_use]
    pub const fn with_trace_scalars(mut self, enabled: bool) -> Self {
        self.trace_scalars = enabled;
        self
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed input or unknown keys.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Builds a config from `key=value` strings, starting from defaults.
    ///
    /// Keys are matched case-insensitively after trimming. Booleans accept
    /// `true/false`, `1/0`, `yes/no` and `on/off`. Later pairs win.
    ///
    /// # Errors
    ///
    /// Fails on a pair without `=`, an unknown key, or a bad boolean.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        for pair in pairs {
            let pair = pair.as_ref();
            let Some((key, value)) = pair.split_once('=') else {
                return Err(ConfigError::MalformedPair(pair.to_owned()));
            };
            config.set(key, value)?;
        }
        Ok(config)
    }

    /// Reads `QUERYTRACE_SET_TRANSACTION_NAME` and `QUERYTRACE_TRACE_SCALARS`.
    ///
    /// Unset variables keep their defaults; other `QUERYTRACE_` variables are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Fails if a recognized variable holds an invalid boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Like [`from_env`](Self::from_env), over an explicit variable list.
    ///
    /// # Errors
    ///
    /// Fails if a recognized variable holds an invalid boolean.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (name, value) in vars {
            let Some(key) = name.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match config.set(key, value.as_ref()) {
                Err(ConfigError::UnknownKey(_)) => {}
                other => other?,
            }
        }
        Ok(config)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key = key.trim().to_ascii_lowercase();
        let slot = match key.as_str() {
            "set_transaction_name" => &mut self.set_transaction_name,
            "trace_scalars" => &mut self.trace_scalars,
            _ => return Err(ConfigError::UnknownKey(key)),
        };
        *slot = parse_bool(value).ok_or_else(|| ConfigError::InvalidBool {
            key,
            value: value.to_owned(),
        })?;
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
