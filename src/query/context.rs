//! Per-request context carried alongside a query.
//!
//! A `QueryContext` is the pipeline's per-request key-value store. The
//! tracing adapter reads two well-known keys from it and parks its label
//! cache in a dedicated slot that is created on first use and dropped with
//! the context.

use crate::trace::LabelCache;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Context key overriding the adapter's transaction-naming default for one
/// request.
///
/// `true` names the transaction, a missing key or JSON `null` defers to the
/// adapter default, and any other value suppresses naming.
pub const SET_TRANSACTION_NAME: &str = "set_transaction_name";

/// Context key holding the transaction name suffix used when the selected
/// operation is anonymous.
pub const FALLBACK_TRANSACTION_NAME: &str = "tracing_fallback_transaction_name";

/// Key-value store scoped to one query execution.
#[derive(Default)]
pub struct QueryContext {
    values: BTreeMap<String, Value>,
    labels: OnceLock<LabelCache>,
}

impl QueryContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Inserts a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Removes a value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Gets a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Gets a string value. Non-string values read as absent.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Returns an iterator over all values.
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the request's label cache, creating it on first use.
    pub fn label_cache(&self) -> &LabelCache {
        self.labels.get_or_init(LabelCache::new)
    }

    /// Returns the label cache only if some hook has already created it.
    #[must_use]
    pub fn existing_label_cache(&self) -> Option<&LabelCache> {
        self.labels.get()
    }
}

/// Cloning copies the values but starts a fresh label cache; a clone
/// is a new request scope.
impl Clone for QueryContext {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            labels: OnceLock::new(),
        }
    }
}

impl fmt::Debug for QueryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryContext")
            .field("values", &self.values)
            .field("cached_labels", &self.labels.get().map_or(0, LabelCache::len))
            .finish()
    }
}
