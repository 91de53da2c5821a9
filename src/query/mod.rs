//! The query view exposed to trace hooks.
//!
//! A [`Query`] bundles the operation the pipeline selected for execution
//! with the per-request [`QueryContext`]. The adapter never inspects the
//! document itself; operation type and name are all it needs for
//! transaction naming.

pub mod context;

pub use context::{FALLBACK_TRANSACTION_NAME, QueryContext, SET_TRANSACTION_NAME};

use core::fmt;

/// The root operation type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// A read-only fetch.
    #[default]
    Query,
    /// A write followed by a fetch.
    Mutation,
    /// A long-lived request that yields events.
    Subscription,
}

impl OperationType {
    /// Returns the keyword used in documents for this operation type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation selected for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDef {
    operation_type: OperationType,
    name: Option<String>,
}

impl OperationDef {
    /// Creates an anonymous operation.
    #[must_use]
    pub const fn anonymous(operation_type: OperationType) -> Self {
        Self {
            operation_type,
            name: None,
        }
    }

    /// Creates a named operation.
    #[must_use]
    pub fn named(operation_type: OperationType, name: impl Into<String>) -> Self {
        Self {
            operation_type,
            name: Some(name.into()),
        }
    }

    /// Returns the operation type.
    #[must_use]
    pub const fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    /// Returns the operation name, if the document gave one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// One query execution as seen by trace hooks.
#[derive(Debug, Clone, Default)]
pub struct Query {
    operation: Option<OperationDef>,
    context: QueryContext,
}

impl Query {
    /// Creates a query with no selected operation and an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selected operation.
    #[must_use]
    pub fn with_operation(mut self, operation: OperationDef) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Replaces the context.
    #[must_use]
    pub fn with_context(mut self, context: QueryContext) -> Self {
        self.context = context;
        self
    }

    /// Returns the selected operation, if the pipeline resolved one.
    #[must_use]
    pub fn selected_operation(&self) -> Option<&OperationDef> {
        self.operation.as_ref()
    }

    /// Returns the request context.
    #[must_use]
    pub fn context(&self) -> &QueryContext {
        &self.context
    }

    /// Returns the request context mutably.
    pub fn context_mut(&mut self) -> &mut QueryContext {
        &mut self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_type_keywords() {
        assert_eq!(OperationType::Query.as_str(), "query");
        assert_eq!(OperationType::Mutation.to_string(), "mutation");
        assert_eq!(OperationType::Subscription.as_str(), "subscription");
        assert_eq!(OperationType::default(), OperationType::Query);
    }

    #[test]
    fn query_builder() {
        let query = Query::new()
            .with_operation(OperationDef::named(OperationType::Mutation, "AddPost"))
            .with_context(QueryContext::new().with_value("k", 1));

        let op = query.selected_operation().expect("operation");
        assert_eq!(op.operation_type(), OperationType::Mutation);
        assert_eq!(op.name(), Some("AddPost"));
        assert!(query.context().get("k").is_some());
    }

    #[test]
    fn anonymous_operation_has_no_name() {
        let op = OperationDef::anonymous(OperationType::Query);
        assert_eq!(op.name(), None);
    }
}
