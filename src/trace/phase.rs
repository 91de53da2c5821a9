//! Pipeline phases and their static segment labels.

use crate::error::Error;
use core::fmt;
use core::str::FromStr;

/// A coarse stage of query processing with a fixed segment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Phase {
    /// Tokenizing the query string.
    Lex,
    /// Building the document AST.
    Parse,
    /// Static validation against the schema.
    Validate,
    /// Query analyzers run for one query.
    AnalyzeQuery,
    /// Query analyzers run across a multiplex.
    AnalyzeMultiplex,
    /// Executing every query of a multiplex.
    ExecuteMultiplex,
    /// Executing one query.
    ExecuteQuery,
    /// Resolving the deferred values of one query.
    ExecuteQueryLazy,
}

/// Phase name and segment label, indexed by `Phase as usize`.
pub const PHASE_LABELS: [(Phase, &str, &str); 8] = [
    (Phase::Lex, "lex", "GraphQL/lex"),
    (Phase::Parse, "parse", "GraphQL/parse"),
    (Phase::Validate, "validate", "GraphQL/validate"),
    (Phase::AnalyzeQuery, "analyze_query", "GraphQL/analyze"),
    (Phase::AnalyzeMultiplex, "analyze_multiplex", "GraphQL/analyze"),
    (Phase::ExecuteMultiplex, "execute_multiplex", "GraphQL/execute"),
    (Phase::ExecuteQuery, "execute_query", "GraphQL/execute"),
    (Phase::ExecuteQueryLazy, "execute_query_lazy", "GraphQL/execute"),
];

impl Phase {
    /// Every phase, in pipeline order.
    pub const ALL: [Self; 8] = [
        Self::Lex,
        Self::Parse,
        Self::Validate,
        Self::AnalyzeQuery,
        Self::AnalyzeMultiplex,
        Self::ExecuteMultiplex,
        Self::ExecuteQuery,
        Self::ExecuteQueryLazy,
    ];

    /// Returns the segment label reported for this phase.
    #[must_use]
    pub const fn label(self) -> &'static str {
        PHASE_LABELS[self as usize].2
    }

    /// Returns the hook name of this phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        PHASE_LABELS[self as usize].1
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PHASE_LABELS
            .iter()
            .find(|(_, name, _)| *name == s)
            .map(|(phase, _, _)| *phase)
            .ok_or_else(|| Error::UnknownPhase(s.to_owned()))
    }
}
