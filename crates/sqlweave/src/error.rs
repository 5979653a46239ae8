//! Error types for sqlweave

use crate::dialect::Backend;
use std::fmt;
use thiserror::Error;

/// Result type alias for sqlweave operations
pub type QbResult<T> = Result<T, QbError>;

/// A clause of a SELECT statement, used to report which call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    Select,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
}

impl Clause {
    /// The builder method that declares this clause.
    pub fn method(self) -> &'static str {
        match self {
            Clause::Select => "select",
            Clause::From => "from",
            Clause::Where => "where_",
            Clause::GroupBy => "group_by",
            Clause::Having => "having",
            Clause::OrderBy => "order_by",
            Clause::Limit => "limit",
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Clause::Select => "SELECT",
            Clause::From => "FROM",
            Clause::Where => "WHERE",
            Clause::GroupBy => "GROUP BY",
            Clause::Having => "HAVING",
            Clause::OrderBy => "ORDER BY",
            Clause::Limit => "LIMIT",
        };
        f.write_str(s)
    }
}

/// Error types for query building and execution
#[derive(Debug, Error)]
pub enum QbError {
    /// A clause method was called without any argument.
    #[error("{clause} requires at least one argument, .{}() was called with none", .clause.method())]
    EmptyArgument { clause: Clause },

    /// A single-call clause was declared twice before `reset()`.
    #[error("{clause} was already declared; call reset() before declaring it again")]
    DuplicateClause { clause: Clause },

    /// A clause required for rendering was never declared.
    #[error("Missing required clause: {clause}. Add .{}() to your query.", .clause.method())]
    MissingClause { clause: Clause },

    /// A handler was opened without a mandatory parameter.
    #[error("Missing required parameter '{param}' in {context}")]
    MissingRequiredParameter {
        param: &'static str,
        context: &'static str,
    },

    /// Feature not available on a backend (advisory, raised by callers).
    #[error("Feature not supported in {backend:?}: {feature}")]
    UnsupportedFeature { backend: Backend, feature: String },

    /// Structurally invalid clause input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The execution collaborator failed.
    #[error("Execution error: {0}")]
    Execution(String),

    /// Error returned by tokio-postgres.
    #[cfg(feature = "postgres")]
    #[error("Postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),
}

impl QbError {
    /// Create an invalid argument error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Check if this is a duplicate clause error
    pub fn is_duplicate_clause(&self) -> bool {
        matches!(self, Self::DuplicateClause { .. })
    }

    /// Check if this is an empty argument error
    pub fn is_empty_argument(&self) -> bool {
        matches!(self, Self::EmptyArgument { .. })
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// The clause a usage error refers to, if any.
    pub fn clause(&self) -> Option<Clause> {
        match self {
            Self::EmptyArgument { clause }
            | Self::DuplicateClause { clause }
            | Self::MissingClause { clause } => Some(*clause),
            _ => None,
        }
    }
}
