//! Operator trait + common interfaces.
//!
//! The exec runtime calls `plan(...)` to check a step against the input schema
//! and learn its output columns, then `eval(...)` once per query.

use tabq_core::prelude::{Schema, Table};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("unsupported operator in condition '{condition}': use one of =, >, <")]
    FilterSyntax { condition: String },

    #[error("malformed {kind} condition '{condition}': expected 'column=value' with a single '='")]
    ConditionSyntax {
        kind: &'static str,
        condition: String,
    },

    #[error("no data to aggregate")]
    EmptyData,

    #[error("column '{0}' is not numeric")]
    NonNumericColumn(String),

    #[error("cannot compare column '{column}' with non-numeric value '{operand}'")]
    InvalidOperand { column: String, operand: String },

    #[error("unsupported aggregate '{operation}': use one of avg, min, max")]
    UnsupportedAggregate { operation: String },

    #[error("column '{0}' not found")]
    ColumnNotFound(String),
}

/// Coarse classes of `OpError`, all caused by user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    EmptyData,
    TypeMismatch,
    UnsupportedOperation,
    MissingColumn,
}

impl OpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OpError::FilterSyntax { .. } | OpError::ConditionSyntax { .. } => ErrorKind::Syntax,
            OpError::EmptyData => ErrorKind::EmptyData,
            OpError::NonNumericColumn(_) | OpError::InvalidOperand { .. } => {
                ErrorKind::TypeMismatch
            }
            OpError::UnsupportedAggregate { .. } => ErrorKind::UnsupportedOperation,
            OpError::ColumnNotFound(_) => ErrorKind::MissingColumn,
        }
    }
}

/// Trait that all operators implement.
///
/// Invariants:
/// - `eval` never mutates its input and is deterministic for the same input.
/// - `plan` only looks at column names, never at data.
pub trait Operator: Send + Sync {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    /// Validate against the input schema and return the output schema.
    fn plan(&self, input: &Schema) -> Result<Schema, OpError>;

    /// Run the operator over a whole table.
    fn eval(&self, input: &Table) -> Result<Table, OpError>;
}

/// Look up `column` in `schema`, mapping absence to `ColumnNotFound`.
pub(crate) fn require_column(schema: &Schema, column: &str) -> Result<usize, OpError> {
    schema
        .index_of(column)
        .ok_or_else(|| OpError::ColumnNotFound(column.to_string()))
}
