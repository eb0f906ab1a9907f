//! Condition mini-grammars for `--where`, `--order-by` and `--aggregate`.
//!
//! Filter: `column OP operand` with OP one of `=`, `>`, `<` (no spaces are
//! trimmed; surrounding `"` are stripped from the operand).
//! Sort: `column=asc|desc`.
//! Aggregate: `column=avg|min|max`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::traits::OpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    Equals,
    GreaterThan,
    LessThan,
}

/// Scan order for filter operators. The first one present in the condition
/// text decides how it is split.
pub const FILTER_OPERATORS: [FilterOp; 3] =
    [FilterOp::Equals, FilterOp::GreaterThan, FilterOp::LessThan];

impl FilterOp {
    pub fn token(self) -> char {
        match self {
            FilterOp::Equals => '=',
            FilterOp::GreaterThan => '>',
            FilterOp::LessThan => '<',
        }
    }

    fn is_token(c: char) -> bool {
        FILTER_OPERATORS.iter().any(|op| op.token() == c)
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub column: String,
    pub op: FilterOp,
    pub operand: String,
}

impl FromStr for FilterCondition {
    type Err = OpError;

    /// The chosen operator must occur exactly once, and the column part may not
    /// contain any operator character. That rejects `>=`, `<=`, `==` and `<>`.
    /// The operand may contain the other operator characters (`name="a>b"`).
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let syntax = || OpError::FilterSyntax {
            condition: text.to_string(),
        };

        let (op, column, operand) = FILTER_OPERATORS
            .iter()
            .find_map(|&op| {
                text.split_once(op.token())
                    .map(|(column, operand)| (op, column, operand))
            })
            .ok_or_else(syntax)?;

        if column.contains(FilterOp::is_token) || operand.contains(op.token()) {
            return Err(syntax());
        }

        Ok(FilterCondition {
            column: column.to_string(),
            op,
            operand: operand.trim_matches('"').to_string(),
        })
    }
}

impl std::fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} \"{}\"", self.column, self.op, self.operand)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Only the literal `desc` sorts descending; any other text is ascending.
    pub fn from_text(s: &str) -> Self {
        if s == "desc" {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCondition {
    pub column: String,
    pub direction: SortDirection,
}

impl FromStr for SortCondition {
    type Err = OpError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (column, direction) = split_assignment("order-by", text)?;
        Ok(SortCondition {
            column: column.to_string(),
            direction: SortDirection::from_text(direction),
        })
    }
}

impl std::fmt::Display for SortCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.column, self.direction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateOp {
    Average,
    Min,
    Max,
}

pub const AGGREGATE_OPS: [AggregateOp; 3] =
    [AggregateOp::Average, AggregateOp::Min, AggregateOp::Max];

impl AggregateOp {
    /// Name used in conditions and as the result column.
    pub fn name(self) -> &'static str {
        match self {
            AggregateOp::Average => "avg",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
        }
    }

    /// Apply to a non-empty slice of values. A NaN anywhere in `values`
    /// makes the result NaN for every operation.
    pub fn apply(self, values: &[f64]) -> f64 {
        if values.iter().any(|v| v.is_nan()) {
            return f64::NAN;
        }
        match self {
            AggregateOp::Average => values.iter().sum::<f64>() / values.len() as f64,
            AggregateOp::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            AggregateOp::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl FromStr for AggregateOp {
    type Err = OpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AGGREGATE_OPS
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| OpError::UnsupportedAggregate {
                operation: s.to_string(),
            })
    }
}

/// Parsed aggregate condition.
///
/// The operation is kept as written: whether it is supported is only checked
/// after the data preconditions (non-empty, numeric column) hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCondition {
    pub column: String,
    pub operation: String,
}

impl AggregateCondition {
    pub fn op(&self) -> Result<AggregateOp, OpError> {
        self.operation.parse()
    }
}

impl FromStr for AggregateCondition {
    type Err = OpError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (column, operation) = split_assignment("aggregate", text)?;
        Ok(AggregateCondition {
            column: column.to_string(),
            operation: operation.to_string(),
        })
    }
}

impl std::fmt::Display for AggregateCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.operation, self.column)
    }
}

/// Split `column=value` on its only `=`.
fn split_assignment<'a>(kind: &'static str, text: &'a str) -> Result<(&'a str, &'a str), OpError> {
    match text.split_once('=') {
        Some((left, right)) if !right.contains('=') => Ok((left, right)),
        _ => Err(OpError::ConditionSyntax {
            kind,
            condition: text.to_string(),
        }),
    }
}
