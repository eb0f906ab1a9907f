#![forbid(unsafe_code)]
//! tabq-operators: the query core (classify/filter/sort/aggregate).
//!
//! Design intent:
//! - Pure and synchronous. Every operator takes a `&Table` and returns a new one.
//! - Condition strings are parsed into closed enums (`condition`) before any
//!   row is looked at; evaluation switches on those enums.
//! - Failures are typed (`OpError`) and never printed here.

pub mod aggregate;
pub mod classify;
pub mod condition;
pub mod filter;
pub mod sort;
pub mod traits;

pub use aggregate::{aggregate, Aggregate};
pub use classify::{classify_column, is_numeric_column};
pub use condition::{
    AggregateCondition, AggregateOp, FilterCondition, FilterOp, SortCondition, SortDirection,
};
pub use filter::{filter, Filter};
pub use sort::{sort, Sort};
pub use traits::{ErrorKind, OpError, Operator};
