#![forbid(unsafe_code)]
//! tabq-planner: from flags or a YAML query file to an ordered list of steps.
//!
//! A query is at most one filter, one sort and one aggregate, always run in
//! that order. Condition strings are carried verbatim; the exec crate turns
//! them into operators.

pub mod dsl;
pub mod logical;

pub use dsl::yaml::{parse_yaml_query, ParsedQuery, QueryConfig, QueryFile};
pub use logical::{QueryPlan, Step, StepKind};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid query file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Config(#[from] tabq_core::Error),
}
