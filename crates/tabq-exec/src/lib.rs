#![forbid(unsafe_code)]
//! tabq-exec: run a `QueryPlan` against a loaded table.
//!
//! The engine parses every condition before touching data, then threads the
//! table through filter → sort → aggregate. Each stage gets a fresh table.

pub mod explain;
pub mod metrics;
pub mod runtime;

pub use explain::explain;
pub use metrics::StageStats;
pub use runtime::{Engine, ExecError, PreparedStep, QueryOutput};
