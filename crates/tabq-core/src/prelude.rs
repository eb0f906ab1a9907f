//! Convenient re-exports for downstream crates.

pub use crate::config::{EngineConfig, OutputFormat};
pub use crate::error::{Error, Result};
pub use crate::schema::{DataType, Schema};
pub use crate::types::{Cell, Row, SortKey, Table};
