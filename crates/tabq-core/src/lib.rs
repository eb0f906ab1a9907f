#![forbid(unsafe_code)]
//! tabq-core: cells, rows, tables and configuration shared by every tabq crate.
//!
//! Values stay as the text they were loaded from. A numeric reading is attempted
//! once per cell and callers pick the coercion they need explicitly.

pub mod config;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
