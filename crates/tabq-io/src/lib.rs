#![forbid(unsafe_code)]
//! tabq-io: the loader (CSV → `Table`) and the renderers (`Table` → text).
//!
//! Values are loaded as raw text; no coercion happens here.

pub mod error;
pub mod readers;
pub mod writers;

pub use error::{Error, Result};
pub use readers::csv::CsvReader;
pub use writers::render;
