//! Renderers for result tables.

pub mod csv;
pub mod grid;
pub mod jsonl;

use tabq_core::prelude::{OutputFormat, Table};

use crate::error::Result;

/// Render `table` as text in the requested format.
///
/// `delimiter` only applies to CSV output.
pub fn render(table: &Table, format: OutputFormat, delimiter: u8) -> Result<String> {
    match format {
        OutputFormat::Grid => Ok(grid::render_grid(table)),
        OutputFormat::Csv => {
            let mut w = self::csv::CsvWriter::to_writer(Vec::new(), delimiter);
            w.write_table(table)?;
            Ok(String::from_utf8_lossy(&w.into_inner()?).into_owned())
        }
        OutputFormat::Jsonl => {
            let mut w = self::jsonl::JsonlWriter::to_writer(Vec::new());
            w.write_table(table)?;
            Ok(String::from_utf8_lossy(&w.into_inner()?).into_owned())
        }
    }
}
