//! Delimited text writer.

use std::io::Write;

use tabq_core::prelude::{Cell, Table};

use crate::error::{Error, Result};

pub struct CsvWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    pub fn to_writer(writer: W, delimiter: u8) -> Self {
        let inner = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);
        Self { inner }
    }

    /// Header line, then one record per row.
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        self.inner.write_record(&table.schema().columns)?;
        for row in table.rows() {
            self.inner.write_record(row.cells().iter().map(Cell::as_str))?;
        }
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}
