//! CSV loader: first record is the header, every following record a row.
//!
//! Records must have as many fields as the header; ragged input is an error
//! rather than being padded.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tabq_core::prelude::{Row, Schema, Table};

use crate::error::{Error, Result};

pub struct CsvReader<R: Read> {
    inner: csv::Reader<R>,
}

impl CsvReader<File> {
    pub fn from_path(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::from(e).at(path.display().to_string()))?;
        Ok(Self::from_reader(file, delimiter))
    }

    /// Load a whole file into a `Table`.
    pub fn read_path(path: impl AsRef<Path>, delimiter: u8) -> Result<Table> {
        let path = path.as_ref();
        Self::from_path(path, delimiter)?
            .read_table()
            .map_err(|e| e.at(path.display().to_string()))
    }
}

impl<R: Read> CsvReader<R> {
    pub fn from_reader(reader: R, delimiter: u8) -> Self {
        let inner = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(reader);
        Self { inner }
    }

    /// Consume the input and build a table of raw text cells.
    pub fn read_table(&mut self) -> Result<Table> {
        let header: Vec<String> = self.inner.headers()?.iter().map(String::from).collect();
        let schema = Schema::new(header)?;

        let mut rows = Vec::new();
        for record in self.inner.records() {
            let record = record?;
            rows.push(record.iter().collect::<Row>());
        }

        Ok(Table::new(schema, rows)?)
    }
}
