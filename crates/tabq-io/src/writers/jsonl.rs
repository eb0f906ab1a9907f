//! NDJSON writer.

use std::io::{BufWriter, Write};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};
use tabq_core::prelude::{Row, Schema, Table};

pub struct JsonlWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> JsonlWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Write each row as one JSON object per line, keys in column order.
    /// Values stay strings.
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        for row in table.rows() {
            let line = serde_json::to_string(&Record {
                schema: table.schema(),
                row,
            })?;
            writeln!(self.writer, "{}", line)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

struct Record<'a> {
    schema: &'a Schema,
    row: &'a Row,
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.schema.len()))?;
        for (name, cell) in self.schema.columns.iter().zip(self.row.cells()) {
            map.serialize_entry(name, cell.as_str())?;
        }
        map.end()
    }
}
