//! Text-first value model: `Cell`, `Row`, `Table`.
//!
//! A `Cell` keeps the raw text it was loaded from together with the result of a
//! single numeric parse attempt. Nothing else about types is remembered between
//! operators; a column is numeric only if every cell in it parses.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::Schema;

/// Parse `s` the way cells are parsed: surrounding whitespace is ignored, the
/// rest must be a float literal accepted by `f64::from_str`.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Cell {
    raw: String,
    number: Option<f64>,
}

impl Cell {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let number = parse_number(&raw);
        Self { raw, number }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_numeric(&self) -> bool {
        self.number.is_some()
    }

    /// Numeric reading, if the raw text parsed.
    pub fn as_number(&self) -> Option<f64> {
        self.number
    }

    /// Numeric-or-fail coercion.
    pub fn to_number(&self) -> Result<f64> {
        self.number
            .ok_or_else(|| Error::NotNumeric(self.raw.clone()))
    }

    /// Numeric-or-text coercion used for ordering.
    pub fn sort_key(&self) -> SortKey<'_> {
        match self.number {
            Some(n) => SortKey::Number(n),
            None => SortKey::Text(&self.raw),
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Cell {}

impl From<String> for Cell {
    fn from(raw: String) -> Self {
        Cell::new(raw)
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        Cell::new(raw)
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        cell.raw
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Per-row ordering key.
///
/// Numbers compare by IEEE total order and text byte-wise. When a column mixes
/// both, every number sorts before every string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey<'a> {
    Number(f64),
    Text(&'a str),
}

impl Eq for SortKey<'_> {}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        use SortKey::*;
        match (self, other) {
            (Number(a), Number(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Number(_), Text(_)) => Ordering::Less,
            (Text(_), Number(_)) => Ordering::Greater,
        }
    }
}

/// One record. Cells are positional against the owning table's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Cell> {
        self.cells.get(idx)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row::new(iter.into_iter().map(Cell::new).collect())
    }
}

/// An ordered sequence of rows sharing one schema.
///
/// Operators never mutate a table; they build a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, checking every row has one cell per schema column.
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != schema.len())
        {
            return Err(Error::Schema(format!(
                "row {} has {} values, expected {}",
                i,
                row.len(),
                schema.len()
            )));
        }
        Ok(Self { schema, rows })
    }

    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Convenience constructor from string records.
    pub fn from_records<C, R, S>(columns: C, records: R) -> Result<Self>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let schema = Schema::new(columns.into_iter().map(Into::into).collect())?;
        let rows = records
            .into_iter()
            .map(|r| r.into_iter().collect::<Row>())
            .collect();
        Table::new(schema, rows)
    }

    /// One-row, one-column table.
    pub fn single(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            schema: Schema {
                columns: vec![column.into()],
            },
            rows: vec![Row::new(vec![Cell::new(value)])],
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    /// Iterate the cells of column `idx`, top to bottom.
    pub fn column_cells(&self, idx: usize) -> impl Iterator<Item = Option<&Cell>> + '_ {
        self.rows.iter().map(move |r| r.get(idx))
    }

    /// New table holding the rows for which `keep` returns true, in order.
    pub fn retain_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&Row) -> bool,
    {
        Table {
            schema: self.schema.clone(),
            rows: self.rows.iter().filter(|r| keep(*r)).cloned().collect(),
        }
    }

    /// New table with rows taken in the order given by `indices`.
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        Table {
            schema: self.schema.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }
}
