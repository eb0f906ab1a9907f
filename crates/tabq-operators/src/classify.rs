//! Column type classification.

use tabq_core::prelude::{Cell, DataType, Table};

use crate::traits::OpError;

/// True when every row's value in `column` parses as a number.
///
/// An empty table is numeric for any column name. On a non-empty table a
/// column missing from the schema is not numeric. Parse failures only
/// influence the answer; they are never reported as errors.
pub fn is_numeric_column(table: &Table, column: &str) -> bool {
    match table.column_index(column) {
        Some(idx) => table
            .column_cells(idx)
            .all(|cell| cell.is_some_and(Cell::is_numeric)),
        None => table.is_empty(),
    }
}

/// Values of column `idx`, top to bottom, coerced numeric-or-fail. The first
/// cell that does not parse makes `column` a `NonNumericColumn`.
pub(crate) fn column_numbers(
    table: &Table,
    idx: usize,
    column: &str,
) -> Result<Vec<f64>, OpError> {
    table
        .column_cells(idx)
        .map(|cell| {
            cell.ok_or_else(|| OpError::ColumnNotFound(column.to_string()))?
                .to_number()
                .map_err(|_| OpError::NonNumericColumn(column.to_string()))
        })
        .collect()
}

pub fn classify_column(table: &Table, column: &str) -> DataType {
    if is_numeric_column(table, column) {
        DataType::Numeric
    } else {
        DataType::Text
    }
}
