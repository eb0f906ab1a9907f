//! Sort operator: stable single-key ordering.
//!
//! Keys are derived per row: a number when the cell parses, the raw text
//! otherwise. A column holding both kinds therefore sorts every numeric row
//! ahead of every text row (see `SortKey`).

use tabq_core::prelude::{Cell, Schema, SortKey, Table};

use crate::condition::{SortCondition, SortDirection};
use crate::traits::{require_column, OpError, Operator};

#[derive(Debug, Clone)]
pub struct Sort {
    pub condition: SortCondition,
}

impl Sort {
    pub fn new(condition: SortCondition) -> Self {
        Self { condition }
    }

    pub fn parse(text: &str) -> Result<Self, OpError> {
        Ok(Self::new(text.parse()?))
    }
}

impl Operator for Sort {
    fn name(&self) -> &'static str {
        "sort"
    }

    fn plan(&self, input: &Schema) -> Result<Schema, OpError> {
        require_column(input, &self.condition.column)?;
        Ok(input.clone())
    }

    fn eval(&self, input: &Table) -> Result<Table, OpError> {
        let idx = require_column(input.schema(), &self.condition.column)?;

        let keys: Vec<SortKey<'_>> = input
            .column_cells(idx)
            .map(|cell| cell.map_or(SortKey::Text(""), Cell::sort_key))
            .collect();

        // `sort_by` is stable; reversing the comparison (instead of the output)
        // keeps ties in input order for descending sorts too.
        let mut order: Vec<usize> = (0..keys.len()).collect();
        match self.condition.direction {
            SortDirection::Ascending => order.sort_by(|&a, &b| keys[a].cmp(&keys[b])),
            SortDirection::Descending => order.sort_by(|&a, &b| keys[b].cmp(&keys[a])),
        }

        Ok(input.take_rows(&order))
    }
}

/// Parse `condition` and sort `table` by it.
pub fn sort(table: &Table, condition: &str) -> Result<Table, OpError> {
    Sort::parse(condition)?.eval(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(table: &Table, name: &str) -> Vec<String> {
        let idx = table.column_index(name).unwrap();
        table
            .column_cells(idx)
            .map(|c| c.unwrap().as_str().to_string())
            .collect()
    }

    fn prices() -> Table {
        Table::from_records(
            ["name", "price"],
            vec![
                vec!["iphone", "999"],
                vec!["galaxy", "1199"],
                vec!["redmi", "199"],
                vec!["poco", "299"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_sort_numeric_ascending() {
        let out = sort(&prices(), "price=asc").unwrap();
        assert_eq!(values(&out, "price"), vec!["199", "299", "999", "1199"]);
    }

    #[test]
    fn test_sort_numeric_descending() {
        let out = sort(&prices(), "price=desc").unwrap();
        assert_eq!(values(&out, "price"), vec!["1199", "999", "299", "199"]);
    }

    #[test]
    fn test_sort_text() {
        let out = sort(&prices(), "name=asc").unwrap();
        assert_eq!(values(&out, "name"), vec!["galaxy", "iphone", "poco", "redmi"]);
    }

    #[test]
    fn test_unknown_direction_sorts_ascending() {
        let out = sort(&prices(), "price=descending").unwrap();
        assert_eq!(values(&out, "price"), vec!["199", "299", "999", "1199"]);
    }

    #[test]
    fn test_sort_is_stable_both_ways() {
        let table = Table::from_records(
            ["id", "group"],
            vec![
                vec!["a", "2"],
                vec!["b", "1"],
                vec!["c", "2"],
                vec!["d", "1"],
                vec!["e", "2"],
            ],
        )
        .unwrap();

        let asc = sort(&table, "group=asc").unwrap();
        assert_eq!(values(&asc, "id"), vec!["b", "d", "a", "c", "e"]);

        let desc = sort(&table, "group=desc").unwrap();
        assert_eq!(values(&desc, "id"), vec!["a", "c", "e", "b", "d"]);
    }

    #[test]
    fn test_mixed_column_puts_numbers_first() {
        let table = Table::from_records(
            ["v"],
            vec![vec!["beta"], vec!["10"], vec!["alpha"], vec!["9"]],
        )
        .unwrap();
        let out = sort(&table, "v=asc").unwrap();
        assert_eq!(values(&out, "v"), vec!["9", "10", "alpha", "beta"]);
    }

    #[test]
    fn test_sort_leaves_input_unchanged() {
        let table = prices();
        let _ = sort(&table, "price=asc").unwrap();
        assert_eq!(values(&table, "price"), vec!["999", "1199", "199", "299"]);
    }

    #[test]
    fn test_sort_unknown_column() {
        assert!(matches!(
            sort(&prices(), "weight=asc"),
            Err(OpError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_sort_empty_table() {
        let empty = Table::from_records(["price"], Vec::<Vec<&str>>::new()).unwrap();
        assert!(sort(&empty, "price=desc").unwrap().is_empty());
    }
}
