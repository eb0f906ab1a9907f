//! Filter operator: single-predicate row selection.
//!
//! `=` compares raw text. `>` and `<` compare numbers and only ever match on a
//! numeric column; on a text column they select nothing rather than failing.

use tabq_core::prelude::{Schema, Table};
use tabq_core::types::parse_number;

use crate::classify::{column_numbers, is_numeric_column};
use crate::condition::{FilterCondition, FilterOp};
use crate::traits::{require_column, OpError, Operator};

#[derive(Debug, Clone)]
pub struct Filter {
    pub condition: FilterCondition,
}

impl Filter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    pub fn parse(text: &str) -> Result<Self, OpError> {
        Ok(Self::new(text.parse()?))
    }
}

impl Operator for Filter {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn plan(&self, input: &Schema) -> Result<Schema, OpError> {
        require_column(input, &self.condition.column)?;
        Ok(input.clone())
    }

    fn eval(&self, input: &Table) -> Result<Table, OpError> {
        let FilterCondition {
            column,
            op,
            operand,
        } = &self.condition;
        let idx = require_column(input.schema(), column)?;

        let op = *op;
        let threshold = match op {
            FilterOp::Equals => {
                return Ok(input.retain_rows(|row| {
                    row.get(idx).is_some_and(|cell| cell.as_str() == operand)
                }));
            }
            FilterOp::GreaterThan | FilterOp::LessThan => {
                if input.is_empty() || !is_numeric_column(input, column) {
                    return Ok(Table::empty(input.schema().clone()));
                }
                parse_number(operand).ok_or_else(|| OpError::InvalidOperand {
                    column: column.clone(),
                    operand: operand.clone(),
                })?
            }
        };

        let keep: Vec<usize> = column_numbers(input, idx, column)?
            .into_iter()
            .enumerate()
            .filter(|&(_, v)| match op {
                FilterOp::GreaterThan => v > threshold,
                _ => v < threshold,
            })
            .map(|(i, _)| i)
            .collect();
        Ok(input.take_rows(&keep))
    }
}

/// Parse `condition` and apply it to `table`.
pub fn filter(table: &Table, condition: &str) -> Result<Table, OpError> {
    Filter::parse(condition)?.eval(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ErrorKind;

    fn phones() -> Table {
        Table::from_records(
            ["name", "brand", "price", "rating"],
            vec![
                vec!["iphone 15 pro", "apple", "999", "4.9"],
                vec!["galaxy s23 ultra", "samsung", "1199", "4.8"],
                vec!["redmi note 12", "xiaomi", "199", "4.6"],
                vec!["poco x5 pro", "xiaomi", "299", "4.4"],
            ],
        )
        .unwrap()
    }

    fn column(table: &Table, name: &str) -> Vec<String> {
        let idx = table.column_index(name).unwrap();
        table
            .column_cells(idx)
            .map(|c| c.unwrap().as_str().to_string())
            .collect()
    }

    #[test]
    fn test_equals_on_text_column() {
        let out = filter(&phones(), "brand=xiaomi").unwrap();
        assert_eq!(column(&out, "name"), vec!["redmi note 12", "poco x5 pro"]);
    }

    #[test]
    fn test_equals_is_textual_on_numeric_column() {
        let table = Table::from_records(["p"], vec![vec!["999"], vec!["199"]]).unwrap();
        let out = filter(&table, "p=999").unwrap();
        assert_eq!(column(&out, "p"), vec!["999"]);

        // "999.0" is the same number but not the same text.
        let none = filter(&table, "p=999.0").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_equals_with_quoted_operand() {
        let out = filter(&phones(), "name=\"poco x5 pro\"").unwrap();
        assert_eq!(column(&out, "price"), vec!["299"]);
    }

    #[test]
    fn test_greater_than_numeric() {
        let out = filter(&phones(), "price>500").unwrap();
        assert_eq!(column(&out, "price"), vec!["999", "1199"]);
    }

    #[test]
    fn test_less_than_numeric() {
        let out = filter(&phones(), "rating<4.7").unwrap();
        assert_eq!(column(&out, "brand"), vec!["xiaomi", "xiaomi"]);
    }

    #[test]
    fn test_comparison_is_strict() {
        let out = filter(&phones(), "price>1199").unwrap();
        assert!(out.is_empty());
        let out = filter(&phones(), "price<199").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_comparison_on_text_column_selects_nothing() {
        let brands = Table::from_records(["b"], vec![vec!["apple"], vec!["sony"]]).unwrap();
        let out = filter(&brands, "b>apple").unwrap();
        assert!(out.is_empty());
        assert_eq!(out.schema(), brands.schema());
    }

    #[test]
    fn test_comparison_with_text_operand_on_numeric_column_fails() {
        let err = filter(&phones(), "price>cheap").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_unsupported_operator_fails() {
        let err = filter(&phones(), "price>=500").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_unknown_column_fails() {
        let err = filter(&phones(), "weight>100").unwrap_err();
        assert!(matches!(err, OpError::ColumnNotFound(ref c) if c == "weight"));
    }

    #[test]
    fn test_filter_does_not_touch_input() {
        let table = phones();
        let _ = filter(&table, "brand=apple").unwrap();
        assert_eq!(table.num_rows(), 4);
    }

    #[test]
    fn test_plan_checks_column() {
        let f = Filter::parse("price>1").unwrap();
        assert_eq!(f.plan(phones().schema()).unwrap(), *phones().schema());
        let missing = Filter::parse("weight>1").unwrap();
        assert!(missing.plan(phones().schema()).is_err());
    }
}
