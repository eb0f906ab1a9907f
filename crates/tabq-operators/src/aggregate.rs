//! Aggregate operator: one statistic over one numeric column.
//!
//! Preconditions are checked in a fixed order and the first failure wins:
//! non-empty table, numeric column, supported operation.
//!
//! The result is a one-row table keyed by the operation name, the value
//! formatted with exactly two decimals. Rounding is half-to-even on the exact
//! binary value (`{:.2}`), so `2.675` (stored as 2.67499...) gives `2.67` and
//! the exact tie `0.125` gives `0.12`.
//!
//! `NaN` cells count as numbers. If any value is `NaN`, every operation
//! returns `NaN` (rendered `NaN`); `min` and `max` never skip it.

use tabq_core::prelude::{Schema, Table};

use crate::classify::{column_numbers, is_numeric_column};
use crate::condition::AggregateCondition;
use crate::traits::{require_column, OpError, Operator};

#[derive(Debug, Clone)]
pub struct Aggregate {
    pub condition: AggregateCondition,
}

impl Aggregate {
    pub fn new(condition: AggregateCondition) -> Self {
        Self { condition }
    }

    pub fn parse(text: &str) -> Result<Self, OpError> {
        Ok(Self::new(text.parse()?))
    }
}

impl Operator for Aggregate {
    fn name(&self) -> &'static str {
        "aggregate"
    }

    fn plan(&self, input: &Schema) -> Result<Schema, OpError> {
        require_column(input, &self.condition.column)?;
        let op = self.condition.op()?;
        Ok(Schema {
            columns: vec![op.name().to_string()],
        })
    }

    fn eval(&self, input: &Table) -> Result<Table, OpError> {
        let AggregateCondition { column, .. } = &self.condition;

        if input.is_empty() {
            return Err(OpError::EmptyData);
        }
        let idx = require_column(input.schema(), column)?;
        if !is_numeric_column(input, column) {
            return Err(OpError::NonNumericColumn(column.clone()));
        }
        let op = self.condition.op()?;

        let values = column_numbers(input, idx, column)?;

        Ok(Table::single(op.name(), format_value(op.apply(&values))))
    }
}

/// Fixed-point, two decimals.
pub fn format_value(v: f64) -> String {
    format!("{:.2}", v)
}

/// Parse `condition` and aggregate `table` by it.
pub fn aggregate(table: &Table, condition: &str) -> Result<Table, OpError> {
    Aggregate::parse(condition)?.eval(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ErrorKind;

    fn phones() -> Table {
        Table::from_records(
            ["brand", "price"],
            vec![
                vec!["apple", "999"],
                vec!["samsung", "1199"],
                vec!["xiaomi", "199"],
                vec!["xiaomi", "299"],
            ],
        )
        .unwrap()
    }

    fn result(table: &Table) -> (String, String) {
        assert_eq!(table.num_rows(), 1);
        let col = table.schema().columns[0].clone();
        let value = table.rows()[0].cells()[0].as_str().to_string();
        (col, value)
    }

    #[test]
    fn test_avg() {
        let out = aggregate(&phones(), "price=avg").unwrap();
        assert_eq!(result(&out), ("avg".into(), "674.00".into()));
    }

    #[test]
    fn test_min() {
        let out = aggregate(&phones(), "price=min").unwrap();
        assert_eq!(result(&out), ("min".into(), "199.00".into()));
    }

    #[test]
    fn test_max() {
        let out = aggregate(&phones(), "price=max").unwrap();
        assert_eq!(result(&out), ("max".into(), "1199.00".into()));
    }

    #[test]
    fn test_avg_with_fraction() {
        let table =
            Table::from_records(["r"], vec![vec!["4.9"], vec!["4.8"], vec!["4.6"]]).unwrap();
        let out = aggregate(&table, "r=avg").unwrap();
        assert_eq!(result(&out).1, "4.77");
    }

    #[test]
    fn test_empty_table() {
        let empty = Table::from_records(["price"], Vec::<Vec<&str>>::new()).unwrap();
        let err = aggregate(&empty, "price=avg").unwrap_err();
        assert!(matches!(err, OpError::EmptyData));
        assert_eq!(err.kind(), ErrorKind::EmptyData);
    }

    #[test]
    fn test_empty_table_checked_before_operation() {
        let empty = Table::from_records(["price"], Vec::<Vec<&str>>::new()).unwrap();
        assert!(matches!(
            aggregate(&empty, "price=sum"),
            Err(OpError::EmptyData)
        ));
    }

    #[test]
    fn test_non_numeric_column() {
        let err = aggregate(&phones(), "brand=avg").unwrap_err();
        assert!(matches!(err, OpError::NonNumericColumn(ref c) if c == "brand"));
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_non_numeric_checked_before_operation() {
        assert!(matches!(
            aggregate(&phones(), "brand=sum"),
            Err(OpError::NonNumericColumn(_))
        ));
    }

    #[test]
    fn test_unsupported_operation() {
        let err = aggregate(&phones(), "price=sum").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(err.to_string().contains("'sum'"));
    }

    #[test]
    fn test_missing_column() {
        assert!(matches!(
            aggregate(&phones(), "weight=avg"),
            Err(OpError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_nan_propagates_through_every_operation() {
        let table =
            Table::from_records(["v"], vec![vec!["NaN"], vec!["1"], vec!["5"]]).unwrap();
        for cond in ["v=avg", "v=min", "v=max"] {
            let out = aggregate(&table, cond).unwrap();
            assert_eq!(result(&out).1, "NaN", "{cond}");
        }
    }

    #[test]
    fn test_format_value_rounding() {
        assert_eq!(format_value(674.0), "674.00");
        assert_eq!(format_value(2.675), "2.67");
        assert_eq!(format_value(1.005), "1.00");
        assert_eq!(format_value(0.125), "0.12");
        assert_eq!(format_value(0.375), "0.38");
        assert_eq!(format_value(1e21), "1000000000000000000000.00");
    }

    #[test]
    fn test_plan_output_schema() {
        let agg = Aggregate::parse("price=max").unwrap();
        let schema = agg.plan(phones().schema()).unwrap();
        assert_eq!(schema.columns, vec!["max".to_string()]);
        assert!(Aggregate::parse("price=sum")
            .unwrap()
            .plan(phones().schema())
            .is_err());
    }
}
