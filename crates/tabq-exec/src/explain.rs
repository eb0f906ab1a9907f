//! Human-readable query plans (EXPLAIN).

use std::fmt::Write;

use tabq_core::prelude::{Schema, Table};
use tabq_operators::classify_column;
use tabq_planner::QueryPlan;

use crate::runtime::{Engine, ExecError};

/// Describe `plan`. With `input`, also list column types and check every step
/// against the schema it would receive, showing its output columns.
pub fn explain(
    engine: &Engine,
    plan: &QueryPlan,
    input: Option<&Table>,
) -> Result<String, ExecError> {
    let steps = engine.prepare(plan)?;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Query Plan");
    let _ = writeln!(out, "==========");
    let _ = writeln!(out, "Source: {}", plan.source.as_deref().unwrap_or("<none>"));

    if let Some(table) = input {
        let _ = writeln!(out);
        let _ = writeln!(out, "Columns ({} rows):", table.num_rows());
        for name in &table.schema().columns {
            let _ = writeln!(out, "  {:<16} {}", name, classify_column(table, name));
        }
    }

    let _ = writeln!(out);
    if steps.is_empty() {
        let _ = writeln!(out, "Steps: none (rows are passed through)");
        return Ok(out);
    }

    let _ = writeln!(out, "Steps:");
    let mut schema: Option<Schema> = input.map(|t| t.schema().clone());
    for (i, step) in steps.iter().enumerate() {
        let _ = write!(out, "  {}. {:<9} {}", i + 1, step.kind, step.condition);
        if let Some(current) = schema.take() {
            let next = step.operator.plan(&current)?;
            let _ = write!(out, "  -> [{}]", next.columns.join(", "));
            schema = Some(next);
        }
        let _ = writeln!(out);
    }

    Ok(out)
}
