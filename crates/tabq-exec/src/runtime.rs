//! Runtime: turn a `QueryPlan` into operators and run them in order.
//!
//! Behavior:
//! - All conditions are parsed up front; a malformed one fails the query
//!   before the source is read.
//! - Stages run strictly in filter → sort → aggregate order, each consuming
//!   the previous stage's complete output.
//! - The first failing stage aborts the query; nothing partial is returned.

use std::time::Instant;

use thiserror::Error;

use tabq_core::config::EngineConfig;
use tabq_core::prelude::Table;
use tabq_io::{render, CsvReader};
use tabq_operators::{Aggregate, Filter, OpError, Operator, Sort};
use tabq_planner::{PlanError, QueryPlan, Step, StepKind};

use crate::metrics::StageStats;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error(transparent)]
    Operator(#[from] OpError),

    #[error(transparent)]
    Io(#[from] tabq_io::Error),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("no source file given")]
    MissingSource,
}

/// A step with its condition already parsed into an operator.
pub struct PreparedStep {
    pub kind: StepKind,
    pub condition: String,
    pub operator: Box<dyn Operator>,
}

impl std::fmt::Debug for PreparedStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedStep")
            .field("kind", &self.kind)
            .field("condition", &self.condition)
            .field("operator", &self.operator.name())
            .finish()
    }
}

/// Final table plus what each stage did.
#[derive(Debug, Clone)]
pub struct QueryOutput {
    pub table: Table,
    pub stages: Vec<StageStats>,
}

pub struct Engine {
    cfg: EngineConfig,
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Parse every condition of `plan` into an operator.
    pub fn prepare(&self, plan: &QueryPlan) -> Result<Vec<PreparedStep>, ExecError> {
        plan.steps()
            .into_iter()
            .map(|step| -> Result<PreparedStep, ExecError> {
                let operator = build_operator(&step)?;
                tracing::trace!(stage = %step.kind, condition = %step.condition, "parsed condition");
                Ok(PreparedStep {
                    kind: step.kind,
                    condition: step.condition,
                    operator,
                })
            })
            .collect()
    }

    /// Read a CSV file with the configured delimiter.
    pub fn load(&self, path: &str) -> Result<Table, ExecError> {
        let table = CsvReader::read_path(path, self.cfg.delimiter)?;
        tracing::debug!(
            path,
            rows = table.num_rows(),
            columns = table.schema().len(),
            "loaded source"
        );
        Ok(table)
    }

    /// Run `plan` over an already loaded table. `input` is not modified.
    pub fn execute(&self, plan: &QueryPlan, input: &Table) -> Result<QueryOutput, ExecError> {
        let steps = self.prepare(plan)?;
        self.execute_steps(&steps, input)
    }

    /// Load `plan.source` and execute the plan over it.
    pub fn run(&self, plan: &QueryPlan) -> Result<QueryOutput, ExecError> {
        // Reject bad conditions before reading the file.
        let steps = self.prepare(plan)?;
        let source = plan.source.as_deref().ok_or(ExecError::MissingSource)?;
        let input = self.load(source)?;
        self.execute_steps(&steps, &input)
    }

    fn execute_steps(
        &self,
        steps: &[PreparedStep],
        input: &Table,
    ) -> Result<QueryOutput, ExecError> {
        let mut current: Option<Table> = None;
        let mut stages = Vec::with_capacity(steps.len());
        for step in steps {
            let source = current.as_ref().unwrap_or(input);
            let started = Instant::now();
            let out = step.operator.eval(source).map_err(|e| {
                tracing::debug!(stage = %step.kind, error = %e, "stage failed");
                e
            })?;
            let stats = StageStats {
                kind: step.kind,
                rows_in: source.num_rows(),
                rows_out: out.num_rows(),
                elapsed: started.elapsed(),
            };
            stats.emit();
            stages.push(stats);
            current = Some(out);
        }

        Ok(QueryOutput {
            table: current.unwrap_or_else(|| input.clone()),
            stages,
        })
    }

    /// Render a table in the configured output format.
    pub fn render(&self, table: &Table) -> Result<String, ExecError> {
        Ok(render(table, self.cfg.output_format, self.cfg.delimiter)?)
    }
}

fn build_operator(step: &Step) -> Result<Box<dyn Operator>, OpError> {
    Ok(match step.kind {
        StepKind::Filter => Box::new(Filter::parse(&step.condition)?),
        StepKind::Sort => Box::new(Sort::parse(&step.condition)?),
        StepKind::Aggregate => Box::new(Aggregate::parse(&step.condition)?),
    })
}
