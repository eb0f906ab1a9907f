//! Per-stage counters, reported through `tracing`.

use std::time::Duration;

use tabq_planner::StepKind;

#[derive(Debug, Clone)]
pub struct StageStats {
    pub kind: StepKind,
    pub rows_in: usize,
    pub rows_out: usize,
    pub elapsed: Duration,
}

impl StageStats {
    pub fn emit(&self) {
        tracing::debug!(
            stage = %self.kind,
            rows_in = self.rows_in,
            rows_out = self.rows_out,
            elapsed_us = self.elapsed.as_micros() as u64,
            "stage finished"
        );
    }
}
