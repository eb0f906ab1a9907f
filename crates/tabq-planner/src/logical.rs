//! Logical query: optional source plus up to three condition strings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Filter,
    Sort,
    Aggregate,
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepKind::Filter => f.pad("filter"),
            StepKind::Sort => f.pad("sort"),
            StepKind::Aggregate => f.pad("aggregate"),
        }
    }
}

/// One stage of a query with its unparsed condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    /// Path of the CSV source, if known at planning time.
    pub source: Option<String>,
    #[serde(rename = "where")]
    pub filter: Option<String>,
    pub order_by: Option<String>,
    pub aggregate: Option<String>,
}

impl QueryPlan {
    /// Steps in execution order: filter, sort, aggregate. Absent ones are skipped.
    pub fn steps(&self) -> Vec<Step> {
        [
            (StepKind::Filter, &self.filter),
            (StepKind::Sort, &self.order_by),
            (StepKind::Aggregate, &self.aggregate),
        ]
        .into_iter()
        .filter_map(|(kind, cond)| {
            cond.as_ref().map(|c| Step {
                kind,
                condition: c.clone(),
            })
        })
        .collect()
    }

    /// Fill unset fields from `other`. Values already set here win.
    pub fn or(self, other: QueryPlan) -> QueryPlan {
        QueryPlan {
            source: self.source.or(other.source),
            filter: self.filter.or(other.filter),
            order_by: self.order_by.or(other.order_by),
            aggregate: self.aggregate.or(other.aggregate),
        }
    }
}
