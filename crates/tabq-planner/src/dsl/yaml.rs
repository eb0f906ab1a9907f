//! YAML query files.
//!
//! Example:
//! ```yaml
//! source: data/phones.csv
//! where: "brand=xiaomi"
//! order_by: "price=desc"
//! aggregate: "price=avg"
//! config:
//!   delimiter: ";"
//!   format: jsonl
//! ```
//!
//! Every key is optional. Conditions use the same grammar as the CLI flags.

use serde::{Deserialize, Serialize};

use tabq_core::config::{parse_delimiter, EngineConfig, OutputFormat};

use crate::logical::QueryPlan;
use crate::PlanError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryFile {
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default, rename = "where")]
    pub filter: Option<String>,

    #[serde(default, alias = "order-by")]
    pub order_by: Option<String>,

    #[serde(default)]
    pub aggregate: Option<String>,

    #[serde(default)]
    pub config: Option<QueryConfig>,
}

/// Per-query overrides of `EngineConfig`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    pub delimiter: Option<String>,
    pub format: Option<OutputFormat>,
}

impl QueryConfig {
    /// Overwrite the fields this file sets.
    pub fn apply(&self, cfg: &mut EngineConfig) -> Result<(), PlanError> {
        if let Some(d) = &self.delimiter {
            cfg.delimiter = parse_delimiter(d)?;
        }
        if let Some(format) = self.format {
            cfg.output_format = format;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ParsedQuery {
    pub plan: QueryPlan,
    pub config: QueryConfig,
}

pub fn parse_yaml_query(yaml_src: &str) -> Result<ParsedQuery, PlanError> {
    let doc: QueryFile = serde_yaml::from_str(yaml_src)?;
    Ok(ParsedQuery {
        plan: QueryPlan {
            source: doc.source,
            filter: doc.filter,
            order_by: doc.order_by,
            aggregate: doc.aggregate,
        },
        config: doc.config.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_query() {
        let yaml = r#"
source: data/phones.csv
where: "brand=xiaomi"
order_by: "price=desc"
aggregate: "price=avg"
config:
  delimiter: ";"
  format: jsonl
"#;
        let parsed = parse_yaml_query(yaml).unwrap();
        assert_eq!(parsed.plan.source.as_deref(), Some("data/phones.csv"));
        assert_eq!(parsed.plan.filter.as_deref(), Some("brand=xiaomi"));
        assert_eq!(parsed.plan.order_by.as_deref(), Some("price=desc"));
        assert_eq!(parsed.plan.aggregate.as_deref(), Some("price=avg"));
        assert_eq!(parsed.config.format, Some(OutputFormat::Jsonl));

        let mut cfg = EngineConfig::default();
        parsed.config.apply(&mut cfg).unwrap();
        assert_eq!(cfg.delimiter, b';');
        assert_eq!(cfg.output_format, OutputFormat::Jsonl);
    }

    #[test]
    fn test_order_by_alias() {
        let parsed = parse_yaml_query("order-by: price=asc\n").unwrap();
        assert_eq!(parsed.plan.order_by.as_deref(), Some("price=asc"));
        assert_eq!(parsed.config, QueryConfig::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(matches!(
            parse_yaml_query("group_by: brand\n"),
            Err(PlanError::Yaml(_))
        ));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(parse_yaml_query("config:\n  format: html\n").is_err());
    }

    #[test]
    fn test_bad_delimiter_fails_on_apply() {
        let parsed = parse_yaml_query("config:\n  delimiter: \"::\"\n").unwrap();
        let mut cfg = EngineConfig::default();
        assert!(matches!(
            parsed.config.apply(&mut cfg),
            Err(PlanError::Config(_))
        ));
    }
}
