//! Engine configuration that downstream crates can serialize/deserialize.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How a result table is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bordered text grid with a header row.
    #[default]
    Grid,
    Csv,
    /// One JSON object per row.
    Jsonl,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(OutputFormat::Grid),
            "csv" => Ok(OutputFormat::Csv),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            other => Err(Error::Config(format!(
                "unknown output format '{}': use grid, csv or jsonl",
                other
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Grid => f.write_str("grid"),
            OutputFormat::Csv => f.write_str("csv"),
            OutputFormat::Jsonl => f.write_str("jsonl"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Field delimiter of the source file (single byte).
    pub delimiter: u8,

    /// Rendering used for the final table.
    pub output_format: OutputFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            output_format: OutputFormat::Grid,
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `TABQ_DELIMITER`: single-byte field delimiter (`\t` accepted for tab)
    /// - `TABQ_OUTPUT_FORMAT`: `grid`, `csv` or `jsonl`
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("TABQ_DELIMITER") {
            if let Ok(d) = parse_delimiter(&s) {
                cfg.delimiter = d;
            }
        }

        if let Ok(s) = std::env::var("TABQ_OUTPUT_FORMAT") {
            if let Ok(f) = s.parse::<OutputFormat>() {
                cfg.output_format = f;
            }
        }

        cfg
    }
}

/// Parse a delimiter given as text. Must be exactly one ASCII character, or the
/// escape `\t`.
pub fn parse_delimiter(s: &str) -> Result<u8, Error> {
    match s {
        "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(Error::Config(format!(
            "delimiter must be a single ASCII character, got '{}'",
            s
        ))),
    }
}
