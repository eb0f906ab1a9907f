//! tabq CLI: filter, sort and aggregate a CSV file from the command line.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tabq_core::config::{parse_delimiter, EngineConfig};
use tabq_exec::{explain, Engine};
use tabq_operators::AggregateCondition;
use tabq_planner::{parse_yaml_query, QueryPlan};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabq")]
#[command(about = "Filter, sort and aggregate CSV files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Default)]
struct QueryArgs {
    /// Path to the CSV file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Filter as "column=value", "column>value" or "column<value"
    #[arg(long = "where")]
    filter: Option<String>,

    /// Sort as "column=asc" or "column=desc"
    #[arg(long)]
    order_by: Option<String>,

    /// Aggregate as "column=avg", "column=min" or "column=max"
    #[arg(long)]
    aggregate: Option<String>,

    /// YAML query file; flags given on the command line take precedence
    #[arg(short, long)]
    query: Option<PathBuf>,

    /// Output format: grid, csv or jsonl (overrides config)
    #[arg(long)]
    format: Option<String>,

    /// Field delimiter, one character (overrides config)
    #[arg(long)]
    delimiter: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a query and print the result
    Run(QueryArgs),

    /// Validate a YAML query file without reading any data
    Validate {
        /// Path to the query YAML file
        #[arg(short, long)]
        query: PathBuf,
    },

    /// Show the steps a query would run (EXPLAIN)
    Explain(QueryArgs),
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            if let Err(e) = run_query(&args) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { query } => {
            if let Err(e) = validate_query(&query) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Query is valid");
        }
        Commands::Explain(args) => {
            if let Err(e) = explain_query(&args) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Logs go to stderr; `RUST_LOG` picks the level (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_query(args: &QueryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, plan) = resolve(args, EngineConfig::from_env())?;
    tracing::debug!(?config, ?plan, "resolved query");
    let engine = Engine::new(config);
    let output = engine.run(&plan)?;
    let text = engine.render(&output.table)?;
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn validate_query(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let yaml = fs::read_to_string(path)?;
    let parsed = parse_yaml_query(&yaml)?;
    let mut config = EngineConfig::default();
    parsed.config.apply(&mut config)?;
    Engine::new(config).prepare(&parsed.plan)?;
    if let Some(aggregate) = &parsed.plan.aggregate {
        aggregate.parse::<AggregateCondition>()?.op()?;
    }
    Ok(())
}

fn explain_query(args: &QueryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (config, plan) = resolve(args, EngineConfig::from_env())?;
    let engine = Engine::new(config);
    let input = match plan.source.as_deref() {
        Some(path) => Some(engine.load(path)?),
        None => None,
    };
    print!("{}", explain(&engine, &plan, input.as_ref())?);
    Ok(())
}

/// Layer configuration and query: `base` (defaults + env) < query file < flags.
fn resolve(
    args: &QueryArgs,
    base: EngineConfig,
) -> Result<(EngineConfig, QueryPlan), Box<dyn std::error::Error>> {
    let mut config = base;
    let mut plan = QueryPlan {
        source: args.file.as_ref().map(|p| p.display().to_string()),
        filter: args.filter.clone(),
        order_by: args.order_by.clone(),
        aggregate: args.aggregate.clone(),
    };

    if let Some(path) = &args.query {
        let yaml = fs::read_to_string(path)?;
        let parsed = parse_yaml_query(&yaml)?;
        parsed.config.apply(&mut config)?;
        plan = plan.or(parsed.plan);
    }

    if let Some(format) = &args.format {
        config.output_format = format.parse()?;
    }
    if let Some(delimiter) = &args.delimiter {
        config.delimiter = parse_delimiter(delimiter)?;
    }
    Ok((config, plan))
}
