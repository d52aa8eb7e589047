//! querybind CLI
//!
//! Expands `:name[]` placeholders in a query template and prints the rewritten
//! query with its bind map.

use anyhow::Context;
use clap::Parser;
use querybind::input::build_registry;
use querybind::logging::{init_logging, LogConfig};
use querybind::output::{render, OutputFormat};
use querybind::{MatchMode, QueryBuilder};
use std::path::PathBuf;
use tracing::info;

/// Expand array placeholders in a named-parameter SQL template
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Query template, e.g. "SELECT * FROM users WHERE user IN (:u[])"
    #[arg(short, long)]
    query: String,

    /// Binding as LABEL=VALUE; array labels take a separated list (repeatable)
    #[arg(short, long = "bind", value_name = "LABEL=VALUE")]
    binds: Vec<String>,

    /// JSON file with [{"label": ..., "value": ...}] entries, registered first
    #[arg(long)]
    bindings: Option<PathBuf>,

    /// Separator for array values given with --bind
    #[arg(long, default_value = ",")]
    separator: String,

    /// Only match labels on identifier boundaries (`:id` no longer matches `:id2`)
    #[arg(long, default_value_t = false)]
    boundary: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Also write logs to daily files in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(LogConfig {
        json_format: args.log_json,
        log_dir: args.log_dir.clone(),
        ..LogConfig::with_level(args.log_level.clone())
    })
    .context("failed to initialize logging")?;

    let registry = build_registry(
        args.bindings.as_deref(),
        args.binds.as_slice(),
        &args.separator,
    )
    .context("failed to collect bindings")?;

    let mode = if args.boundary {
        MatchMode::Boundary
    } else {
        MatchMode::Substring
    };
    info!("Finalizing with {} bindings ({:?} matching)", registry.len(), mode);

    let mut builder = QueryBuilder::new(args.query.as_str(), &registry).with_match_mode(mode);
    builder.finalize()?;

    println!("{}", render(&builder, args.format)?);
    Ok(())
}
