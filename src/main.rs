//! xml-reconcile: structural XML reconciliation and audit tool
//!
//! Compares pairs of XML documents from two independent systems and
//! reports where their structures diverge.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xml_reconcile::{
    cli,
    config::{BatchConfig, BehaviorConfig, DiffConfig, OutputConfig, ScanConfig},
    pipeline::exit_codes,
    reports::{ReportFormat, ReportMode},
};

#[derive(Parser)]
#[command(name = "xml-reconcile")]
#[command(version)]
#[command(about = "Structural XML reconciliation and audit tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No differences (or --fail-on-diff not set)
    1  Differences found (with --fail-on-diff)
    2  Error occurred

EXAMPLES:
    # Audit one pair of files
    xml-reconcile diff reference.xml candidate.xml

    # Audit id pairs listed in a file against a document database
    xml-reconcile batch --pairs orders_to_compare.csv --db orders.sqlite

    # Cross-pair aggregation over the first 15 rows of two tables
    xml-reconcile scan --db orders.sqlite --reference-table wcs --candidate-table micro")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output and behavior flags shared by all subcommands
#[derive(Parser)]
struct CommonArgs {
    /// Report format
    #[arg(short = 'o', long, default_value = "csv")]
    output: ReportFormat,

    /// Reporting strategy
    #[arg(long)]
    mode: Option<ReportMode>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 1 if any difference is found
    #[arg(long)]
    fail_on_diff: bool,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the reference (ground truth) document
    reference: PathBuf,

    /// Path to the candidate document
    candidate: PathBuf,

    /// Pair identifier used in the report (file names if not given)
    #[arg(long)]
    id: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

/// Arguments for the `batch` subcommand
#[derive(Parser)]
struct BatchArgs {
    /// Pair-list file with reference_id,candidate_id rows
    #[arg(long)]
    pairs: PathBuf,

    /// SQLite database holding the documents
    #[arg(long)]
    db: PathBuf,

    /// Table to look document ids up in
    #[arg(long, default_value = "orders")]
    table: String,

    /// Deadline for document fetches, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(flatten)]
    common: CommonArgs,
}

/// Arguments for the `scan` subcommand
#[derive(Parser)]
struct ScanArgs {
    /// SQLite database holding both collections
    #[arg(long)]
    db: PathBuf,

    /// Table scanned for reference documents
    #[arg(long)]
    reference_table: String,

    /// Table scanned for candidate documents
    #[arg(long)]
    candidate_table: String,

    /// Row limit per collection
    #[arg(long, default_value = "15")]
    limit: usize,

    /// Deadline for document fetches, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit one pair of XML document files
    Diff(DiffArgs),

    /// Audit id pairs listed in a file against a document database
    Batch(BatchArgs),

    /// Audit two parallel tables by bounded bulk scan
    Scan(ScanArgs),
}

impl CommonArgs {
    fn into_output_config(self, default_mode: ReportMode) -> OutputConfig {
        OutputConfig {
            format: self.output,
            mode: self.mode.unwrap_or(default_mode),
            file: self.output_file,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let quiet = cli.quiet;
    let behavior = move |fail_on_diff| BehaviorConfig {
        quiet,
        fail_on_diff,
    };

    // Dispatch to command handlers. The per-pair listing suits auditing a
    // single pair or an explicit pair list; scans over a corpus default to
    // the aggregated view.
    let exit_code = match cli.command {
        Commands::Diff(args) => {
            let config = DiffConfig {
                reference: args.reference,
                candidate: args.candidate,
                identifier: args.id,
                behavior: behavior(args.common.fail_on_diff),
                output: args.common.into_output_config(ReportMode::PerPair),
            };
            cli::run_diff(config)
        }
        Commands::Batch(args) => {
            let config = BatchConfig {
                pairs_file: args.pairs,
                database: args.db,
                table: args.table,
                timeout_secs: args.timeout_secs,
                behavior: behavior(args.common.fail_on_diff),
                output: args.common.into_output_config(ReportMode::PerPair),
            };
            cli::run_batch(config)
        }
        Commands::Scan(args) => {
            let config = ScanConfig {
                database: args.db,
                reference_table: args.reference_table,
                candidate_table: args.candidate_table,
                limit: args.limit,
                timeout_secs: args.timeout_secs,
                behavior: behavior(args.common.fail_on_diff),
                output: args.common.into_output_config(ReportMode::Aggregate),
            };
            cli::run_scan_command(config)
        }
    };

    match exit_code {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("{e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}
