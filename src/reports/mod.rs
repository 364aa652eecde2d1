//! Report generation for audit results.
//!
//! Two interchangeable reporting strategies over the same per-pair
//! difference lists:
//!
//! - **Per-pair listing**: one row per (pair, difference), input order,
//!   duplicates retained — for auditing individual pairs.
//! - **Deduplicated aggregation**: one row per distinct difference
//!   signature with the contributing pair indices — for spotting systemic
//!   divergences across a corpus.
//!
//! Each strategy renders as CSV (spreadsheet import) or JSON
//! (programmatic integration).

mod aggregate;
mod csv;
mod json;

pub use aggregate::{aggregate_signatures, AggregateEntry};
pub use csv::CsvReporter;
pub use json::JsonReporter;

use crate::diff::PairResult;
use clap::ValueEnum;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Output encoding of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Delimited tabular output
    Csv,
    /// Structured output with a metadata envelope
    Json,
}

/// Which reporting strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportMode {
    /// One row per (pair, difference), input order, no deduplication
    PerPair,
    /// One row per distinct signature with contributing pair indices
    Aggregate,
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render all pair results under the given strategy.
    fn generate(&self, results: &[PairResult], mode: ReportMode) -> Result<String, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Csv => Box::new(CsvReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
