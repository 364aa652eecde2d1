//! Configuration types for audit runs.
//!
//! Grouped settings handed from the CLI layer to the command handlers, so
//! the handlers stay testable without argument parsing.

use crate::reports::{ReportFormat, ReportMode};
use std::path::PathBuf;

/// Output configuration shared by every command.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Report encoding
    pub format: ReportFormat,
    /// Reporting strategy
    pub mode: ReportMode,
    /// Destination file (stdout if not specified)
    pub file: Option<PathBuf>,
}

/// Behavior flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
    /// Exit non-zero when any difference is found
    pub fail_on_diff: bool,
}

/// Configuration for the `diff` command (one pair from files).
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Reference (ground truth) document path
    pub reference: PathBuf,
    /// Candidate document path
    pub candidate: PathBuf,
    /// Pair identifier override; derived from file names if absent
    pub identifier: Option<String>,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

/// Configuration for the `batch` command (id-pair lookup).
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Pair-list file (`reference_id,candidate_id` rows)
    pub pairs_file: PathBuf,
    /// SQLite database holding the documents
    pub database: PathBuf,
    /// Table to look ids up in
    pub table: String,
    /// Overall deadline for document fetches, in seconds
    pub timeout_secs: Option<u64>,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}

/// Configuration for the `scan` command (bounded bulk scan).
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// SQLite database holding both collections
    pub database: PathBuf,
    /// Table scanned for reference documents
    pub reference_table: String,
    /// Table scanned for candidate documents
    pub candidate_table: String,
    /// Row limit per collection
    pub limit: usize,
    /// Overall deadline for document fetches, in seconds
    pub timeout_secs: Option<u64>,
    pub output: OutputConfig,
    pub behavior: BehaviorConfig,
}
