//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs; each implements one subcommand
//! and returns the desired process exit code. The caller is responsible
//! for `std::process::exit()` when the code is non-zero.

use crate::config::{BatchConfig, BehaviorConfig, DiffConfig, OutputConfig, ScanConfig};
use crate::diff::PairResult;
use crate::pipeline::{
    exit_codes, process_pair, run_pair_batch, run_scan, write_output, OutputTarget,
};
use crate::reports::create_reporter;
use crate::source::{read_pair_list, Deadline, SqliteSource};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

/// Run the `diff` command: audit one pair of document files.
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let identifier = config
        .identifier
        .clone()
        .unwrap_or_else(|| derive_identifier(&config.reference, &config.candidate));

    let reference = read_optional(&config.reference, config.behavior.quiet);
    let candidate = read_optional(&config.candidate, config.behavior.quiet);

    let result = process_pair(&identifier, reference.as_deref(), candidate.as_deref());
    finish(vec![result], &config.output, &config.behavior)
}

/// Run the `batch` command: audit id pairs listed in a file against a
/// document database.
pub fn run_batch(config: BatchConfig) -> Result<i32> {
    let pairs = read_pair_list(&config.pairs_file)
        .with_context(|| format!("reading pair list {}", config.pairs_file.display()))?;
    if !config.behavior.quiet {
        tracing::info!("Auditing {} pairs from {}", pairs.len(), config.pairs_file.display());
    }

    let source = SqliteSource::open(&config.database, config.table.clone())
        .with_context(|| format!("opening database {}", config.database.display()))?;
    let deadline = deadline_from(config.timeout_secs);

    let results = run_pair_batch(&source, &pairs, deadline)?;
    finish(results, &config.output, &config.behavior)
}

/// Run the `scan` command: audit two parallel tables by bounded bulk scan.
pub fn run_scan_command(config: ScanConfig) -> Result<i32> {
    let source = SqliteSource::open(&config.database, config.reference_table.clone())
        .with_context(|| format!("opening database {}", config.database.display()))?;
    let deadline = deadline_from(config.timeout_secs);

    let results = run_scan(
        &source,
        &config.reference_table,
        &config.candidate_table,
        config.limit,
        deadline,
    )?;
    if !config.behavior.quiet {
        tracing::info!("Audited {} pairs", results.len());
    }

    finish(results, &config.output, &config.behavior)
}

/// Render, write, and turn the results into an exit code.
fn finish(
    results: Vec<PairResult>,
    output: &OutputConfig,
    behavior: &BehaviorConfig,
) -> Result<i32> {
    let reporter = create_reporter(output.format);
    let report = reporter
        .generate(&results, output.mode)
        .context("generating report")?;

    let target = OutputTarget::from_option(output.file.clone());
    write_output(&report, &target, behavior.quiet)?;

    let total: usize = results.iter().map(|r| r.differences.len()).sum();
    if !behavior.quiet {
        tracing::info!("{} differences across {} pairs", total, results.len());
    }

    if behavior.fail_on_diff && total > 0 {
        Ok(exit_codes::DIFFERENCES_FOUND)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Read a document file, degrading failures to absence so the pair is
/// reported as `Missing input` instead of aborting.
fn read_optional(path: &Path, quiet: bool) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            if !quiet {
                tracing::warn!("cannot read {}, treating as missing: {e}", path.display());
            }
            None
        }
    }
}

/// Pair identifier from the two file names, e.g. `order-a.xml` vs
/// `order-b.xml` → `order-a-order-b`.
fn derive_identifier(reference: &Path, candidate: &Path) -> String {
    let stem = |p: &Path| {
        p.file_stem()
            .map_or_else(|| p.display().to_string(), |s| s.to_string_lossy().into_owned())
    };
    format!("{}-{}", stem(reference), stem(candidate))
}

fn deadline_from(timeout_secs: Option<u64>) -> Deadline {
    timeout_secs.map_or_else(Deadline::none, |secs| {
        Deadline::after(Duration::from_secs(secs))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_identifier_uses_file_stems() {
        let id = derive_identifier(Path::new("/tmp/order-a.xml"), Path::new("order-b.xml"));
        assert_eq!(id, "order-a-order-b");
    }

    #[test]
    fn test_read_optional_missing_file() {
        assert!(read_optional(Path::new("/nonexistent/doc.xml"), true).is_none());
    }

    #[test]
    fn test_deadline_from_none_never_expires() {
        assert!(!deadline_from(None).expired());
    }
}
