//! JSON report generator.
//!
//! Wraps either reporting strategy in a small metadata envelope for
//! programmatic consumers.

use super::{aggregate_signatures, AggregateEntry, ReportError, ReportFormat, ReportGenerator, ReportMode};
use crate::diff::PairResult;
use serde::Serialize;

/// JSON report generator.
pub struct JsonReporter;

impl JsonReporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    tool: &'static str,
    version: &'static str,
    mode: &'static str,
    pair_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pairs: Option<&'a [PairResult]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signatures: Option<Vec<AggregateEntry>>,
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, results: &[PairResult], mode: ReportMode) -> Result<String, ReportError> {
        let envelope = match mode {
            ReportMode::PerPair => Envelope {
                tool: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
                mode: "per-pair",
                pair_count: results.len(),
                pairs: Some(results),
                signatures: None,
            },
            ReportMode::Aggregate => Envelope {
                tool: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
                mode: "aggregate",
                pair_count: results.len(),
                pairs: None,
                signatures: Some(aggregate_signatures(results)),
            },
        };

        serde_json::to_string_pretty(&envelope)
            .map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
