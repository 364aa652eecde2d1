//! CSV report generator.
//!
//! Generates comma-separated reports for both reporting strategies,
//! suitable for spreadsheet import and data-quality pipelines.

use super::{aggregate_signatures, ReportError, ReportFormat, ReportGenerator, ReportMode};
use crate::diff::PairResult;
use std::fmt::Write as _;

/// Column layout for per-pair mode.
const PER_PAIR_HEADER: &str = "Difference Type,Tag Path,Attribute,Order Pair";
/// Column layout for aggregated mode.
const AGGREGATE_HEADER: &str = "Difference Type,Tag Path,Attribute,Pair Indices";

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for CsvReporter {
    fn generate(&self, results: &[PairResult], mode: ReportMode) -> Result<String, ReportError> {
        let mut content = String::new();

        match mode {
            ReportMode::PerPair => {
                writeln!(content, "{PER_PAIR_HEADER}")?;
                for result in results {
                    for difference in &result.differences {
                        writeln!(
                            content,
                            "{},\"{}\",\"{}\",\"{}\"",
                            difference.kind,
                            escape_csv(&difference.tag_path),
                            escape_csv(&difference.attribute),
                            escape_csv(&result.identifier),
                        )?;
                    }
                }
            }
            ReportMode::Aggregate => {
                writeln!(content, "{AGGREGATE_HEADER}")?;
                for entry in aggregate_signatures(results) {
                    writeln!(
                        content,
                        "{},\"{}\",\"{}\",\"{}\"",
                        entry.kind,
                        escape_csv(&entry.tag_path),
                        escape_csv(&entry.attribute),
                        entry.indices_display(),
                    )?;
                }
            }
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

/// Escape a string for CSV embedding: double-quote escaping per RFC 4180,
/// plus newline flattening since fields are already wrapped in double quotes.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Difference;

    #[test]
    fn test_per_pair_rows_preserve_order_and_duplicates() {
        let results = vec![
            PairResult::new(
                "A-1-B-1",
                vec![
                    Difference::tag_missing("item"),
                    Difference::tag_missing("item"),
                ],
            ),
            PairResult::new("A-2-B-2", vec![Difference::text_mismatch("note")]),
        ];
        let report = CsvReporter::new()
            .generate(&results, ReportMode::PerPair)
            .unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], PER_PAIR_HEADER);
        assert_eq!(lines[1], "Tag missing,\"item\",\"-\",\"A-1-B-1\"");
        assert_eq!(lines[2], "Tag missing,\"item\",\"-\",\"A-1-B-1\"");
        assert_eq!(lines[3], "Text mismatch,\"note\",\"(text)\",\"A-2-B-2\"");
    }

    #[test]
    fn test_aggregate_rows() {
        let results = vec![
            PairResult::new("1", vec![Difference::attribute_mismatch("item", "sku")]),
            PairResult::new("2", vec![Difference::attribute_mismatch("item", "sku")]),
        ];
        let report = CsvReporter::new()
            .generate(&results, ReportMode::Aggregate)
            .unwrap();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], AGGREGATE_HEADER);
        assert_eq!(lines[1], "Attribute mismatch,\"item\",\"sku\",\"(1, 2)\"");
    }

    #[test]
    fn test_empty_results_emit_header_only() {
        let report = CsvReporter::new().generate(&[], ReportMode::PerPair).unwrap();
        assert_eq!(report.trim_end(), PER_PAIR_HEADER);
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("say \"hi\""), "say \"\"hi\"\"");
        assert_eq!(escape_csv("two\nlines"), "two lines");
    }

    #[test]
    fn test_parse_error_message_is_escaped() {
        let results = vec![PairResult::new(
            "1",
            vec![Difference::parse_error("reference", "unexpected \"<\"")],
        )];
        let report = CsvReporter::new()
            .generate(&results, ReportMode::PerPair)
            .unwrap();
        assert!(report.contains("\"unexpected \"\"<\"\"\""));
    }
}
