//! Per-pair processing.

use crate::diff::{compare, Difference, PairResult};
use crate::model::{flatten, XmlElement};
use crate::parser::{parse_document, ParseError};

/// Side label for the reference document in failure records.
pub const REFERENCE_SIDE: &str = "reference";
/// Side label for the candidate document in failure records.
pub const CANDIDATE_SIDE: &str = "candidate";
/// Side label when both documents are affected.
pub const BOTH_SIDES: &str = "both";

/// Process one reference/candidate pair into its difference list.
///
/// Failure handling, in order:
/// - Either source absent → a single `Missing input` record naming the
///   missing side (`reference`, `candidate`, or `both`); no parsing or
///   comparison happens.
/// - Each present source parses independently; every failure becomes a
///   `Parse error` record carrying the side label and the parser's
///   message. A failure on one side never suppresses reporting of the
///   other side's failure.
/// - Comparison runs only when both sides parsed.
///
/// Never returns an error: a pair's problems are its differences, and one
/// pair's failure must not abort the rest of the batch.
#[must_use]
pub fn process_pair(
    identifier: &str,
    reference_source: Option<&str>,
    candidate_source: Option<&str>,
) -> PairResult {
    let (Some(reference_text), Some(candidate_text)) = (reference_source, candidate_source) else {
        let side = match (reference_source, candidate_source) {
            (None, None) => BOTH_SIDES,
            (None, Some(_)) => REFERENCE_SIDE,
            (Some(_), None) => CANDIDATE_SIDE,
            (Some(_), Some(_)) => unreachable!("guarded by the let-else above"),
        };
        return PairResult::new(identifier, vec![Difference::missing_input(side)]);
    };

    let mut differences = Vec::new();
    let reference_root = record_parse(
        parse_document(reference_text),
        REFERENCE_SIDE,
        &mut differences,
    );
    let candidate_root = record_parse(
        parse_document(candidate_text),
        CANDIDATE_SIDE,
        &mut differences,
    );

    if let (Some(reference_root), Some(candidate_root)) = (reference_root, candidate_root) {
        let reference_flat = flatten(&reference_root);
        let candidate_flat = flatten(&candidate_root);
        differences.extend(compare(&reference_flat, &candidate_flat));
    }

    PairResult::new(identifier, differences)
}

fn record_parse(
    parsed: Result<XmlElement, ParseError>,
    side: &str,
    differences: &mut Vec<Difference>,
) -> Option<XmlElement> {
    match parsed {
        Ok(root) => Some(root),
        Err(e) => {
            differences.push(Difference::parse_error(side, e.to_string()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DifferenceKind;

    #[test]
    fn test_process_pair_missing_sides() {
        let result = process_pair("p1", None, Some("<a/>"));
        assert_eq!(
            result.differences,
            vec![Difference::missing_input("reference")]
        );

        let result = process_pair("p2", Some("<a/>"), None);
        assert_eq!(
            result.differences,
            vec![Difference::missing_input("candidate")]
        );

        let result = process_pair("p3", None, None);
        assert_eq!(result.differences, vec![Difference::missing_input("both")]);
    }

    #[test]
    fn test_process_pair_parse_error_preserves_message() {
        let result = process_pair("p1", Some("<order>"), Some("<order/>"));
        assert_eq!(result.differences.len(), 1);
        let diff = &result.differences[0];
        assert_eq!(diff.kind, DifferenceKind::ParseError);
        assert_eq!(diff.tag_path, "reference");
        assert!(!diff.attribute.is_empty(), "parser message is preserved");
    }

    #[test]
    fn test_process_pair_reports_both_parse_errors() {
        let result = process_pair("p1", Some("</broken>"), Some("<order>"));
        let sides: Vec<&str> = result
            .differences
            .iter()
            .map(|d| d.tag_path.as_str())
            .collect();
        assert_eq!(sides, vec!["reference", "candidate"]);
        assert!(result
            .differences
            .iter()
            .all(|d| d.kind == DifferenceKind::ParseError));
    }

    #[test]
    fn test_process_pair_parse_failure_suppresses_comparison() {
        // Candidate is malformed; the structural gap between the documents
        // must not be reported.
        let result = process_pair("p1", Some("<order><item/></order>"), Some("<order"));
        assert_eq!(result.differences.len(), 1);
        assert_eq!(result.differences[0].kind, DifferenceKind::ParseError);
    }

    #[test]
    fn test_process_pair_clean() {
        let result = process_pair("p1", Some("<order>A</order>"), Some("<order>A</order>"));
        assert!(result.is_clean());
        assert_eq!(result.identifier, "p1");
    }

    #[test]
    fn test_process_pair_structural_differences() {
        let result = process_pair(
            "p1",
            Some(r#"<order><item sku="1">A</item></order>"#),
            Some(r#"<order><item sku="2">A</item></order>"#),
        );
        assert_eq!(
            result.differences,
            vec![Difference::attribute_mismatch("item", "sku")]
        );
    }
}
