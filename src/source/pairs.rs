//! Pair-list ingestion.
//!
//! A pair list is a small delimited file naming which reference/candidate
//! document ids to audit:
//!
//! ```text
//! reference_id,candidate_id
//! WCS-1001,MS-1001
//! WCS-1002,MS-1002
//! ```
//!
//! The first line is treated as a header when it matches the expected
//! column names; blank lines and `#` comments are skipped. Ids may not
//! contain the delimiter, which holds for every order-id scheme this tool
//! audits, so no quoting rules apply on input.

use crate::error::{ReconcileError, Result, SourceErrorKind};
use std::path::Path;

/// One reference/candidate id pair to audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPair {
    pub reference_id: String,
    pub candidate_id: String,
}

impl IdPair {
    /// Combined label used as the pair identifier in reports.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}-{}", self.reference_id, self.candidate_id)
    }
}

/// Read id pairs from a delimited file.
pub fn read_pair_list(path: &Path) -> Result<Vec<IdPair>> {
    let content = std::fs::read_to_string(path).map_err(|e| ReconcileError::io(path, e))?;
    parse_pair_list(&content)
}

/// Parse pair-list content, one `reference_id,candidate_id` per line.
pub fn parse_pair_list(content: &str) -> Result<Vec<IdPair>> {
    let mut pairs = Vec::new();

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if index == 0 && is_header(line) {
            continue;
        }

        let Some((reference_id, candidate_id)) = line.split_once(',') else {
            return Err(malformed(index + 1, "expected two comma-separated ids"));
        };
        let reference_id = reference_id.trim();
        let candidate_id = candidate_id.trim();
        if reference_id.is_empty() || candidate_id.is_empty() {
            return Err(malformed(index + 1, "empty id"));
        }
        if candidate_id.contains(',') {
            return Err(malformed(index + 1, "more than two columns"));
        }

        pairs.push(IdPair {
            reference_id: reference_id.to_string(),
            candidate_id: candidate_id.to_string(),
        });
    }

    Ok(pairs)
}

fn is_header(line: &str) -> bool {
    let lowered = line.to_ascii_lowercase();
    lowered.replace(' ', "") == "reference_id,candidate_id"
}

fn malformed(line: usize, message: &str) -> ReconcileError {
    ReconcileError::source(
        "reading pair list",
        SourceErrorKind::MalformedPairList {
            line,
            message: message.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair_list_with_header() {
        let pairs = parse_pair_list("reference_id,candidate_id\nA-1,B-1\nA-2,B-2\n").unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].reference_id, "A-1");
        assert_eq!(pairs[0].candidate_id, "B-1");
        assert_eq!(pairs[0].label(), "A-1-B-1");
    }

    #[test]
    fn test_parse_pair_list_without_header() {
        let pairs = parse_pair_list("A-1,B-1\n").unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_parse_pair_list_skips_comments_and_blanks() {
        let pairs = parse_pair_list("# audit run\n\nA-1, B-1\n").unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].candidate_id, "B-1");
    }

    #[test]
    fn test_parse_pair_list_rejects_bad_rows() {
        assert!(parse_pair_list("justoneid\n").is_err());
        assert!(parse_pair_list("a,\n").is_err());
        assert!(parse_pair_list("a,b,c\n").is_err());
    }

    #[test]
    fn test_parse_pair_list_error_names_line() {
        let err = parse_pair_list("a,b\nbroken\n").expect_err("should fail");
        assert!(err.to_string().contains("Document source failed"));
        let chain = format!("{:?}", err);
        assert!(chain.contains("line: 2"), "{chain}");
    }
}
