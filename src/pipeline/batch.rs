//! Batch drivers over a document source.

use crate::diff::PairResult;
use crate::error::{ReconcileError, Result, SourceErrorKind};
use crate::pipeline::process_pair;
use crate::source::{Deadline, DocumentSource, IdPair};
use rayon::prelude::*;

/// Audit explicitly listed id pairs against a document source.
///
/// Documents are fetched sequentially in input order; a missing document
/// or a per-id fetch failure degrades to that pair's `Missing input`
/// record and never aborts the batch. An expired deadline *is* fatal —
/// past it, every remaining pair would be reported missing, which would
/// be indistinguishable from genuinely absent data.
///
/// Flatten+compare then runs in parallel across pairs, collected back in
/// input order.
pub fn run_pair_batch(
    source: &dyn DocumentSource,
    pairs: &[IdPair],
    deadline: Deadline,
) -> Result<Vec<PairResult>> {
    let mut fetched: Vec<(String, Option<String>, Option<String>)> =
        Vec::with_capacity(pairs.len());

    for pair in pairs {
        let reference = fetch_lenient(source, &pair.reference_id, deadline)?;
        let candidate = fetch_lenient(source, &pair.candidate_id, deadline)?;
        fetched.push((pair.label(), reference, candidate));
    }

    tracing::debug!("fetched {} pairs, comparing", fetched.len());

    Ok(fetched
        .par_iter()
        .map(|(identifier, reference, candidate)| {
            process_pair(identifier, reference.as_deref(), candidate.as_deref())
        })
        .collect())
}

/// Audit two parallel collections by bounded bulk scan.
///
/// Both collections are fetched up front; a failure to retrieve either
/// one is fatal to the whole batch — there is no per-pair fallback when a
/// full collection is unreachable. The collections are zipped positionally
/// and truncated to the shorter one's length; pair identifiers are the
/// 1-based positions.
pub fn run_scan(
    source: &dyn DocumentSource,
    reference_collection: &str,
    candidate_collection: &str,
    limit: usize,
    deadline: Deadline,
) -> Result<Vec<PairResult>> {
    let reference_documents = source.fetch_all(reference_collection, limit, deadline)?;
    let candidate_documents = source.fetch_all(candidate_collection, limit, deadline)?;

    let pair_count = reference_documents.len().min(candidate_documents.len());
    if reference_documents.len() != candidate_documents.len() {
        tracing::warn!(
            "collection sizes differ ({} reference, {} candidate); auditing first {}",
            reference_documents.len(),
            candidate_documents.len(),
            pair_count
        );
    }

    let indexed: Vec<(String, &str, &str)> = reference_documents
        .iter()
        .zip(candidate_documents.iter())
        .enumerate()
        .map(|(position, (reference, candidate))| {
            (
                (position + 1).to_string(),
                reference.as_str(),
                candidate.as_str(),
            )
        })
        .collect();

    Ok(indexed
        .par_iter()
        .map(|(identifier, reference, candidate)| {
            process_pair(identifier, Some(*reference), Some(*candidate))
        })
        .collect())
}

/// Fetch one document, degrading per-id failures to absence.
///
/// Deadline expiry stays an error; everything else is logged and treated
/// as a missing document so the pair still appears in the report.
fn fetch_lenient(
    source: &dyn DocumentSource,
    id: &str,
    deadline: Deadline,
) -> Result<Option<String>> {
    match source.fetch(id, deadline) {
        Ok(document) => Ok(document),
        Err(
            e @ ReconcileError::Source {
                source: SourceErrorKind::DeadlineExceeded { .. },
                ..
            },
        ) => Err(e),
        Err(e) => {
            tracing::warn!("fetch failed for {id:?}, treating as missing: {e}");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DifferenceKind;
    use crate::source::MemorySource;
    use std::time::Duration;

    fn pair(reference: &str, candidate: &str) -> IdPair {
        IdPair {
            reference_id: reference.to_string(),
            candidate_id: candidate.to_string(),
        }
    }

    fn seeded_source() -> MemorySource {
        let mut source = MemorySource::new();
        source.insert("r1", r#"<order><item sku="1">A</item></order>"#);
        source.insert("c1", r#"<order><item sku="2">A</item></order>"#);
        source.insert("r2", "<order/>");
        source.insert("c2", "<order/>");
        source
    }

    #[test]
    fn test_run_pair_batch_preserves_input_order() {
        let source = seeded_source();
        let pairs = vec![pair("r1", "c1"), pair("r2", "c2")];
        let results = run_pair_batch(&source, &pairs, Deadline::none()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].identifier, "r1-c1");
        assert_eq!(results[0].differences.len(), 1);
        assert_eq!(results[1].identifier, "r2-c2");
        assert!(results[1].is_clean());
    }

    #[test]
    fn test_run_pair_batch_missing_document_is_not_fatal() {
        let source = seeded_source();
        let pairs = vec![pair("r1", "absent"), pair("r2", "c2")];
        let results = run_pair_batch(&source, &pairs, Deadline::none()).unwrap();

        assert_eq!(results[0].differences.len(), 1);
        assert_eq!(results[0].differences[0].kind, DifferenceKind::MissingInput);
        assert_eq!(results[0].differences[0].tag_path, "candidate");
        assert!(results[1].is_clean());
    }

    #[test]
    fn test_run_pair_batch_expired_deadline_is_fatal() {
        let source = seeded_source();
        let pairs = vec![pair("r1", "c1")];
        let result = run_pair_batch(&source, &pairs, Deadline::after(Duration::ZERO));
        assert!(result.is_err());
    }

    #[test]
    fn test_run_scan_zips_and_truncates() {
        let mut source = MemorySource::new();
        source.insert_collection(
            "wcs",
            vec!["<order>A</order>".to_string(), "<order>B</order>".to_string()],
        );
        source.insert_collection("micro", vec!["<order>A</order>".to_string()]);

        let results = run_scan(&source, "wcs", "micro", 10, Deadline::none()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].identifier, "1");
        assert!(results[0].is_clean());
    }

    #[test]
    fn test_run_scan_missing_collection_is_fatal() {
        let source = MemorySource::new();
        assert!(run_scan(&source, "wcs", "micro", 10, Deadline::none()).is_err());
    }

    #[test]
    fn test_run_scan_identifiers_are_one_based_positions() {
        let mut source = MemorySource::new();
        let docs: Vec<String> = (0..3).map(|i| format!("<order>{i}</order>")).collect();
        source.insert_collection("wcs", docs.clone());
        source.insert_collection("micro", docs);

        let results = run_scan(&source, "wcs", "micro", 10, Deadline::none()).unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
