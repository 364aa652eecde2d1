//! Core comparison over flattened documents.

use crate::diff::Difference;
use crate::model::FlattenedDocument;

/// Compute the ordered differences between two flattened documents.
///
/// Deterministic and order-sensitive:
///
/// 1. Tags iterate in the reference's first-occurrence order; within a tag,
///    snapshots align by traversal index. An index with no candidate
///    counterpart yields `Tag missing` and nothing else for that index.
///    For aligned snapshots, every *reference* attribute is checked
///    (candidate-only attributes are never reported), then direct text is
///    compared exactly.
/// 2. Every tag present only in the candidate yields exactly one
///    `Extra tag`, regardless of how many instances share it, in the
///    candidate's first-occurrence order.
///
/// The result is empty iff the documents are structurally identical under
/// tag-only grouping and index alignment. Comparison never fails.
#[must_use]
pub fn compare(reference: &FlattenedDocument, candidate: &FlattenedDocument) -> Vec<Difference> {
    let mut differences = Vec::new();

    for (tag, reference_snapshots) in reference.iter() {
        let candidate_snapshots = candidate.get(tag).unwrap_or(&[]);

        for (index, reference_snapshot) in reference_snapshots.iter().enumerate() {
            let Some(candidate_snapshot) = candidate_snapshots.get(index) else {
                differences.push(Difference::tag_missing(tag));
                continue;
            };

            for (name, reference_value) in &reference_snapshot.attributes {
                match candidate_snapshot.attributes.get(name) {
                    None => differences.push(Difference::attribute_missing(tag, name)),
                    Some(candidate_value) if candidate_value != reference_value => {
                        differences.push(Difference::attribute_mismatch(tag, name));
                    }
                    Some(_) => {}
                }
            }

            if reference_snapshot.text != candidate_snapshot.text {
                differences.push(Difference::text_mismatch(tag));
            }
        }
    }

    for (tag, _) in candidate.iter() {
        if !reference.contains_tag(tag) {
            differences.push(Difference::extra_tag(tag));
        }
    }

    differences
}
