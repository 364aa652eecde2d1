//! Cross-pair aggregation by difference signature.

use crate::diff::{DifferenceKind, PairResult};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;

/// One aggregated report row: a distinct difference signature and every
/// pair (1-based input position) that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateEntry {
    pub kind: DifferenceKind,
    pub tag_path: String,
    pub attribute: String,
    /// Ascending, deduplicated 1-based pair indices
    pub pair_indices: Vec<usize>,
}

impl AggregateEntry {
    /// Indices rendered as `(1, 2, 3)` for tabular output.
    #[must_use]
    pub fn indices_display(&self) -> String {
        let joined = self
            .pair_indices
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("({joined})")
    }
}

/// Fold per-pair results into one entry per distinct signature.
///
/// Pairs are visited in input order and indexed from 1; signatures keep
/// first-seen order. A signature occurring several times within one pair
/// still contributes that pair's index once.
#[must_use]
pub fn aggregate_signatures(results: &[PairResult]) -> Vec<AggregateEntry> {
    let mut grouped: IndexMap<(DifferenceKind, String, String), BTreeSet<usize>> = IndexMap::new();

    for (position, result) in results.iter().enumerate() {
        let index = position + 1;
        for difference in &result.differences {
            grouped
                .entry((
                    difference.kind,
                    difference.tag_path.clone(),
                    difference.attribute.clone(),
                ))
                .or_default()
                .insert(index);
        }
    }

    grouped
        .into_iter()
        .map(|((kind, tag_path, attribute), indices)| AggregateEntry {
            kind,
            tag_path,
            attribute,
            pair_indices: indices.into_iter().collect(),
        })
        .collect()
}
