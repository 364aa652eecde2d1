//! **Structural XML reconciliation and audit.**
//!
//! `xml-reconcile` audits pairs of semantically-equivalent XML documents
//! produced by two independent systems — typically two order-processing
//! pipelines that should emit matching records — and reports where their
//! structures diverge: missing elements, attribute mismatches, text
//! mismatches, extra elements.
//!
//! # How a comparison works
//!
//! Each document is parsed and [flattened](model::flatten) into a canonical
//! form: bare tag name → snapshots of every element with that tag, in
//! document order. [`diff::compare`] then walks the reference's tags and
//! aligns snapshots by traversal index, emitting a typed
//! [`Difference`](diff::Difference) for each divergence. The comparison is
//! asymmetric — the reference is ground truth and drives the iteration.
//!
//! Grouping is by bare tag name only, with no ancestor path. Elements
//! sharing a tag at different depths merge into one sequence and can
//! misalign when a tag repeats under different parents at different counts.
//! This matches the systems being reconciled and is kept for report
//! compatibility; the grouping key is built in one place
//! ([`model::flatten`]) so a path-qualified mode can be added later.
//!
//! # Reporting
//!
//! Per-pair results feed one of two [report](reports) strategies: a flat
//! per-pair listing for auditing individual pairs, or a deduplicated
//! aggregation keyed by difference signature for spotting systemic
//! divergences across a corpus. Both render as CSV or JSON.
//!
//! # Failure model
//!
//! A missing or malformed document never aborts a run: it becomes a
//! `Missing input` or `Parse error` record on that pair, and the report
//! always lists every requested pair. Only batch-level problems — an
//! unreachable collection in scan mode, a bad pair list — are hard errors.
//!
//! # Example
//!
//! ```
//! use xml_reconcile::pipeline::process_pair;
//!
//! let result = process_pair(
//!     "order-1001",
//!     Some(r#"<order><item sku="1">A</item></order>"#),
//!     Some(r#"<order><item sku="2">A</item></order>"#),
//! );
//! assert_eq!(result.differences.len(), 1);
//! assert_eq!(result.differences[0].tag_path, "item");
//! assert_eq!(result.differences[0].attribute, "sku");
//! ```

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod reports;
pub mod source;

pub use diff::{compare, Difference, DifferenceKind, PairResult};
pub use error::{ReconcileError, Result};
pub use model::{flatten, ElementSnapshot, FlattenedDocument, XmlElement};
pub use parser::{parse_document, ParseError};
