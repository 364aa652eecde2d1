//! Structural diff engine.
//!
//! [`compare`] computes the ordered set of differences between two
//! [`FlattenedDocument`](crate::model::FlattenedDocument)s. The comparison
//! is asymmetric: the first argument is the reference (ground truth) and
//! drives the tag and attribute iteration, so swapping arguments changes
//! which differences surface (missing vs. extra, and which side's
//! attribute set is checked).

mod engine;
mod result;

pub use engine::compare;
pub use result::{Difference, DifferenceKind, PairResult, NO_ATTRIBUTE, TEXT_MARKER};
