//! Difference records produced by the diff engine and pair processor.

use serde::Serialize;
use std::fmt;

/// Closed taxonomy of divergences between a reference and a candidate
/// document.
///
/// `ParseError` and `MissingInput` are produced by the pair processor, not
/// the comparator: per-pair failures surface as difference records so the
/// final report lists every requested pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DifferenceKind {
    /// Reference has an element (at some index) the candidate lacks
    TagMissing,
    /// A reference attribute is absent from the aligned candidate element
    AttributeMissing,
    /// An attribute is present on both sides with different values
    AttributeMismatch,
    /// Direct text differs between aligned elements
    TextMismatch,
    /// Candidate has a tag name the reference never uses
    ExtraTag,
    /// One side's document text failed to parse
    ParseError,
    /// One side's document text was unavailable
    MissingInput,
}

impl DifferenceKind {
    /// Human-readable label used in report rows.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TagMissing => "Tag missing",
            Self::AttributeMissing => "Attribute missing",
            Self::AttributeMismatch => "Attribute mismatch",
            Self::TextMismatch => "Text mismatch",
            Self::ExtraTag => "Extra tag",
            Self::ParseError => "Parse error",
            Self::MissingInput => "Missing input",
        }
    }
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Placeholder for the attribute column when it does not apply.
pub const NO_ATTRIBUTE: &str = "-";

/// Attribute column marker for text mismatches.
pub const TEXT_MARKER: &str = "(text)";

/// One divergence between a reference and candidate document.
///
/// `tag_path` is a bare tag name, not an ancestor-qualified path — the
/// flattener's tag-only grouping means no more precise location exists.
/// For `ParseError` records it holds the side label and `attribute` holds
/// the parser's message; for `MissingInput` it names the missing side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Difference {
    pub kind: DifferenceKind,
    pub tag_path: String,
    pub attribute: String,
}

impl Difference {
    #[must_use]
    pub fn tag_missing(tag: impl Into<String>) -> Self {
        Self {
            kind: DifferenceKind::TagMissing,
            tag_path: tag.into(),
            attribute: NO_ATTRIBUTE.to_string(),
        }
    }

    #[must_use]
    pub fn attribute_missing(tag: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            kind: DifferenceKind::AttributeMissing,
            tag_path: tag.into(),
            attribute: attribute.into(),
        }
    }

    #[must_use]
    pub fn attribute_mismatch(tag: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            kind: DifferenceKind::AttributeMismatch,
            tag_path: tag.into(),
            attribute: attribute.into(),
        }
    }

    #[must_use]
    pub fn text_mismatch(tag: impl Into<String>) -> Self {
        Self {
            kind: DifferenceKind::TextMismatch,
            tag_path: tag.into(),
            attribute: TEXT_MARKER.to_string(),
        }
    }

    #[must_use]
    pub fn extra_tag(tag: impl Into<String>) -> Self {
        Self {
            kind: DifferenceKind::ExtraTag,
            tag_path: tag.into(),
            attribute: NO_ATTRIBUTE.to_string(),
        }
    }

    /// Parse failure on one side; `side` is the side label and `message`
    /// the parser's error text.
    #[must_use]
    pub fn parse_error(side: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DifferenceKind::ParseError,
            tag_path: side.into(),
            attribute: message.into(),
        }
    }

    /// Document text unavailable; `side` names which side is missing.
    #[must_use]
    pub fn missing_input(side: impl Into<String>) -> Self {
        Self {
            kind: DifferenceKind::MissingInput,
            tag_path: side.into(),
            attribute: NO_ATTRIBUTE.to_string(),
        }
    }

    /// The aggregation signature identifying this class of divergence.
    #[must_use]
    pub fn signature(&self) -> (DifferenceKind, &str, &str) {
        (self.kind, self.tag_path.as_str(), self.attribute.as_str())
    }
}

/// All differences found for one reference/candidate pair.
///
/// `identifier` is the external pair id (id-pair lookup) or the 1-based
/// position (bulk scan). Consumed by a reporter; not retained afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairResult {
    pub identifier: String,
    pub differences: Vec<Difference>,
}

impl PairResult {
    #[must_use]
    pub fn new(identifier: impl Into<String>, differences: Vec<Difference>) -> Self {
        Self {
            identifier: identifier.into(),
            differences,
        }
    }

    /// True when the pair produced no differences of any kind.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.differences.is_empty()
    }
}
