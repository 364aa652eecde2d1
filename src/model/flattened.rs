//! Canonical flattened form of a parsed XML tree.
//!
//! Flattening canonicalizes a tree into tag-keyed ordered sequences of
//! snapshots so two documents can be compared positionally. The grouping
//! key is the **bare tag name only**: elements sharing a tag name at
//! different depths or under different ancestors are merged into one
//! sequence and matched purely by traversal-order index. This is an
//! inherited compatibility behavior, not an oversight — key construction
//! lives entirely in [`flatten`] so a path-qualified key could be added
//! later without touching the comparator.

use crate::model::XmlElement;
use indexmap::IndexMap;
use serde::Serialize;

/// Immutable snapshot of one element: its attributes and trimmed direct text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSnapshot {
    /// Attribute name → value, in document order
    pub attributes: IndexMap<String, String>,
    /// Direct text content with leading/trailing whitespace stripped
    pub text: String,
}

impl ElementSnapshot {
    fn from_element(element: &XmlElement) -> Self {
        Self {
            attributes: element.attributes.clone(),
            text: element.text.trim().to_string(),
        }
    }
}

/// A document canonicalized for comparison.
///
/// Maps bare tag name → snapshots of every element with that tag, in
/// document (pre-order, depth-first) traversal order. Tags iterate in
/// first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedDocument {
    groups: IndexMap<String, Vec<ElementSnapshot>>,
}

impl FlattenedDocument {
    /// Snapshots for a tag, if any element with that tag exists.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&[ElementSnapshot]> {
        self.groups.get(tag).map(Vec::as_slice)
    }

    /// Whether any element with this tag was seen.
    #[must_use]
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.groups.contains_key(tag)
    }

    /// Tags in first-occurrence order, each with its snapshot sequence.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ElementSnapshot])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total snapshot count across all tags.
    ///
    /// Equals the element count of the source tree.
    #[must_use]
    pub fn snapshot_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of distinct tags.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.groups.len()
    }
}

/// Flatten a parsed tree into its canonical comparable form.
///
/// Visits elements depth-first in pre-order (a node before its children,
/// children in document order) and appends a snapshot to the sequence for
/// the element's tag, creating the sequence on first occurrence. Direct
/// text is trimmed; absent text is already normalized to `""` by the
/// parser. Flattening cannot fail.
///
/// Uses an explicit work stack so arbitrarily deep documents do not grow
/// the call stack.
#[must_use]
pub fn flatten(root: &XmlElement) -> FlattenedDocument {
    let mut groups: IndexMap<String, Vec<ElementSnapshot>> = IndexMap::new();
    let mut stack: Vec<&XmlElement> = vec![root];

    while let Some(element) = stack.pop() {
        groups
            .entry(element.tag.clone())
            .or_default()
            .push(ElementSnapshot::from_element(element));
        // Reverse push keeps children in document order on a LIFO stack.
        for child in element.children.iter().rev() {
            stack.push(child);
        }
    }

    FlattenedDocument { groups }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, text: &str, children: Vec<XmlElement>) -> XmlElement {
        XmlElement {
            tag: tag.to_string(),
            attributes: IndexMap::new(),
            text: text.to_string(),
            children,
        }
    }

    #[test]
    fn test_flatten_preserves_element_count() {
        let tree = element(
            "order",
            "",
            vec![
                element("item", "A", vec![element("sku", "1", vec![])]),
                element("item", "B", vec![]),
            ],
        );
        let flat = flatten(&tree);
        assert_eq!(flat.snapshot_count(), tree.element_count());
    }

    #[test]
    fn test_flatten_groups_by_bare_tag() {
        // Same tag at two depths merges into one sequence.
        let tree = element(
            "order",
            "",
            vec![
                element("note", "outer", vec![element("note", "inner", vec![])]),
                element("note", "last", vec![]),
            ],
        );
        let flat = flatten(&tree);
        let notes = flat.get("note").expect("note group");
        assert_eq!(notes.len(), 3);
        // Pre-order: outer before its nested child, nested before the sibling.
        assert_eq!(notes[0].text, "outer");
        assert_eq!(notes[1].text, "inner");
        assert_eq!(notes[2].text, "last");
    }

    #[test]
    fn test_flatten_trims_text() {
        let tree = element("order", "  padded  ", vec![]);
        let flat = flatten(&tree);
        assert_eq!(flat.get("order").unwrap()[0].text, "padded");
    }

    #[test]
    fn test_flatten_first_occurrence_tag_order() {
        let tree = element(
            "order",
            "",
            vec![
                element("shipping", "", vec![]),
                element("item", "", vec![]),
                element("shipping", "", vec![]),
            ],
        );
        let flat = flatten(&tree);
        let tags: Vec<&str> = flat.iter().map(|(t, _)| t).collect();
        assert_eq!(tags, vec!["order", "shipping", "item"]);
    }

    #[test]
    fn test_flatten_copies_attributes() {
        let mut tree = element("item", "", vec![]);
        tree.attributes.insert("sku".to_string(), "1".to_string());
        tree.attributes.insert("qty".to_string(), "2".to_string());
        let flat = flatten(&tree);
        let snap = &flat.get("item").unwrap()[0];
        assert_eq!(snap.attributes.get("sku").map(String::as_str), Some("1"));
        assert_eq!(snap.attributes.get("qty").map(String::as_str), Some("2"));
    }
}
