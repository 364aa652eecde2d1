//! Parsed XML tree representation.

use indexmap::IndexMap;

/// A single element in a parsed XML tree.
///
/// Attributes are kept in document order in an insertion-ordered map;
/// duplicate attribute names are impossible in well-formed XML. `text` is
/// the element's *direct* text content — the character data appearing
/// before the first child — untrimmed as parsed. Descendant text belongs
/// to the descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Bare tag name (namespaces are out of scope; prefixes are kept as-is)
    pub tag: String,
    /// Attribute name → value, in document order
    pub attributes: IndexMap<String, String>,
    /// Direct text content, or empty if none
    pub text: String,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an element with no attributes, text, or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Total number of elements in this subtree, including `self`.
    #[must_use]
    pub fn element_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(XmlElement::element_count)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_count_single() {
        assert_eq!(XmlElement::new("order").element_count(), 1);
    }

    #[test]
    fn test_element_count_nested() {
        let mut root = XmlElement::new("order");
        let mut item = XmlElement::new("item");
        item.children.push(XmlElement::new("sku"));
        root.children.push(item);
        root.children.push(XmlElement::new("note"));
        assert_eq!(root.element_count(), 4);
    }
}
