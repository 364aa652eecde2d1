//! Data model for parsed and canonicalized XML documents.
//!
//! [`XmlElement`] is the parsed tree produced by the parser.
//! [`FlattenedDocument`] is the canonical comparable form the diff engine
//! operates on: tag-keyed ordered sequences of [`ElementSnapshot`]s,
//! deliberately discarding hierarchical path information (see
//! [`flatten`] for the grouping rules).

mod element;
mod flattened;

pub use element::*;
pub use flattened::*;
