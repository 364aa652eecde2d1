//! Document sources.
//!
//! Retrieval is a capability object handed to the batch drivers, with an
//! explicit lifecycle: open before the batch, dropped after. The core never
//! touches a connection directly — it only consumes "document text, or
//! absence" per identifier. Sources honor an optional [`Deadline`], the
//! only place in the pipeline where blocking I/O happens.

mod pairs;
mod sqlite;

pub use pairs::{parse_pair_list, read_pair_list, IdPair};
pub use sqlite::SqliteSource;

use crate::error::{ReconcileError, Result, SourceErrorKind};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Wall-clock deadline threaded through document-source calls.
///
/// `Deadline::none()` never expires. Expiry is checked before each fetch;
/// an in-flight query is not interrupted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// A deadline that never expires.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Expire `timeout` from now.
    #[must_use]
    pub fn after(timeout: Duration) -> Self {
        Self(Some(Instant::now() + timeout))
    }

    /// Whether the deadline has passed.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }

    /// Fail with a source error if the deadline has passed.
    pub fn check(&self, operation: &str) -> Result<()> {
        if self.expired() {
            Err(ReconcileError::source(
                operation.to_string(),
                SourceErrorKind::DeadlineExceeded {
                    operation: operation.to_string(),
                },
            ))
        } else {
            Ok(())
        }
    }
}

/// Capability to retrieve document text by identifier or by bounded scan.
pub trait DocumentSource {
    /// Fetch one document by identifier. `Ok(None)` means the identifier
    /// has no document — a per-pair condition, not an error.
    fn fetch(&self, id: &str, deadline: Deadline) -> Result<Option<String>>;

    /// Fetch up to `limit` documents from a named collection in stable
    /// storage order. A failure here is fatal to a bulk scan.
    fn fetch_all(&self, collection: &str, limit: usize, deadline: Deadline)
        -> Result<Vec<String>>;
}

/// In-memory source for tests and library embedding.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    documents: HashMap<String, String>,
    collections: HashMap<String, Vec<String>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under an identifier.
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(id.into(), text.into());
    }

    /// Register an ordered collection of documents.
    pub fn insert_collection(&mut self, name: impl Into<String>, documents: Vec<String>) {
        self.collections.insert(name.into(), documents);
    }
}

impl DocumentSource for MemorySource {
    fn fetch(&self, id: &str, deadline: Deadline) -> Result<Option<String>> {
        deadline.check("memory fetch")?;
        Ok(self.documents.get(id).cloned())
    }

    fn fetch_all(
        &self,
        collection: &str,
        limit: usize,
        deadline: Deadline,
    ) -> Result<Vec<String>> {
        deadline.check("memory scan")?;
        match self.collections.get(collection) {
            Some(documents) => Ok(documents.iter().take(limit).cloned().collect()),
            None => Err(ReconcileError::source(
                format!("scanning collection {collection:?}"),
                SourceErrorKind::InvalidCollection(collection.to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_none_never_expires() {
        let deadline = Deadline::none();
        assert!(!deadline.expired());
        assert!(deadline.check("noop").is_ok());
    }

    #[test]
    fn test_deadline_in_past_expires() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.expired());
        let err = deadline.check("fetch").expect_err("should fail");
        assert!(err.to_string().contains("fetch"));
    }

    #[test]
    fn test_memory_source_fetch() {
        let mut source = MemorySource::new();
        source.insert("o-1", "<order/>");

        let found = source.fetch("o-1", Deadline::none()).unwrap();
        assert_eq!(found.as_deref(), Some("<order/>"));

        let absent = source.fetch("o-2", Deadline::none()).unwrap();
        assert!(absent.is_none());
    }

    #[test]
    fn test_memory_source_scan_respects_limit() {
        let mut source = MemorySource::new();
        source.insert_collection(
            "orders",
            vec!["<a/>".to_string(), "<b/>".to_string(), "<c/>".to_string()],
        );

        let two = source.fetch_all("orders", 2, Deadline::none()).unwrap();
        assert_eq!(two, vec!["<a/>", "<b/>"]);

        assert!(source.fetch_all("missing", 2, Deadline::none()).is_err());
    }
}
