//! SQLite-backed document source.
//!
//! Documents live in tables with an `order_id` text key and an
//! `xml_content` text column. Table names come from user configuration and
//! cannot be bound as SQL parameters, so they are validated as plain
//! identifiers before interpolation.

use crate::error::{ReconcileError, Result, SourceErrorKind};
use crate::source::{Deadline, DocumentSource};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::Path;

/// Document source over a SQLite database file.
pub struct SqliteSource {
    connection: Connection,
    table: String,
}

impl SqliteSource {
    /// Open a database read-only, fetching single documents from `table`.
    pub fn open(path: &Path, table: impl Into<String>) -> Result<Self> {
        let table = table.into();
        validate_identifier(&table)?;
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            ReconcileError::source(
                format!("opening database {}", path.display()),
                SourceErrorKind::Database(e.to_string()),
            )
        })?;
        Ok(Self { connection, table })
    }
}

impl DocumentSource for SqliteSource {
    fn fetch(&self, id: &str, deadline: Deadline) -> Result<Option<String>> {
        deadline.check("sqlite fetch")?;
        let sql = format!("SELECT xml_content FROM {} WHERE order_id = ?1", self.table);
        let document = self
            .connection
            .query_row(&sql, [id], |row| row.get::<_, String>(0))
            .optional()
            .map_err(|e| {
                ReconcileError::source(
                    format!("fetching document {id:?} from {:?}", self.table),
                    SourceErrorKind::Database(e.to_string()),
                )
            })?;
        Ok(document)
    }

    fn fetch_all(
        &self,
        collection: &str,
        limit: usize,
        deadline: Deadline,
    ) -> Result<Vec<String>> {
        deadline.check("sqlite scan")?;
        validate_identifier(collection)?;
        let sql = format!(
            "SELECT xml_content FROM {collection} ORDER BY rowid LIMIT ?1"
        );
        let mut statement = self.connection.prepare(&sql).map_err(|e| {
            ReconcileError::source(
                format!("scanning collection {collection:?}"),
                SourceErrorKind::Database(e.to_string()),
            )
        })?;
        let rows = statement
            .query_map([limit as i64], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<String>>>())
            .map_err(|e| {
                ReconcileError::source(
                    format!("scanning collection {collection:?}"),
                    SourceErrorKind::Database(e.to_string()),
                )
            })?;
        Ok(rows)
    }
}

/// Reject anything that is not a plain SQL identifier.
fn validate_identifier(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ReconcileError::source(
            "validating collection name",
            SourceErrorKind::InvalidCollection(name.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("orders").is_ok());
        assert!(validate_identifier("wcs_2024").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1orders").is_err());
        assert!(validate_identifier("orders; DROP TABLE x").is_err());
        assert!(validate_identifier("orders--").is_err());
    }
}
