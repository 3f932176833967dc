//! SQLite-backed store session.

use crate::store::{StoreResult, StoreSession};
use rusqlite::{params, Connection, OptionalExtension};

/// Wraps a live connection; cheap to construct per unit of work.
pub struct SqliteSession<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSession<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Loads one document body; read helper for callers and tests.
    pub fn load(&self, collection: &str, id: &str) -> StoreResult<Option<serde_json::Value>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND doc_id = ?2;",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        match body {
            Some(text) => {
                let value = serde_json::from_str(&text).map_err(crate::store::StoreError::Serialize)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Counts stored documents, optionally within one collection.
    pub fn count(&self, collection: Option<&str>) -> StoreResult<i64> {
        let count = match collection {
            Some(name) => self.conn.query_row(
                "SELECT COUNT(*) FROM documents WHERE collection = ?1;",
                params![name],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM documents;", [], |row| row.get(0))?,
        };
        Ok(count)
    }
}

impl StoreSession for SqliteSession<'_> {
    fn upsert(
        &mut self,
        collection: &str,
        id: &str,
        body: &serde_json::Value,
    ) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO documents (collection, doc_id, body)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (collection, doc_id) DO UPDATE SET
                body = excluded.body,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![collection, id, body.to_string()],
        )?;

        Ok(())
    }

    fn increment_sequence(&mut self, name: &str) -> StoreResult<Option<i64>> {
        // One statement keeps read-increment-write indivisible; upsert
        // correctness relies on the unique constraint on `name`.
        let value = self
            .conn
            .query_row(
                "INSERT INTO sequences (name, value)
                 VALUES (?1, 1)
                 ON CONFLICT (name) DO UPDATE SET value = value + 1
                 RETURNING value;",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }
}
