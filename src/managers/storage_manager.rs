//! SQLite-backed storage collaborator.
//!
//! Each user owns one row in `user_bookmarks` holding the whole bookmark
//! sequence as JSON. Writes replace the row; there are no partial updates.

use std::sync::Arc;

use rusqlite::{params, OptionalExtension};

use crate::database::connection::Database;
use crate::services::storage::StorageTrait;
use crate::types::bookmark::{Bookmark, UserId};
use crate::types::errors::StorageError;

/// Storage manager backed by the shared database.
pub struct StorageManager {
    db: Arc<Database>,
}

impl StorageManager {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Registers users that are not yet known, appending them in the given order.
    ///
    /// Returns how many users were added.
    pub fn seed_users(&self, user_ids: &[UserId]) -> Result<usize, StorageError> {
        let conn = self.db.connection();
        let mut next: i64 = conn.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM users",
            [],
            |row| row.get(0),
        )?;

        let mut added = 0;
        for id in user_ids {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO users (id, position) VALUES (?1, ?2)",
                params![id.as_str(), next],
            )?;
            if inserted > 0 {
                next += 1;
                added += 1;
            }
        }
        if added > 0 {
            tracing::info!(added, "registered users");
        }
        Ok(added)
    }

    fn user_exists(&self, user_id: &UserId) -> Result<bool, StorageError> {
        let count: i64 = self.db.connection().query_row(
            "SELECT COUNT(*) FROM users WHERE id = ?1",
            params![user_id.as_str()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl StorageTrait for StorageManager {
    fn get_user_ids(&self) -> Result<Vec<UserId>, StorageError> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare("SELECT id FROM users ORDER BY position")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(UserId::from(row?));
        }
        Ok(ids)
    }

    fn get_data(&self, user_id: &UserId) -> Result<Option<Vec<Bookmark>>, StorageError> {
        let raw: Option<String> = self
            .db
            .connection()
            .query_row(
                "SELECT data FROM user_bookmarks WHERE user_id = ?1",
                params![user_id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        raw.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| StorageError::SerializationError(e.to_string()))
        })
        .transpose()
    }

    fn set_data(&mut self, user_id: &UserId, bookmarks: &[Bookmark]) -> Result<(), StorageError> {
        if !self.user_exists(user_id)? {
            return Err(StorageError::UnknownUser(user_id.to_string()));
        }

        let json = serde_json::to_string(bookmarks)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        self.db.connection().execute(
            "INSERT INTO user_bookmarks (user_id, data, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
            params![user_id.as_str(), json, chrono::Utc::now().timestamp()],
        )?;
        tracing::debug!(user = %user_id, count = bookmarks.len(), "bookmarks written");
        Ok(())
    }
}
