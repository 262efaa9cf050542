//! Storage collaborator boundary.
//!
//! `StorageTrait` is the key-value contract the form controller persists
//! through: one bookmark sequence per user, read and written whole.

use std::collections::HashMap;

use crate::types::bookmark::{Bookmark, UserId};
use crate::types::errors::StorageError;

/// Trait defining the storage collaborator consumed by the controller.
pub trait StorageTrait {
    /// Known users, in the order they should be offered for selection.
    fn get_user_ids(&self) -> Result<Vec<UserId>, StorageError>;
    /// The user's bookmark sequence, or `None` if nothing was stored yet.
    fn get_data(&self, user_id: &UserId) -> Result<Option<Vec<Bookmark>>, StorageError>;
    /// Replaces the user's bookmark sequence.
    fn set_data(&mut self, user_id: &UserId, bookmarks: &[Bookmark]) -> Result<(), StorageError>;
}

/// Reads a user's bookmarks, degrading every failure to an empty list.
///
/// Callers never observe an error from this boundary.
pub fn safe_get_data<S: StorageTrait + ?Sized>(storage: &S, user_id: &UserId) -> Vec<Bookmark> {
    match storage.get_data(user_id) {
        Ok(Some(bookmarks)) => bookmarks,
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(user = %user_id, error = %e, "bookmark read failed, showing none");
            Vec::new()
        }
    }
}

/// In-process storage keeping every sequence in a map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    user_ids: Vec<UserId>,
    data: HashMap<UserId, Vec<Bookmark>>,
}

impl MemoryStorage {
    pub fn new(user_ids: Vec<UserId>) -> Self {
        Self {
            user_ids,
            data: HashMap::new(),
        }
    }

    /// Seeds a user's sequence directly, bypassing the controller.
    pub fn with_data(mut self, user_id: UserId, bookmarks: Vec<Bookmark>) -> Self {
        self.data.insert(user_id, bookmarks);
        self
    }
}

impl StorageTrait for MemoryStorage {
    fn get_user_ids(&self) -> Result<Vec<UserId>, StorageError> {
        Ok(self.user_ids.clone())
    }

    fn get_data(&self, user_id: &UserId) -> Result<Option<Vec<Bookmark>>, StorageError> {
        Ok(self.data.get(user_id).cloned())
    }

    fn set_data(&mut self, user_id: &UserId, bookmarks: &[Bookmark]) -> Result<(), StorageError> {
        self.data.insert(user_id.clone(), bookmarks.to_vec());
        Ok(())
    }
}
