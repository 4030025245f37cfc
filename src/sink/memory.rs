use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::error::{UploadError, UploadResult};

use super::{Repository, Stored};

/// Keeps saved records in memory with auto-increment ids.
pub struct InMemoryRepository<T> {
    collection: &'static str,
    inner: Mutex<Vec<Stored<T>>>,
}

impl<T> InMemoryRepository<T> {
    /// Create an empty repository. `collection` names it in error messages.
    pub fn new(collection: &'static str) -> Self {
        Self {
            collection,
            inner: Mutex::new(Vec::new()),
        }
    }

    /// Number of stored records.
    ///
    /// Still answers after a writer panicked while holding the lock; only [`Repository::save_all`]
    /// refuses a poisoned repository.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> InMemoryRepository<T> {
    /// Stored records with their ids, in save order.
    pub fn stored(&self) -> Vec<Stored<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Stored records without ids, in save order.
    pub fn records(&self) -> Vec<T> {
        self.stored().into_iter().map(|s| s.record).collect()
    }
}

impl<T> fmt::Debug for InMemoryRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("collection", &self.collection)
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Send> Repository<T> for InMemoryRepository<T> {
    fn save_all(&self, records: Vec<T>) -> UploadResult<()> {
        let mut guard = self.inner.lock().map_err(|_| UploadError::Persist {
            collection: self.collection,
            message: "repository lock poisoned".to_string(),
        })?;
        let mut next_id = guard.last().map_or(1, |s| s.id + 1);
        for record in records {
            guard.push(Stored { id: next_id, record });
            next_id += 1;
        }
        Ok(())
    }
}
