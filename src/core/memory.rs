use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::traits::{Entity, Repository};
use crate::core::{AppError, Result};

/// In-process store for offline runs and tests
///
/// Mirrors the MySQL repositories: inserts only, duplicate identities are
/// rejected, and surrogate ids are generated from a sequence starting at 1.
pub struct MemoryStore<T: Entity> {
    rows: RwLock<Vec<T>>,
    sequence: AtomicU64,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Create a store pre-populated with rows, bypassing identity checks
    pub fn with_rows(rows: Vec<T>) -> Self {
        let sequence = AtomicU64::new(rows.len() as u64);
        Self {
            rows: RwLock::new(rows),
            sequence,
        }
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Rows matching a predicate, in insertion order
    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryStore<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut rows = self.rows.write().await;
        let id = entity.id();
        if rows.iter().any(|row| row.id() == id) {
            return Err(AppError::Database(sqlx::Error::Protocol(format!(
                "Duplicate entry {:?} for {}",
                id,
                T::KIND
            ))));
        }

        let row_id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = entity.with_generated(row_id);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &T::Id) -> Result<Option<T>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|row| row.id() == *id)
            .cloned())
    }

    async fn all(&self) -> Result<Vec<T>> {
        Ok(self.rows.read().await.clone())
    }
}
