use std::fmt::Debug;

use async_trait::async_trait;
use tracing::debug;

use crate::core::Result;

/// A cached row with a stable identity.
///
/// The identity is the key used for skip-on-exists writes. For rows with a
/// surrogate primary key it is the natural unique key instead.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Clone + PartialEq + Debug + Send + Sync;

    /// Human-readable entity kind used in logs and errors
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    /// Populate store-generated fields after an insert
    fn with_generated(self, _row_id: u64) -> Self {
        self
    }
}

/// Base repository trait for the cache tables
/// All repositories implement this trait so write semantics stay uniform
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert a row, commit, and return it with generated fields populated.
    /// Duplicate identities fail with a database error.
    async fn create(&self, entity: T) -> Result<T>;

    /// Find a row by identity
    async fn find_by_id(&self, id: &T::Id) -> Result<Option<T>>;

    /// Existence probe by identity
    async fn exists(&self, id: &T::Id) -> Result<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Full table scan
    async fn all(&self) -> Result<Vec<T>>;

    /// Insert every entity whose identity is not stored yet.
    ///
    /// Returns the stored row for each input, in input order, so re-running a
    /// write with the same payload never creates duplicates.
    async fn write_many(&self, entities: Vec<T>) -> Result<Vec<T>> {
        let mut persisted = Vec::with_capacity(entities.len());
        let mut skipped = 0usize;

        for entity in entities {
            let id = entity.id();
            match self.find_by_id(&id).await? {
                Some(existing) => {
                    skipped += 1;
                    persisted.push(existing);
                }
                None => persisted.push(self.create(entity).await?),
            }
        }

        debug!(
            kind = T::KIND,
            written = persisted.len() - skipped,
            skipped = skipped,
            "Batch write finished"
        );

        Ok(persisted)
    }
}
