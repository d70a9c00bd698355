//! Storage capabilities consumed by the resolver.
//!
//! The persistence engine is external. A record type plugs into the registry
//! through a [`ModelStore`] (insert, find by prefixed ID), which
//! [`StoreLocator`] adapts into the object-safe [`Locatable`] capability the
//! registry routes to.

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::model::PrefixedModel;

/// Record storage for a single model type.
pub trait ModelStore<M>: Send + Sync {
    /// Persists a new record and returns it as stored.
    fn insert(&self, model: M) -> Result<M, StoreError>;

    /// Finds the record whose prefixed ID field equals `prefixed_id`.
    fn find_by_prefixed_id(&self, prefixed_id: &str) -> Result<Option<M>, StoreError>;
}

impl<M, S> ModelStore<M> for Arc<S>
where
    S: ModelStore<M> + ?Sized,
{
    fn insert(&self, model: M) -> Result<M, StoreError> {
        (**self).insert(model)
    }

    fn find_by_prefixed_id(&self, prefixed_id: &str) -> Result<Option<M>, StoreError> {
        (**self).find_by_prefixed_id(prefixed_id)
    }
}

/// Type-erased lookup the registry holds for each prefix.
///
/// `R` is the closed set of record types the registry can return.
pub trait Locatable<R>: Send + Sync {
    /// Name of the model type this locator serves.
    fn model_name(&self) -> &'static str;

    /// Finds the record stored under `prefixed_id`.
    fn locate(&self, prefixed_id: &str) -> Result<Option<R>, StoreError>;
}

/// Adapts a [`ModelStore<M>`] into a [`Locatable<R>`].
pub struct StoreLocator<M, S> {
    store: S,
    _model: PhantomData<fn() -> M>,
}

impl<M, S> StoreLocator<M, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _model: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<M, S, R> Locatable<R> for StoreLocator<M, S>
where
    M: PrefixedModel + Into<R>,
    S: ModelStore<M>,
{
    fn model_name(&self) -> &'static str {
        M::MODEL_NAME
    }

    fn locate(&self, prefixed_id: &str) -> Result<Option<R>, StoreError> {
        Ok(self.store.find_by_prefixed_id(prefixed_id)?.map(Into::into))
    }
}

/// Models with a store-assigned numeric primary key.
pub trait KeyedModel {
    /// Records the key assigned on insert.
    fn set_key(&mut self, key: u64);
}

/// In-process [`ModelStore`] with auto-increment keys.
///
/// Keys start at 1 per store. Inserting a second record with the same
/// prefixed ID fails with [`StoreError::Conflict`].
pub struct MemoryStore<M> {
    records: RwLock<Vec<M>>,
}

impl<M> MemoryStore<M> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<M> Default for MemoryStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> ModelStore<M> for MemoryStore<M>
where
    M: PrefixedModel + KeyedModel + Clone + Send + Sync,
{
    fn insert(&self, mut model: M) -> Result<M, StoreError> {
        let mut records = self.records.write();

        if records
            .iter()
            .any(|r| r.prefixed_id() == model.prefixed_id())
        {
            return Err(StoreError::Conflict {
                prefixed_id: model.prefixed_id().to_string(),
            });
        }

        model.set_key(records.len() as u64 + 1);
        records.push(model.clone());
        Ok(model)
    }

    fn find_by_prefixed_id(&self, prefixed_id: &str) -> Result<Option<M>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| r.prefixed_id() == prefixed_id)
            .cloned())
    }
}
