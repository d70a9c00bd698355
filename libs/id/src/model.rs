//! Per-model helpers: generate an ID on creation, look records up by it.

use tracing::debug;

use crate::error::{PrefixedIdError, Result};
use crate::registry::Registry;
use crate::store::ModelStore;

/// A record type whose instances carry a prefixed ID.
///
/// Usually implemented with [`prefixed_model!`](crate::prefixed_model).
pub trait PrefixedModel: Sized {
    /// Name the registry knows this model type by.
    const MODEL_NAME: &'static str;

    /// The stored prefixed ID. Empty until the record is created.
    fn prefixed_id(&self) -> &str;

    /// Assigns the prefixed ID. Called once, on creation.
    fn set_prefixed_id(&mut self, prefixed_id: String);

    /// Generates a prefixed ID for `model` and inserts it into `store`.
    ///
    /// Fails with [`PrefixedIdError::NoPrefixConfiguredForModel`] when this
    /// model type has no registered prefix; nothing is inserted in that case.
    fn create<R, S>(registry: &Registry<R>, store: &S, mut model: Self) -> Result<Self>
    where
        S: ModelStore<Self> + ?Sized,
    {
        let prefixed_id = registry.generate_id_for(Self::MODEL_NAME)?;
        debug!(model = Self::MODEL_NAME, prefixed_id = %prefixed_id, "Creating record");
        model.set_prefixed_id(prefixed_id);
        Ok(store.insert(model)?)
    }

    /// Finds a record of this type by its prefixed ID, without prefix routing.
    fn find_by_prefixed_id<S>(store: &S, prefixed_id: &str) -> Result<Option<Self>>
    where
        S: ModelStore<Self> + ?Sized,
    {
        Ok(store.find_by_prefixed_id(prefixed_id)?)
    }

    /// Like [`find_by_prefixed_id`](Self::find_by_prefixed_id), failing with
    /// [`PrefixedIdError::NoPrefixedModelFound`] on a miss.
    fn find_by_prefixed_id_or_fail<S>(store: &S, prefixed_id: &str) -> Result<Self>
    where
        S: ModelStore<Self> + ?Sized,
    {
        Self::find_by_prefixed_id(store, prefixed_id)?
            .ok_or_else(|| PrefixedIdError::not_found(prefixed_id))
    }

    /// The prefix registered for this model type, if any.
    fn registered_prefix<R>(registry: &Registry<R>) -> Option<String> {
        registry.prefix_for(Self::MODEL_NAME)
    }
}
