//! Prefix-routed ID generation and lookup.

use tracing::debug;

use crate::error::{PrefixedIdError, Result};
use crate::registry::Registry;
use crate::types::PrefixedId;

impl<R> Registry<R> {
    /// Generates a prefixed ID for `model_name`: its prefix followed by a
    /// fresh local ID from the installed generator.
    ///
    /// Collisions are not checked.
    pub fn generate_id_for(&self, model_name: &str) -> Result<String> {
        let prefix = self
            .prefix_for(model_name)
            .ok_or_else(|| PrefixedIdError::not_configured(model_name))?;

        let local_id = self.generator().generate();
        Ok(PrefixedId::new(&prefix, &local_id).into_string())
    }

    /// Splits `prefixed_id` at its longest registered prefix.
    pub fn parse(&self, prefixed_id: &str) -> Option<PrefixedId> {
        let (prefix, _) = self.route(prefixed_id)?;
        PrefixedId::with_prefix(prefixed_id, &prefix)
    }

    /// Finds the record identified by `prefixed_id`.
    ///
    /// The longest registered prefix of the ID picks the model type, whose
    /// store is then queried for the full ID. Returns `Ok(None)` when no
    /// prefix matches or the record does not exist; errors come only from
    /// the store.
    pub fn find(&self, prefixed_id: &str) -> Result<Option<R>> {
        let Some((prefix, locator)) = self.route(prefixed_id) else {
            debug!(%prefixed_id, "No registered prefix matches id");
            return Ok(None);
        };

        debug!(%prefixed_id, %prefix, model = locator.model_name(), "Resolving prefixed id");
        Ok(locator.locate(prefixed_id)?)
    }

    /// Like [`find`](Self::find), failing with
    /// [`PrefixedIdError::NoPrefixedModelFound`] on a miss.
    pub fn find_or_fail(&self, prefixed_id: &str) -> Result<R> {
        self.find(prefixed_id)?
            .ok_or_else(|| PrefixedIdError::not_found(prefixed_id))
    }
}
