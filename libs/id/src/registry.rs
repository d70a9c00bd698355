//! Prefix registry.
//!
//! Maps each registered prefix to the model type that owns it, together with
//! that type's [`Locatable`] capability, and holds the active
//! [`IdGenerator`].
//!
//! The registry is populated once at startup and read on every create and
//! lookup, so both halves sit behind read-write locks. Locks are released
//! before any store or generator is called.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::IdConfig;
use crate::generator::IdGenerator;
use crate::model::PrefixedModel;
use crate::store::{Locatable, ModelStore, StoreLocator};

/// A type-erased locator as held by the registry.
pub type Locator<R> = Arc<dyn Locatable<R>>;

/// Prefix registry and resolver for the record set `R`.
pub struct Registry<R> {
    config: IdConfig,
    prefixes: RwLock<BTreeMap<String, Locator<R>>>,
    generator: RwLock<Arc<dyn IdGenerator>>,
}

impl<R> Registry<R> {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(IdConfig::default())
    }

    /// Creates an empty registry using `config`'s generator.
    pub fn with_config(config: IdConfig) -> Self {
        let generator: Arc<dyn IdGenerator> = Arc::from(config.build_generator());
        Self {
            config,
            prefixes: RwLock::new(BTreeMap::new()),
            generator: RwLock::new(generator),
        }
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &IdConfig {
        &self.config
    }

    /// Registers `(prefix, locator)` pairs.
    ///
    /// Entries are merged into the existing mapping. A prefix that is already
    /// registered is overwritten. A model type registered under a new prefix
    /// loses its previous one, so each type owns at most one prefix.
    pub fn register_models<I, P>(&self, entries: I)
    where
        I: IntoIterator<Item = (P, Locator<R>)>,
        P: Into<String>,
    {
        let mut prefixes = self.prefixes.write();

        for (prefix, locator) in entries {
            let prefix = prefix.into();
            let model = locator.model_name();

            prefixes.retain(|existing, other| {
                let displaced = *existing != prefix && other.model_name() == model;
                if displaced {
                    warn!(model, old_prefix = %existing, new_prefix = %prefix, "Model re-registered under a new prefix");
                }
                !displaced
            });

            if let Some(previous) = prefixes.insert(prefix.clone(), locator) {
                if previous.model_name() != model {
                    warn!(%prefix, previous = previous.model_name(), model, "Prefix reassigned to another model");
                }
            }

            debug!(%prefix, model, "Registered model prefix");
        }
    }

    /// Registers a single model type backed by `store`.
    pub fn register_store<M, S>(&self, prefix: &str, store: S)
    where
        M: PrefixedModel + Into<R> + 'static,
        S: ModelStore<M> + 'static,
    {
        let locator: Locator<R> = Arc::new(StoreLocator::<M, S>::new(store));
        self.register_models([(prefix, locator)]);
    }

    /// Removes every registered prefix.
    pub fn clear_registered_models(&self) {
        let mut prefixes = self.prefixes.write();
        debug!(count = prefixes.len(), "Clearing registered model prefixes");
        prefixes.clear();
    }

    /// Installs the generator used for every subsequent ID.
    ///
    /// Any `Fn() -> String + Send + Sync` closure qualifies. A generator
    /// returning a constant makes every ID of a type identical; that is the
    /// caller's choice.
    pub fn set_id_generator<G>(&self, generator: G)
    where
        G: IdGenerator + 'static,
    {
        let generator: Arc<dyn IdGenerator> = Arc::new(generator);
        *self.generator.write() = generator;
        debug!("Installed custom id generator");
    }

    /// Restores the generator chosen by the registry's configuration.
    pub fn reset_id_generator(&self) {
        *self.generator.write() = Arc::from(self.config.build_generator());
        debug!(generator = %self.config.generator, "Restored default id generator");
    }

    /// The prefix registered for `model_name`.
    pub fn prefix_for(&self, model_name: &str) -> Option<String> {
        self.prefixes
            .read()
            .iter()
            .find(|(_, locator)| locator.model_name() == model_name)
            .map(|(prefix, _)| prefix.clone())
    }

    /// The model type registered under exactly `prefix`.
    pub fn model_for(&self, prefix: &str) -> Option<&'static str> {
        self.prefixes
            .read()
            .get(prefix)
            .map(|locator| locator.model_name())
    }

    /// Whether `model_name` currently has a prefix.
    pub fn is_registered(&self, model_name: &str) -> bool {
        self.prefix_for(model_name).is_some()
    }

    /// All registered prefixes, sorted.
    pub fn registered_prefixes(&self) -> Vec<String> {
        self.prefixes.read().keys().cloned().collect()
    }

    /// The longest registered prefix of `prefixed_id` and its locator.
    pub(crate) fn route(&self, prefixed_id: &str) -> Option<(String, Locator<R>)> {
        self.prefixes
            .read()
            .iter()
            .filter(|(prefix, _)| prefixed_id.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(prefix, locator)| (prefix.clone(), Arc::clone(locator)))
    }

    pub(crate) fn generator(&self) -> Arc<dyn IdGenerator> {
        Arc::clone(&self.generator.read())
    }
}

impl<R> Default for Registry<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Registry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefixes = self.prefixes.read();
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field(
                "prefixes",
                &prefixes
                    .iter()
                    .map(|(prefix, locator)| (prefix.as_str(), locator.model_name()))
                    .collect::<BTreeMap<_, _>>(),
            )
            .finish()
    }
}
