//! # prefixed-ids
//!
//! Human-readable, prefixed identifiers for records, decoupled from their
//! numeric primary keys.
//!
//! ## ID Format
//!
//! An ID is a registered prefix followed by a generated local ID:
//! `{prefix}{local_id}`. Prefixes carry their own delimiter by convention.
//!
//! Examples:
//! - `test_Xq3RkM9pL2aZbV7nT0cWy4Hd`
//! - `other_test_8FfJ2uQs0oYpLk1mN5vBzE3r`
//!
//! ## Design Principles
//!
//! - The prefix alone routes an ID back to its record type, with no lookup
//!   table in the database
//! - A record type owns at most one prefix at a time
//! - When registered prefixes nest, the longest match wins
//! - IDs are generated once, on creation; uniqueness is probabilistic
//! - Plain lookups return `Ok(None)` on a miss; `*_or_fail` variants error
//!
//! ## Usage
//!
//! ```ignore
//! let registry: Registry<Record> = Registry::with_config(IdConfig::from_env());
//! registry.register_store::<User, _>("user_", users.clone());
//! registry.register_store::<Team, _>("team_", teams.clone());
//!
//! let user = User::create(&registry, &users, User::default())?;
//! let found = registry.find_or_fail(&user.prefixed_id)?;
//! ```

mod config;
mod error;
mod generator;
mod macros;
mod model;
mod registry;
mod resolver;
mod store;
mod types;

pub use config::{ConfigError, IdConfig, ENV_GENERATOR, ENV_LENGTH};
pub use error::{PrefixedIdError, Result, StoreError};
pub use generator::{
    GeneratorKind, IdGenerator, RandomIdGenerator, UlidIdGenerator, UnknownGenerator,
    UuidIdGenerator, DEFAULT_RANDOM_LENGTH,
};
pub use model::PrefixedModel;
pub use registry::{Locator, Registry};
pub use store::{KeyedModel, Locatable, MemoryStore, ModelStore, StoreLocator};
pub use types::{PrefixedId, DELIMITER};
