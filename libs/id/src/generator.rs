//! Local ID generation strategies.
//!
//! The registry appends whatever an [`IdGenerator`] returns to a model's
//! prefix. Uniqueness is probabilistic and rests on the generator's entropy;
//! nothing here checks for collisions.

use std::fmt;
use std::str::FromStr;

use rand::distr::Alphanumeric;
use rand::Rng;
use tracing::warn;

/// Default number of characters produced by [`RandomIdGenerator`].
pub const DEFAULT_RANDOM_LENGTH: usize = 24;

/// Produces the local portion of a prefixed ID.
pub trait IdGenerator: Send + Sync {
    /// Returns a new local ID.
    fn generate(&self) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// ASCII alphanumeric IDs drawn from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomIdGenerator {
    length: usize,
}

impl RandomIdGenerator {
    /// Creates a generator producing `length` characters.
    #[must_use]
    pub const fn new(length: usize) -> Self {
        Self { length }
    }

    /// Number of characters per ID.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_RANDOM_LENGTH)
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

/// UUID v4 in its 32 character hyphenless form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// ULIDs, which sort by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UlidIdGenerator;

impl IdGenerator for UlidIdGenerator {
    fn generate(&self) -> String {
        ulid::Ulid::new().to_string()
    }
}

/// Selects one of the built-in generators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    #[default]
    Random,
    Uuid,
    Ulid,
}

impl GeneratorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorKind::Random => "random",
            GeneratorKind::Uuid => "uuid",
            GeneratorKind::Ulid => "ulid",
        }
    }

    /// Builds the generator. `random_length` only applies to `Random`; zero
    /// would yield empty local IDs and falls back to
    /// [`DEFAULT_RANDOM_LENGTH`].
    pub fn build(&self, random_length: usize) -> Box<dyn IdGenerator> {
        match self {
            GeneratorKind::Random => {
                let length = if random_length == 0 {
                    warn!(default = DEFAULT_RANDOM_LENGTH, "Random id length of 0 replaced by default");
                    DEFAULT_RANDOM_LENGTH
                } else {
                    random_length
                };
                Box::new(RandomIdGenerator::new(length))
            }
            GeneratorKind::Uuid => Box::new(UuidIdGenerator),
            GeneratorKind::Ulid => Box::new(UlidIdGenerator),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown generator name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown id generator '{0}', expected one of: random, uuid, ulid")]
pub struct UnknownGenerator(pub String);

impl FromStr for GeneratorKind {
    type Err = UnknownGenerator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(GeneratorKind::Random),
            "uuid" => Ok(GeneratorKind::Uuid),
            "ulid" => Ok(GeneratorKind::Ulid),
            _ => Err(UnknownGenerator(s.to_string())),
        }
    }
}
