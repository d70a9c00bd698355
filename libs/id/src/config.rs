//! Registry configuration.

use tracing::warn;

use crate::generator::{GeneratorKind, IdGenerator, DEFAULT_RANDOM_LENGTH};

/// Environment variable selecting the default generator.
pub const ENV_GENERATOR: &str = "PREFIXED_IDS_GENERATOR";

/// Environment variable setting the random generator's length.
pub const ENV_LENGTH: &str = "PREFIXED_IDS_LENGTH";

/// Errors from validating an [`IdConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The random generator would produce empty local IDs.
    #[error("random_length must be a positive integer")]
    ZeroRandomLength,
}

/// Configuration for a [`Registry`](crate::Registry).
///
/// Deserialization rejects a `random_length` of zero.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawIdConfig")]
pub struct IdConfig {
    /// Generator used until one is installed with `set_id_generator`, and
    /// restored by `reset_id_generator`.
    pub generator: GeneratorKind,

    /// Length of IDs produced by the random generator.
    pub random_length: usize,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorKind::default(),
            random_length: DEFAULT_RANDOM_LENGTH,
        }
    }
}

/// Unvalidated shape of [`IdConfig`] as read by serde.
#[derive(serde::Deserialize)]
struct RawIdConfig {
    #[serde(default)]
    generator: GeneratorKind,
    #[serde(default = "default_random_length")]
    random_length: usize,
}

fn default_random_length() -> usize {
    DEFAULT_RANDOM_LENGTH
}

impl TryFrom<RawIdConfig> for IdConfig {
    type Error = ConfigError;

    fn try_from(raw: RawIdConfig) -> Result<Self, Self::Error> {
        let config = Self {
            generator: raw.generator,
            random_length: raw.random_length,
        };
        config.validate()?;
        Ok(config)
    }
}

impl IdConfig {
    /// Checks the values a registry cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.random_length == 0 {
            return Err(ConfigError::ZeroRandomLength);
        }
        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// Unset or invalid values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let generator = match lookup(ENV_GENERATOR) {
            None => defaults.generator,
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring {ENV_GENERATOR}");
                defaults.generator
            }),
        };

        let random_length = match lookup(ENV_LENGTH) {
            None => defaults.random_length,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(len) if len > 0 => len,
                _ => {
                    warn!(value = %raw, "Ignoring {ENV_LENGTH}, expected a positive integer");
                    defaults.random_length
                }
            },
        };

        Self {
            generator,
            random_length,
        }
    }

    /// Builds the configured default generator.
    pub fn build_generator(&self) -> Box<dyn IdGenerator> {
        self.generator.build(self.random_length)
    }
}
