//! Configuration for seed runs.
//!
//! Binaries build a [`SeedConfig`] from the environment; the generators
//! themselves never read it.

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::taxonomy::{Taxonomy, TaxonomyError};

/// Directory the CSV files are written to.
pub const ENV_OUTPUT_DIR: &str = "SEED_OUTPUT_DIR";
/// Number of users to generate.
pub const ENV_USER_COUNT: &str = "SEED_USER_COUNT";
/// Fixed RNG seed for reproducible runs.
pub const ENV_RNG_SEED: &str = "SEED_RNG_SEED";
/// JSON file replacing the built-in taxonomy.
pub const ENV_TAXONOMY: &str = "SEED_TAXONOMY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// Settings for a seed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Directory the CSV files are written to.
    pub output_dir: PathBuf,

    /// Number of users to generate.
    pub user_count: usize,

    /// RNG seed. A fresh entropy seed is used when unset.
    pub rng_seed: Option<u64>,

    /// JSON taxonomy file. The built-in taxonomy is used when unset.
    pub taxonomy_path: Option<PathBuf>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            user_count: 10,
            rng_seed: None,
            taxonomy_path: None,
        }
    }
}

impl SeedConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from a variable lookup, starting from the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(count) = lookup(ENV_USER_COUNT) {
            config.user_count = parse(ENV_USER_COUNT, &count)?;
        }
        if let Some(seed) = lookup(ENV_RNG_SEED) {
            config.rng_seed = Some(parse(ENV_RNG_SEED, &seed)?);
        }
        if let Some(path) = lookup(ENV_TAXONOMY) {
            config.taxonomy_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Loads the configured taxonomy, validated.
    pub fn taxonomy(&self) -> Result<Taxonomy, TaxonomyError> {
        match &self.taxonomy_path {
            Some(path) => Taxonomy::from_json_path(path),
            None => Ok(Taxonomy::enterprise()),
        }
    }

    /// Creates the run's RNG.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
    })
}
