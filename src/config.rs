use crate::error::{ConfigError, Result};
use crate::individual::{Alphabet, MAX_ALPHABET_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables of a single simulation run. Every field has a default, so a
/// TOML file only needs to list the values it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of individuals in every generation (`n`).
    pub generation_size: usize,
    /// Number of top-ranked individuals allowed to reproduce (`k`).
    pub winners: usize,
    /// Number of generational rounds to run (`r`).
    pub rounds: usize,
    /// Chromosome length of the initial population (`c0`).
    pub initial_length: usize,
    /// Exclusive upper bound on offspring chromosome length (`c_max`).
    pub max_length: usize,
    /// Per-gene mutation probability (`m`).
    pub mutation_rate: f64,
    /// Number of distinct symbols, taken from `A` onwards (`g`).
    pub alphabet_size: usize,
    /// Seed of the random source; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generation_size: 100,
            winners: 15,
            rounds: 100,
            initial_length: 8,
            max_length: 20,
            mutation_rate: 0.01,
            alphabet_size: 5,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: SimulationConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Rejects any combination of tunables a round could not run with.
    /// An empty generation is accepted and simply produces no rounds.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.generation_size > 0 {
            if self.winners == 0 {
                return Err(ConfigError::NoWinners {
                    generation_size: self.generation_size,
                });
            }
            if self.winners >= self.generation_size {
                return Err(ConfigError::TooManyWinners {
                    winners: self.winners,
                    generation_size: self.generation_size,
                });
            }
        }
        if self.initial_length < 1 {
            return Err(ConfigError::InitialLength);
        }
        if self.max_length <= 1 {
            return Err(ConfigError::MaxLength(self.max_length));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRate(self.mutation_rate));
        }
        if self.alphabet_size < 1 || self.alphabet_size > MAX_ALPHABET_SIZE {
            return Err(ConfigError::AlphabetSize(self.alphabet_size));
        }
        Ok(())
    }

    pub fn alphabet(&self) -> std::result::Result<Alphabet, ConfigError> {
        Alphabet::new(self.alphabet_size)
    }
}
