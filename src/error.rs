use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("winner count must be at least 1 for a generation of {generation_size}")]
    NoWinners { generation_size: usize },

    #[error("winner count {winners} must be smaller than generation size {generation_size}")]
    TooManyWinners {
        winners: usize,
        generation_size: usize,
    },

    #[error("initial chromosome length must be at least 1")]
    InitialLength,

    #[error("max chromosome length must be greater than 1, got {0}")]
    MaxLength(usize),

    #[error("mutation rate must lie in [0, 1], got {0}")]
    MutationRate(f64),

    #[error("alphabet size must lie in 1..=26, got {0}")]
    AlphabetSize(usize),
}

#[derive(Error, Debug)]
pub enum GaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot select {requested} winners from a population of {available}")]
    NotEnoughIndividuals { requested: usize, available: usize },

    #[error("rank {rank} is out of bounds for a population of {size}")]
    RankOutOfBounds { rank: usize, size: usize },

    #[error("simulation has not been initialized")]
    NotInitialized,

    #[error("chromosome must contain at least one gene")]
    EmptyChromosome,

    #[error("invalid chromosome symbol {0:?}")]
    InvalidSymbol(char),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GaError>;
