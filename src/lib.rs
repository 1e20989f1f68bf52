pub mod config;
pub mod error;
pub mod genetic_algorithm;
pub mod individual;
pub mod report;
pub mod reproduction;
pub mod selection;
pub mod simulation;
pub mod sweep;
pub mod visualization;

pub use config::SimulationConfig;
pub use error::{ConfigError, GaError, Result};
pub use genetic_algorithm::{Evaluator, Specimen};
pub use individual::{fitness, Alphabet, Chromosome, Gene, Individual};
pub use simulation::{Phase, RoundReport, Simulation, Standing};
