use crate::config::SimulationConfig;
use crate::error::Result;
use crate::genetic_algorithm::Specimen;
use crate::simulation::Simulation;
use csv::Writer;
use itertools::iproduct;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::time::Instant;

/// Seed used for the first repetition when the base config has none.
pub const DEFAULT_BASE_SEED: u64 = 0x5EED;

/// Candidate values per tunable; every combination is one scenario.
#[derive(Debug, Clone)]
pub struct SweepSchema {
    pub generation_sizes: Vec<usize>,
    pub winners: Vec<usize>,
    pub max_lengths: Vec<usize>,
    pub mutation_rates: Vec<f64>,
    pub alphabet_sizes: Vec<usize>,
}

impl Default for SweepSchema {
    fn default() -> Self {
        Self {
            generation_sizes: vec![50, 100, 200],
            winners: vec![5, 15, 30],
            max_lengths: vec![10, 20, 40],
            mutation_rates: vec![0.0, 0.01, 0.05],
            alphabet_sizes: vec![2, 5, 10],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SweepResult {
    pub scenario: u64,
    pub repetitions: usize,
    pub generation_size: usize,
    pub winners: usize,
    pub rounds: usize,
    pub initial_length: usize,
    pub max_length: usize,
    pub mutation_rate: f64,
    pub alphabet_size: usize,
    pub mean_best_fitness: f64,
    pub var_best_fitness: f64,
    pub mean_best_length: f64,
    pub var_best_length: f64,
    pub mean_runtime: f64,
    pub var_runtime: f64,
}

#[derive(Debug, Clone, Copy)]
struct RunResult {
    runtime: f64,
    best_fitness: i32,
    best_length: u32,
}

/// Population mean and variance of per-repetition results; `(0, 0)` when
/// a scenario produced no runs.
pub fn mean_variance<T: Copy + Into<f64>>(values: &[T]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let sum: f64 = values.iter().map(|&v| v.into()).sum();
    let mean = sum / n;

    let variance = values
        .iter()
        .map(|&v| {
            let diff = v.into() - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    (mean, variance)
}

fn hash_combination(config: &SimulationConfig) -> u64 {
    let mut hasher = DefaultHasher::new();

    config.generation_size.hash(&mut hasher);
    config.winners.hash(&mut hasher);
    config.rounds.hash(&mut hasher);
    config.initial_length.hash(&mut hasher);
    config.max_length.hash(&mut hasher);
    config.mutation_rate.to_bits().hash(&mut hasher);
    config.alphabet_size.hash(&mut hasher);

    hasher.finish()
}

fn run_once(config: &SimulationConfig, seed: u64) -> Result<RunResult> {
    let start = Instant::now();
    let mut simulation = Simulation::new(config.clone(), StdRng::seed_from_u64(seed))?;
    simulation.run_all()?;
    let runtime = start.elapsed().as_secs_f64();

    let (best_fitness, best_length) = simulation
        .best()
        .map(|best| (best.fitness(), best.len() as u32))
        .unwrap_or_default();

    Ok(RunResult {
        runtime,
        best_fitness,
        best_length,
    })
}

/// Runs every scenario of every schema `repetitions` times and writes one
/// csv row per scenario. Repetition `i` is seeded with `base_seed + i`, so
/// a sweep is reproducible. Returns the number of scenarios written.
pub fn collect_sweep<W: Write>(
    schemas: &[SweepSchema],
    base: &SimulationConfig,
    repetitions: usize,
    writer: &mut Writer<W>,
) -> Result<usize> {
    let base_seed = base.seed.unwrap_or(DEFAULT_BASE_SEED);
    let mut visited: HashSet<u64> = HashSet::new();

    for schema in schemas {
        for (&generation_size, &winners, &max_length, &mutation_rate, &alphabet_size) in iproduct!(
            &schema.generation_sizes,
            &schema.winners,
            &schema.max_lengths,
            &schema.mutation_rates,
            &schema.alphabet_sizes
        ) {
            let config = SimulationConfig {
                generation_size,
                winners,
                max_length,
                mutation_rate,
                alphabet_size,
                ..base.clone()
            };

            if let Err(e) = config.validate() {
                warn!("Skipping scenario: {}", e);
                continue;
            }

            let hash = hash_combination(&config);
            if !visited.insert(hash) {
                info!("Scenario {} already evaluated, skipping...", hash);
                continue;
            }
            info!("Scenario {} is being run...", hash);

            let runs = (0..repetitions)
                .into_par_iter()
                .map(|i| run_once(&config, base_seed.wrapping_add(i as u64)))
                .collect::<Result<Vec<RunResult>>>()?;

            let fitness_values: Vec<i32> = runs.iter().map(|r| r.best_fitness).collect();
            let length_values: Vec<u32> = runs.iter().map(|r| r.best_length).collect();
            let runtime_values: Vec<f64> = runs.iter().map(|r| r.runtime).collect();

            let (mean_best_fitness, var_best_fitness) = mean_variance(&fitness_values);
            let (mean_best_length, var_best_length) = mean_variance(&length_values);
            let (mean_runtime, var_runtime) = mean_variance(&runtime_values);

            writer.serialize(SweepResult {
                scenario: hash,
                repetitions,
                generation_size: config.generation_size,
                winners: config.winners,
                rounds: config.rounds,
                initial_length: config.initial_length,
                max_length: config.max_length,
                mutation_rate: config.mutation_rate,
                alphabet_size: config.alphabet_size,
                mean_best_fitness,
                var_best_fitness,
                mean_best_length,
                var_best_length,
                mean_runtime,
                var_runtime,
            })?;
            writer.flush()?;
        }
    }

    Ok(visited.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_variance() {
        assert_eq!(mean_variance::<i32>(&[]), (0.0, 0.0));
        assert_eq!(mean_variance(&[2, 4, 4, 4, 5, 5, 7, 9]), (5.0, 4.0));
        assert_eq!(mean_variance(&[3.0, 3.0]), (3.0, 0.0));
    }

    #[test]
    fn skips_invalid_and_duplicate_scenarios() {
        let schema = SweepSchema {
            generation_sizes: vec![10],
            winners: vec![3, 10],
            max_lengths: vec![8],
            mutation_rates: vec![0.0, 0.1],
            alphabet_sizes: vec![2],
        };
        let base = SimulationConfig {
            rounds: 3,
            initial_length: 4,
            seed: Some(1),
            ..Default::default()
        };
        let mut writer = Writer::from_writer(Vec::new());

        let written = collect_sweep(&[schema.clone(), schema], &base, 2, &mut writer).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        assert_eq!(written, 2);
        assert_eq!(output.lines().count(), 3);
        assert!(output.starts_with("scenario,repetitions,generation_size,winners"));
    }

    #[test]
    fn sweep_is_reproducible_apart_from_runtime() {
        let schema = SweepSchema {
            generation_sizes: vec![12],
            winners: vec![4],
            max_lengths: vec![10],
            mutation_rates: vec![0.05],
            alphabet_sizes: vec![3],
        };
        let base = SimulationConfig {
            rounds: 5,
            seed: Some(99),
            ..Default::default()
        };

        let fitness_columns = |schema: &SweepSchema| {
            let mut writer = Writer::from_writer(Vec::new());
            collect_sweep(std::slice::from_ref(schema), &base, 3, &mut writer).unwrap();
            let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
            let row = output.lines().nth(1).unwrap().to_string();
            row.split(',').take(13).collect::<Vec<_>>().join(",")
        };

        assert_eq!(fitness_columns(&schema), fitness_columns(&schema));
    }
}
