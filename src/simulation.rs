use crate::config::SimulationConfig;
use crate::error::{GaError, Result};
use crate::genetic_algorithm::{Evaluator, Specimen};
use crate::individual::{Alphabet, Individual};
use crate::selection::{rank, truncate, Winners};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initialized,
    Evolving,
    Done,
}

/// One reported individual: its position in the ranking, its fitness and
/// its chromosome text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing {
    pub rank: usize,
    pub fitness: i32,
    pub chromosome: String,
}

impl Standing {
    pub fn of<C: Specimen>(ranked: &[C], rank: usize) -> Result<Self> {
        let specimen = ranked.get(rank).ok_or(GaError::RankOutOfBounds {
            rank,
            size: ranked.len(),
        })?;

        Ok(Self {
            rank,
            fitness: specimen.fitness(),
            chromosome: specimen.to_string(),
        })
    }
}

/// What a completed round looks like from the outside: the fittest, the
/// rank-`k` and the least fit member of the freshly built generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundReport {
    /// 1-based number of the round that produced this generation.
    pub round: usize,
    pub best: Standing,
    pub kth: Standing,
    pub worst: Standing,
}

impl RoundReport {
    pub fn from_ranked<C: Specimen>(round: usize, ranked: &[C], k: usize) -> Result<Self> {
        Ok(Self {
            round,
            best: Standing::of(ranked, 0)?,
            kth: Standing::of(ranked, k)?,
            worst: Standing::of(ranked, ranked.len().saturating_sub(1))?,
        })
    }
}

/// Drives the generational loop: the current generation is kept rank-sorted,
/// its top `k` become the parents of exactly `n` offspring, and the offspring
/// replace it in full.
#[derive(Debug)]
pub struct Simulation<R: Rng = StdRng> {
    config: SimulationConfig,
    alphabet: Alphabet,
    rng: R,
    phase: Phase,
    population: Vec<Individual>,
    history: Vec<RoundReport>,
}

impl Simulation<StdRng> {
    /// Seeds the random source from `config.seed`, or from entropy when unset.
    pub fn from_config(config: SimulationConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: Rng> Simulation<R> {
    pub fn new(config: SimulationConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let alphabet = config.alphabet()?;

        Ok(Self {
            population: Vec::with_capacity(config.generation_size),
            history: Vec::with_capacity(config.rounds),
            config,
            alphabet,
            rng,
            phase: Phase::Uninitialized,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of completed rounds.
    pub fn round(&self) -> usize {
        self.history.len()
    }

    /// The current generation, fittest first.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    pub fn history(&self) -> &[RoundReport] {
        &self.history
    }

    pub fn best(&self) -> Option<&Individual> {
        self.population.first()
    }

    pub fn worst(&self) -> Option<&Individual> {
        self.population.last()
    }

    /// The individual right behind the winners, at 0-based rank `k`.
    pub fn kth(&self) -> Result<&Individual> {
        self.population
            .get(self.config.winners)
            .ok_or(GaError::RankOutOfBounds {
                rank: self.config.winners,
                size: self.population.len(),
            })
    }

    /// The parents the next round would draw from.
    pub fn winners(&self) -> Result<Winners<'_, Individual>> {
        truncate(&self.population, self.config.winners)
    }

    /// Replaces whatever was there with `n` fresh random individuals.
    pub fn init(&mut self) -> Result<()> {
        info!(
            "Initializing population of size {} with chromosomes of length {}...",
            self.config.generation_size, self.config.initial_length
        );

        let population = (0..self.config.generation_size)
            .map(|_| {
                Individual::random(self.config.initial_length, &self.alphabet, &mut self.rng)
            })
            .collect::<Result<Vec<_>>>()?;

        self.population = rank(population);
        self.history.clear();
        self.phase = Phase::Initialized;
        Ok(())
    }

    /// Runs a single round. Returns `None` once all rounds are done.
    pub fn step(&mut self) -> Result<Option<&RoundReport>> {
        match self.phase {
            Phase::Uninitialized => return Err(GaError::NotInitialized),
            Phase::Done => return Ok(None),
            Phase::Initialized | Phase::Evolving => {}
        }

        if self.history.len() >= self.config.rounds || self.population.is_empty() {
            self.phase = Phase::Done;
            return Ok(None);
        }

        let offspring: Vec<Individual> = {
            let winners = truncate(&self.population, self.config.winners)?;
            let config = &self.config;
            let alphabet = &self.alphabet;
            let rng = &mut self.rng;

            (0..config.generation_size)
                .map(|_| {
                    let parent_1 = winners.pick(rng);
                    let parent_2 = winners.pick(rng);
                    Individual::from_parents(
                        parent_1,
                        parent_2,
                        config.max_length,
                        config.mutation_rate,
                        alphabet,
                        rng,
                    )
                })
                .collect()
        };

        self.population = rank(offspring);

        let round = self.history.len() + 1;
        let report = RoundReport::from_ranked(round, &self.population, self.config.winners)?;
        debug!(
            "Round {}/{}: best {} ({}), rank {} {}, worst {}",
            round,
            self.config.rounds,
            report.best.fitness,
            report.best.chromosome,
            self.config.winners,
            report.kth.fitness,
            report.worst.fitness,
        );
        self.history.push(report);

        self.phase = if round == self.config.rounds {
            Phase::Done
        } else {
            Phase::Evolving
        };

        Ok(self.history.last())
    }

    /// Runs rounds until all are done or `evaluator` asks to stop.
    /// Initializes the population first if that has not happened yet.
    pub fn run<E>(&mut self, evaluator: &mut E) -> Result<&[RoundReport]>
    where
        E: Evaluator<Individual> + ?Sized,
    {
        if self.phase == Phase::Uninitialized {
            self.init()?;
        }

        while self.step()?.is_some() {
            let Some(report) = self.history.last() else {
                break;
            };
            if evaluator.can_terminate(report, &self.population) {
                info!("Evaluator stopped the run after round {}", report.round);
                break;
            }
        }

        if let Some(best) = self.best() {
            info!(
                "Finished after {} rounds, best fitness {} ({})",
                self.round(),
                best.fitness(),
                best
            );
        }

        Ok(&self.history)
    }

    pub fn run_all(&mut self) -> Result<&[RoundReport]> {
        self.run(&mut |_: &RoundReport, _: &[Individual]| false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            generation_size: 20,
            winners: 4,
            rounds: 5,
            initial_length: 6,
            max_length: 10,
            mutation_rate: 0.05,
            alphabet_size: 3,
            seed: Some(42),
        }
    }

    #[test]
    fn rejects_invalid_configuration_up_front() {
        let config = SimulationConfig {
            winners: 20,
            ..small_config()
        };

        assert!(matches!(
            Simulation::from_config(config),
            Err(GaError::Config(ConfigError::TooManyWinners { .. }))
        ));
    }

    #[test]
    fn step_requires_init() {
        let mut simulation = Simulation::from_config(small_config()).unwrap();
        assert_eq!(simulation.phase(), Phase::Uninitialized);
        assert!(matches!(simulation.step(), Err(GaError::NotInitialized)));
    }

    #[test]
    fn walks_through_phases() {
        let mut simulation = Simulation::from_config(small_config()).unwrap();

        simulation.init().unwrap();
        assert_eq!(simulation.phase(), Phase::Initialized);
        assert_eq!(simulation.population().len(), 20);
        assert!(simulation.population().iter().all(|i| i.len() == 6));

        for round in 1..5 {
            let report = simulation.step().unwrap().unwrap();
            assert_eq!(report.round, round);
            assert_eq!(simulation.phase(), Phase::Evolving);
        }

        assert!(simulation.step().unwrap().is_some());
        assert_eq!(simulation.phase(), Phase::Done);
        assert!(simulation.step().unwrap().is_none());
        assert_eq!(simulation.round(), 5);
    }

    #[test]
    fn reports_match_the_ranked_generation() {
        let mut simulation = Simulation::from_config(small_config()).unwrap();
        simulation.init().unwrap();
        let report = simulation.step().unwrap().unwrap().clone();

        let population = simulation.population();
        assert_eq!(population.len(), 20);
        assert!(population
            .windows(2)
            .all(|pair| pair[0].fitness() >= pair[1].fitness()));

        let best = simulation.best().unwrap();
        let kth = simulation.kth().unwrap();
        let worst = simulation.worst().unwrap();

        assert_eq!(report.best.rank, 0);
        assert_eq!(report.best.fitness, best.fitness());
        assert_eq!(report.best.chromosome, best.to_string());
        assert_eq!(report.kth.rank, 4);
        assert_eq!(report.kth.chromosome, kth.to_string());
        assert_eq!(report.worst.rank, 19);
        assert_eq!(report.worst.fitness, worst.fitness());
    }

    #[test]
    fn offspring_respect_length_bound() {
        let mut simulation = Simulation::from_config(SimulationConfig {
            rounds: 30,
            ..small_config()
        })
        .unwrap();
        simulation.init().unwrap();

        while simulation.step().unwrap().is_some() {
            assert!(simulation
                .population()
                .iter()
                .all(|i| (1..10).contains(&i.len())));
        }
    }

    #[test]
    fn zero_rounds_or_empty_generation_is_a_no_op() {
        let mut simulation = Simulation::from_config(SimulationConfig {
            rounds: 0,
            ..small_config()
        })
        .unwrap();
        assert!(simulation.run_all().unwrap().is_empty());
        assert_eq!(simulation.phase(), Phase::Done);
        assert_eq!(simulation.population().len(), 20);

        let mut simulation = Simulation::from_config(SimulationConfig {
            generation_size: 0,
            winners: 0,
            ..small_config()
        })
        .unwrap();
        assert!(simulation.run_all().unwrap().is_empty());
        assert_eq!(simulation.phase(), Phase::Done);
        assert!(simulation.best().is_none());
        assert!(matches!(
            simulation.kth(),
            Err(GaError::RankOutOfBounds { rank: 0, size: 0 })
        ));
    }

    #[test]
    fn evaluator_can_stop_between_rounds() {
        let mut simulation = Simulation::from_config(small_config()).unwrap();
        let mut seen = 0;

        let history = simulation
            .run(&mut |report: &RoundReport, ranked: &[Individual]| {
                seen += 1;
                assert_eq!(ranked.len(), 20);
                report.round == 2
            })
            .unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(seen, 2);
        assert_eq!(simulation.phase(), Phase::Evolving);
    }

    #[test]
    fn report_needs_rank_k_in_bounds() {
        let ranked: Vec<Individual> = vec!["ABBA".parse().unwrap()];
        assert!(matches!(
            RoundReport::from_ranked(1, &ranked, 1),
            Err(GaError::RankOutOfBounds { rank: 1, size: 1 })
        ));
    }
}
