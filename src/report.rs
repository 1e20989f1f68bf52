use crate::error::Result;
use crate::genetic_algorithm::{Evaluator, Specimen};
use crate::simulation::RoundReport;
use colored::Colorize;
use csv::Writer;
use serde::Serialize;
use std::io::Write;

/// Prints every round to stdout and, when `stall_limit` is set, stops the
/// run once the best fitness has not improved for that many rounds.
#[derive(Debug, Default)]
pub struct ConsoleEvaluator {
    pub stall_limit: Option<usize>,
    pub best_fitness: Option<i32>,
    pub best_fitness_count: usize,
}

impl ConsoleEvaluator {
    pub fn new(stall_limit: Option<usize>) -> Self {
        Self {
            stall_limit,
            ..Default::default()
        }
    }

    fn track(&mut self, fitness: i32) -> bool {
        match self.best_fitness {
            Some(best) if best >= fitness => self.best_fitness_count += 1,
            _ => {
                self.best_fitness = Some(fitness);
                self.best_fitness_count = 0;
            }
        }

        self.stall_limit
            .map_or(false, |limit| self.best_fitness_count >= limit)
    }
}

impl<C: Specimen> Evaluator<C> for ConsoleEvaluator {
    fn can_terminate(&mut self, report: &RoundReport, _ranked: &[C]) -> bool {
        println!(
            "{} - Best: {:3} {}, rank {}: {:3} {}, worst: {:3} {}",
            format!("Round {:3}", report.round).bold().red(),
            report.best.fitness,
            report.best.chromosome.green(),
            report.kth.rank,
            report.kth.fitness,
            report.kth.chromosome,
            report.worst.fitness,
            report.worst.chromosome.dimmed(),
        );

        self.track(report.best.fitness)
    }
}

/// Flat csv row of a single round.
#[derive(Debug, Serialize)]
pub struct RoundRecord<'a> {
    pub round: usize,
    pub best_fitness: i32,
    pub best_chromosome: &'a str,
    pub kth_rank: usize,
    pub kth_fitness: i32,
    pub kth_chromosome: &'a str,
    pub worst_fitness: i32,
    pub worst_chromosome: &'a str,
}

impl<'a> From<&'a RoundReport> for RoundRecord<'a> {
    fn from(report: &'a RoundReport) -> Self {
        Self {
            round: report.round,
            best_fitness: report.best.fitness,
            best_chromosome: &report.best.chromosome,
            kth_rank: report.kth.rank,
            kth_fitness: report.kth.fitness,
            kth_chromosome: &report.kth.chromosome,
            worst_fitness: report.worst.fitness,
            worst_chromosome: &report.worst.chromosome,
        }
    }
}

pub fn write_history<W: Write>(history: &[RoundReport], writer: &mut Writer<W>) -> Result<()> {
    for report in history {
        writer.serialize(RoundRecord::from(report))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::individual::Individual;
    use crate::simulation::Standing;

    fn check(evaluator: &mut ConsoleEvaluator, report: &RoundReport) -> bool {
        let ranked: &[Individual] = &[];
        evaluator.can_terminate(report, ranked)
    }

    fn report(round: usize, best: i32) -> RoundReport {
        let standing = |rank, fitness, chromosome: &str| Standing {
            rank,
            fitness,
            chromosome: chromosome.to_string(),
        };

        RoundReport {
            round,
            best: standing(0, best, "ABA"),
            kth: standing(3, 0, "ABC"),
            worst: standing(9, -4, "AABB"),
        }
    }

    #[test]
    fn stops_after_stalled_rounds() {
        let mut evaluator = ConsoleEvaluator::new(Some(2));

        assert!(!check(&mut evaluator, &report(1, 1)));
        assert!(!check(&mut evaluator, &report(2, 2)));
        assert!(!check(&mut evaluator, &report(3, 2)));
        assert!(check(&mut evaluator, &report(4, 1)));
    }

    #[test]
    fn never_stops_without_limit() {
        let mut evaluator = ConsoleEvaluator::new(None);

        for round in 1..50 {
            assert!(!check(&mut evaluator, &report(round, 0)));
        }
    }

    #[test]
    fn writes_one_row_per_round() {
        let history = vec![report(1, 1), report(2, 2)];
        let mut writer = Writer::from_writer(Vec::new());

        write_history(&history, &mut writer).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "round,best_fitness,best_chromosome,kth_rank,kth_fitness,kth_chromosome,worst_fitness,worst_chromosome"
        );
        assert_eq!(lines[1], "1,1,ABA,3,0,ABC,-4,AABB");
        assert_eq!(lines[2], "2,2,ABA,3,0,ABC,-4,AABB");
        assert_eq!(lines.len(), 3);
    }
}
