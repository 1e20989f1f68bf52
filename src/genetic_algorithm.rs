use crate::simulation::RoundReport;
use std::fmt::{Debug, Display};

// This trait represents a single member of the population. Its Display
// rendering is the chromosome text used in reports.
pub trait Specimen: Debug + Clone + Display {
    fn fitness(&self) -> i32;
}

// This trait represents the per-round hook of the engine. It sees every
// completed round and may stop the run before the next one starts.
pub trait Evaluator<C: Specimen> {
    fn can_terminate(&mut self, report: &RoundReport, ranked: &[C]) -> bool;
}

impl<C, F> Evaluator<C> for F
where
    C: Specimen,
    F: FnMut(&RoundReport, &[C]) -> bool,
{
    fn can_terminate(&mut self, report: &RoundReport, ranked: &[C]) -> bool {
        self(report, ranked)
    }
}
