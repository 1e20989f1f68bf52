use crate::error::{GaError, Result};
use crate::genetic_algorithm::Specimen;
use rand::Rng;
use std::cmp::Reverse;

/// Sorts the population fittest first. The sort is stable, so individuals
/// of equal fitness keep their previous relative order.
pub fn rank<C: Specimen>(mut population: Vec<C>) -> Vec<C> {
    population.sort_by_key(|specimen| Reverse(specimen.fitness()));
    population
}

/// Keeps the first `k` individuals of an already ranked population.
pub fn truncate<C: Specimen>(ranked: &[C], k: usize) -> Result<Winners<'_, C>> {
    if k > ranked.len() {
        return Err(GaError::NotEnoughIndividuals {
            requested: k,
            available: ranked.len(),
        });
    }

    Ok(Winners {
        members: &ranked[..k],
    })
}

/// The parents of one round. Read-only for the whole round, so every
/// reproduction draw sees the same set.
#[derive(Debug, Clone)]
pub struct Winners<'a, C> {
    members: &'a [C],
}

impl<'a, C: Specimen> Winners<'a, C> {
    pub fn members(&self) -> &'a [C] {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Draws one winner uniformly, with replacement.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a C {
        &self.members[rng.gen_range(0..self.members.len())]
    }
}
