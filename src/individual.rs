use crate::error::{ConfigError, GaError, Result};
use crate::genetic_algorithm::Specimen;
use crate::reproduction::reproduce;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Symbols are the uppercase letters, so at most 26 of them.
pub const MAX_ALPHABET_SIZE: usize = 26;

/// A single symbol of a chromosome, stored as its offset from `A`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Gene(u8);

impl Gene {
    pub fn index(self) -> u8 {
        self.0
    }

    pub fn symbol(self) -> char {
        (b'A' + self.0) as char
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        if symbol.is_ascii_uppercase() {
            Some(Gene(symbol as u8 - b'A'))
        } else {
            None
        }
    }
}

/// The first `size` letters, shared by initial construction and mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Alphabet {
    size: u8,
}

impl Alphabet {
    pub fn new(size: usize) -> std::result::Result<Self, ConfigError> {
        if size < 1 || size > MAX_ALPHABET_SIZE {
            return Err(ConfigError::AlphabetSize(size));
        }
        Ok(Self { size: size as u8 })
    }

    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn contains(&self, gene: Gene) -> bool {
        gene.0 < self.size
    }

    pub fn random_gene<R: Rng + ?Sized>(&self, rng: &mut R) -> Gene {
        Gene(rng.gen_range(0..self.size))
    }
}

/// Ordered, non-empty sequence of genes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chromosome(Vec<Gene>);

impl Chromosome {
    pub fn new(genes: Vec<Gene>) -> Result<Self> {
        if genes.is_empty() {
            return Err(GaError::EmptyChromosome);
        }
        Ok(Self(genes))
    }

    pub(crate) fn from_genes(genes: Vec<Gene>) -> Self {
        debug_assert!(!genes.is_empty());
        Self(genes)
    }

    /// `length` uniformly drawn genes. A zero length is rejected rather
    /// than rounded up.
    pub fn random<R: Rng + ?Sized>(
        length: usize,
        alphabet: &Alphabet,
        rng: &mut R,
    ) -> Result<Self> {
        Self::new((0..length).map(|_| alphabet.random_gene(rng)).collect())
    }

    pub fn genes(&self) -> &[Gene] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_palindrome(&self) -> bool {
        self.0.iter().eq(self.0.iter().rev())
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|gene| write!(f, "{}", gene.symbol()))
    }
}

impl FromStr for Chromosome {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self> {
        let genes = s
            .chars()
            .map(|c| Gene::from_symbol(c).ok_or(GaError::InvalidSymbol(c)))
            .collect::<Result<Vec<_>>>()?;
        Chromosome::new(genes)
    }
}

/// Scores a gene sequence: +1 for every matching mirrored pair and -1 for
/// every mismatching one over the first half (the middle gene of an odd
/// length sequence pairs with itself), then -1 for every adjacent repeat.
pub fn fitness(genes: &[Gene]) -> i32 {
    let half = (genes.len() + 1) / 2;

    let symmetry: i32 = genes
        .iter()
        .zip(genes.iter().rev())
        .take(half)
        .map(|(a, b)| if a == b { 1 } else { -1 })
        .sum();

    let repeats = genes.windows(2).filter(|pair| pair[0] == pair[1]).count() as i32;

    symmetry - repeats
}

/// A chromosome together with its fitness. Fitness is derived once on
/// construction and the chromosome is never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Individual {
    chromosome: Chromosome,
    fitness: i32,
}

impl Individual {
    pub fn new(chromosome: Chromosome) -> Self {
        let fitness = fitness(chromosome.genes());
        Self {
            chromosome,
            fitness,
        }
    }

    pub fn random<R: Rng + ?Sized>(
        length: usize,
        alphabet: &Alphabet,
        rng: &mut R,
    ) -> Result<Self> {
        Chromosome::random(length, alphabet, rng).map(Self::new)
    }

    pub fn from_parents<R: Rng + ?Sized>(
        parent_1: &Individual,
        parent_2: &Individual,
        max_length: usize,
        mutation_rate: f64,
        alphabet: &Alphabet,
        rng: &mut R,
    ) -> Self {
        Self::new(reproduce(
            &parent_1.chromosome,
            &parent_2.chromosome,
            max_length,
            mutation_rate,
            alphabet,
            rng,
        ))
    }

    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    pub fn len(&self) -> usize {
        self.chromosome.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosome.is_empty()
    }
}

impl Specimen for Individual {
    fn fitness(&self) -> i32 {
        self.fitness
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.chromosome, f)
    }
}

impl FromStr for Individual {
    type Err = GaError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse().map(Individual::new)
    }
}
