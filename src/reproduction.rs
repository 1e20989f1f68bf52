use crate::individual::{Alphabet, Chromosome};
use rand::Rng;

/// Builds one offspring from a random non-empty prefix of each parent.
///
/// The offspring is `parent_1[..len_1] ++ parent_2[..len_2]`, every gene of
/// which is independently replaced by a random symbol of `alphabet` with
/// probability `mutation_rate`. Offspring reaching `max_length` are cut back
/// to `max_length - 1` genes, but never below one gene.
pub fn reproduce<R: Rng + ?Sized>(
    parent_1: &Chromosome,
    parent_2: &Chromosome,
    max_length: usize,
    mutation_rate: f64,
    alphabet: &Alphabet,
    rng: &mut R,
) -> Chromosome {
    let len_1 = rng.gen_range(1..=parent_1.len());
    let len_2 = rng.gen_range(1..=parent_2.len());

    let mut genes = Vec::with_capacity(len_1 + len_2);
    genes.extend_from_slice(&parent_1.genes()[..len_1]);
    genes.extend_from_slice(&parent_2.genes()[..len_2]);

    for gene in genes.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            *gene = alphabet.random_gene(rng);
        }
    }

    if genes.len() >= max_length {
        genes.truncate(max_length.saturating_sub(1).max(1));
    }

    Chromosome::from_genes(genes)
}
