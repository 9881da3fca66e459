//! Mutation and crossover operators.

use crate::genome::Genome;
use crate::instruction::Alphabet;
use genevo_core::{Error, Result};
use rand::seq::index;
use rand::Rng;
use tracing::trace;

impl Genome {
    /// Rewrite `points` distinct positions, each with a uniform draw from
    /// `alphabet`. A position may be redrawn to the symbol it already held.
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        alphabet: &Alphabet,
        points: usize,
        rng: &mut R,
    ) -> Result<()> {
        if *alphabet != self.alphabet {
            return Err(Error::invalid_input(format!(
                "mutation alphabet {} does not match genome alphabet {}",
                alphabet, self.alphabet
            )));
        }
        if points > self.len() {
            return Err(Error::invalid_input(format!(
                "cannot mutate {} positions of a genome of length {}",
                points,
                self.len()
            )));
        }

        for pos in index::sample(rng, self.len(), points).into_iter() {
            self.genes[pos] = alphabet.choose(rng);
        }

        Ok(())
    }

    /// N-point crossover. Cut points are distinct positions in `1..len`;
    /// segments between consecutive cuts alternate between the parents, the
    /// first segment staying with its own parent. Neither parent is modified.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        other: &Genome,
        points: usize,
        rng: &mut R,
    ) -> Result<(Genome, Genome)> {
        if self.len() != other.len() {
            return Err(Error::invalid_input(format!(
                "cannot cross genomes of different lengths ({} vs {})",
                self.len(),
                other.len()
            )));
        }
        if self.alphabet != other.alphabet {
            return Err(Error::invalid_input(format!(
                "cannot cross genomes over different alphabets ({} vs {})",
                self.alphabet, other.alphabet
            )));
        }

        let len = self.len();
        if points > len - 1 {
            return Err(Error::invalid_input(format!(
                "a genome of length {} has only {} cut points, {} requested",
                len,
                len - 1,
                points
            )));
        }

        let mut cuts: Vec<usize> = index::sample(rng, len - 1, points)
            .into_iter()
            .map(|i| i + 1)
            .collect();
        cuts.sort_unstable();
        trace!(?cuts, "crossover cut points");

        let mut bounds = Vec::with_capacity(cuts.len() + 2);
        bounds.push(0);
        bounds.extend(cuts);
        bounds.push(len);

        let mut first = self.clone();
        let mut second = other.clone();
        for (segment, window) in bounds.windows(2).enumerate() {
            if segment % 2 == 1 {
                let (start, end) = (window[0], window[1]);
                first.genes[start..end].copy_from_slice(&other.genes[start..end]);
                second.genes[start..end].copy_from_slice(&self.genes[start..end]);
            }
        }

        Ok((first, second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn uniform(symbol: char, len: usize) -> Genome {
        let text: String = std::iter::repeat(symbol).take(len).collect();
        Genome::parse(&text, &Alphabet::canonical()).unwrap()
    }

    #[test]
    fn test_mutate_changes_at_most_k_positions() {
        let alphabet = Alphabet::canonical();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..50 {
            let mut genome = uniform('A', 30);
            genome.mutate(&alphabet, 3, &mut rng).unwrap();

            let changed = genome
                .instructions()
                .iter()
                .filter(|i| **i != Instruction::NoOp)
                .count();
            assert!(changed <= 3);
            assert_eq!(genome.len(), 30);
        }
    }

    #[test]
    fn test_mutate_single_symbol_alphabet_is_identity() {
        let alphabet = Alphabet::first(1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut genome = Genome::parse("AAAA", &alphabet).unwrap();

        genome.mutate(&alphabet, 4, &mut rng).unwrap();
        assert_eq!(genome.to_string(), "AAAA");
    }

    #[test]
    fn test_mutate_rejects_mismatched_alphabet() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut genome = Genome::parse("ABAB", &Alphabet::first(2).unwrap()).unwrap();

        let result = genome.mutate(&Alphabet::canonical(), 1, &mut rng);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert_eq!(genome.to_string(), "ABAB");
    }

    #[test]
    fn test_mutate_rejects_too_many_points() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut genome = uniform('C', 2);
        assert!(genome.mutate(&Alphabet::canonical(), 3, &mut rng).is_err());
    }

    #[test]
    fn test_crossover_single_point() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let left = uniform('A', 10);
        let right = uniform('B', 10);

        let (first, second) = left.crossover(&right, 1, &mut rng).unwrap();
        let first = first.to_string();
        let second = second.to_string();

        // One cut: a run of A's followed by a run of B's, and the mirror image
        let cut = first.find('B').unwrap();
        assert!(cut >= 1 && cut < 10);
        assert_eq!(first, format!("{}{}", "A".repeat(cut), "B".repeat(10 - cut)));
        assert_eq!(second, format!("{}{}", "B".repeat(cut), "A".repeat(10 - cut)));
    }

    #[test]
    fn test_crossover_every_cut() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let left = uniform('A', 6);
        let right = uniform('B', 6);

        let (first, second) = left.crossover(&right, 5, &mut rng).unwrap();
        assert_eq!(first.to_string(), "ABABAB");
        assert_eq!(second.to_string(), "BABABA");
    }

    #[test]
    fn test_crossover_leaves_parents_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let left = uniform('A', 12);
        let right = uniform('B', 12);

        let _ = left.crossover(&right, 3, &mut rng).unwrap();
        assert_eq!(left, uniform('A', 12));
        assert_eq!(right, uniform('B', 12));
    }

    #[test]
    fn test_crossover_rejects_unequal_lengths() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = uniform('A', 4).crossover(&uniform('B', 5), 1, &mut rng);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_crossover_rejects_too_many_cuts() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = uniform('A', 3).crossover(&uniform('B', 3), 3, &mut rng);
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_crossover_preserves_positions(
            seed in any::<u64>(),
            len in 2usize..40,
            points in 0usize..4,
        ) {
            prop_assume!(points < len);
            let alphabet = Alphabet::canonical();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let left = Genome::new_random(len, &alphabet, &mut rng).unwrap();
            let right = Genome::new_random(len, &alphabet, &mut rng).unwrap();

            let (first, second) = left.crossover(&right, points, &mut rng).unwrap();
            prop_assert_eq!(first.len(), len);
            prop_assert_eq!(second.len(), len);

            for i in 0..len {
                let (a, b) = (left.get(i), right.get(i));
                let (x, y) = (first.get(i), second.get(i));
                prop_assert!((x == a && y == b) || (x == b && y == a));
            }
        }

        #[test]
        fn prop_mutated_clone_leaves_original(seed in any::<u64>(), len in 1usize..40) {
            let alphabet = Alphabet::canonical();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let original = Genome::new_random(len, &alphabet, &mut rng).unwrap();
            let snapshot = original.to_string();

            let mut copy = original.clone();
            copy.mutate(&alphabet, len.min(3), &mut rng).unwrap();

            prop_assert_eq!(original.to_string(), snapshot);
            prop_assert_eq!(copy.len(), len);
        }
    }
}
