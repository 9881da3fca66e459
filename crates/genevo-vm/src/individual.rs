//! The contract an external population-based optimizer works against.

use crate::evaluator::Evaluator;
use genevo_core::{EvolutionConfig, Result};
use genevo_genome::{Alphabet, Genome};
use rand::RngCore;
use std::sync::Arc;

/// A member of an optimizer's population. Fitness is minimized.
pub trait Individual: Clone + Send + Sized {
    fn fitness(&self) -> f64;

    fn mutate(&mut self, rng: &mut dyn RngCore) -> Result<()>;

    fn crossover(&self, other: &Self, rng: &mut dyn RngCore) -> Result<(Self, Self)>;
}

/// A genome paired with the evaluator and operator settings of its experiment
#[derive(Debug, Clone)]
pub struct Candidate {
    genome: Genome,
    evaluator: Arc<Evaluator>,
    mutation_points: usize,
    crossover_points: usize,
}

impl Candidate {
    pub fn new(genome: Genome, evaluator: Arc<Evaluator>, config: &EvolutionConfig) -> Self {
        Self {
            genome,
            evaluator,
            mutation_points: config.mutation_points,
            crossover_points: config.crossover_points,
        }
    }

    /// Random candidate of `config.genome_length` over `config.alphabet`
    pub fn random(
        evaluator: Arc<Evaluator>,
        config: &EvolutionConfig,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        let alphabet = Alphabet::from_symbols(&config.alphabet)?;
        let genome = Genome::new_random(config.genome_length, &alphabet, rng)?;
        Ok(Self::new(genome, evaluator, config))
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn into_genome(self) -> Genome {
        self.genome
    }

    fn with_genome(&self, genome: Genome) -> Self {
        Self {
            genome,
            evaluator: Arc::clone(&self.evaluator),
            mutation_points: self.mutation_points,
            crossover_points: self.crossover_points,
        }
    }
}

impl Individual for Candidate {
    fn fitness(&self) -> f64 {
        self.evaluator.evaluate(&self.genome)
    }

    fn mutate(&mut self, rng: &mut dyn RngCore) -> Result<()> {
        let alphabet = *self.genome.alphabet();
        self.genome.mutate(&alphabet, self.mutation_points, rng)
    }

    fn crossover(&self, other: &Self, rng: &mut dyn RngCore) -> Result<(Self, Self)> {
        let (first, second) = self
            .genome
            .crossover(&other.genome, self.crossover_points, rng)?;
        Ok((self.with_genome(first), self.with_genome(second)))
    }
}
