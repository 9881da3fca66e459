//! Fixed-length genome container.

use crate::instruction::{Alphabet, Instruction};
use crate::validation::validate_genome;
use genevo_core::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered, fixed-length sequence of instructions drawn from an alphabet.
///
/// The length is set at construction and never changes; every position holds
/// a member of `alphabet`. The only in-place edit is [`Genome::mutate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GenomeRepr", into = "GenomeRepr")]
pub struct Genome {
    pub(crate) genes: Vec<Instruction>,
    pub(crate) alphabet: Alphabet,
}

impl Genome {
    /// Random genome with each position drawn uniformly from `alphabet`
    pub fn new_random<R: Rng + ?Sized>(
        length: usize,
        alphabet: &Alphabet,
        rng: &mut R,
    ) -> Result<Self> {
        if length == 0 {
            return Err(Error::invalid_input("genome length must be at least 1"));
        }

        let genes = (0..length).map(|_| alphabet.choose(rng)).collect();
        Ok(Self {
            genes,
            alphabet: *alphabet,
        })
    }

    pub fn from_instructions(genes: Vec<Instruction>, alphabet: &Alphabet) -> Result<Self> {
        validate_genome(&genes, alphabet)?;
        Ok(Self {
            genes,
            alphabet: *alphabet,
        })
    }

    /// Parse a symbol string such as `"CDCDB"`
    pub fn parse(text: &str, alphabet: &Alphabet) -> Result<Self> {
        let genes = text
            .chars()
            .enumerate()
            .map(|(pos, symbol)| {
                Instruction::from_symbol(symbol).ok_or_else(|| {
                    Error::invalid_input(format!(
                        "unknown symbol '{}' at position {}",
                        symbol, pos
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_instructions(genes, alphabet)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Never true for a constructed genome
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Instruction> {
        self.genes.get(index).copied()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.genes
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Instruction names, one per position
    pub fn describe(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.genes.iter().map(|inst| inst.name())
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inst in &self.genes {
            write!(f, "{}", inst.symbol())?;
        }
        Ok(())
    }
}

/// Serialized form: the symbol string plus its alphabet
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GenomeRepr {
    genes: String,
    alphabet: Alphabet,
}

impl TryFrom<GenomeRepr> for Genome {
    type Error = Error;

    fn try_from(repr: GenomeRepr) -> Result<Self> {
        Genome::parse(&repr.genes, &repr.alphabet)
    }
}

impl From<Genome> for GenomeRepr {
    fn from(genome: Genome) -> Self {
        Self {
            genes: genome.to_string(),
            alphabet: genome.alphabet,
        }
    }
}
