//! Validation for genomes.

use crate::instruction::{Alphabet, Instruction};
use genevo_core::{Error, Result};

/// Check that `genes` is a well-formed genome over `alphabet`
pub fn validate_genome(genes: &[Instruction], alphabet: &Alphabet) -> Result<()> {
    if genes.is_empty() {
        return Err(Error::invalid_input("genome must contain at least one symbol"));
    }

    for (pos, inst) in genes.iter().enumerate() {
        if !alphabet.contains(*inst) {
            return Err(Error::invalid_input(format!(
                "symbol '{}' at position {} is not in alphabet {}",
                inst.symbol(),
                pos,
                alphabet
            )));
        }
    }

    Ok(())
}
