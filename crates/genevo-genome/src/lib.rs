//! Genome representation for the instruction interpreter.
//!
//! A genome is a fixed-length string over a small instruction alphabet. This
//! crate owns everything an external optimizer needs to manipulate one:
//! - `Instruction` / `Alphabet`: the closed instruction set and the subsets
//!   experiments draw from
//! - `Genome`: validated, fixed-length container
//! - point mutation and n-point crossover operators

pub mod instruction;
pub mod genome;
pub mod mutation;
pub mod validation;

pub use instruction::{Alphabet, Instruction};
pub use genome::Genome;
pub use validation::validate_genome;
