//! Instruction set and alphabets.

use genevo_core::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One genome symbol, decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Instruction {
    NoOp,
    Reproduce,
    LocateFood,
    EatFood,
    Grow,
    Defend,
    Evade,
    SkipIfLowThreat,
    SkipIfLowEnergy,
}

impl Instruction {
    /// Every instruction, in symbol order `A`..`I`
    pub const ALL: [Instruction; 9] = [
        Instruction::NoOp,
        Instruction::Reproduce,
        Instruction::LocateFood,
        Instruction::EatFood,
        Instruction::Grow,
        Instruction::Defend,
        Instruction::Evade,
        Instruction::SkipIfLowThreat,
        Instruction::SkipIfLowEnergy,
    ];

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Instruction::NoOp),
            'B' => Some(Instruction::Reproduce),
            'C' => Some(Instruction::LocateFood),
            'D' => Some(Instruction::EatFood),
            'E' => Some(Instruction::Grow),
            'F' => Some(Instruction::Defend),
            'G' => Some(Instruction::Evade),
            'H' => Some(Instruction::SkipIfLowThreat),
            'I' => Some(Instruction::SkipIfLowEnergy),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Instruction::NoOp => 'A',
            Instruction::Reproduce => 'B',
            Instruction::LocateFood => 'C',
            Instruction::EatFood => 'D',
            Instruction::Grow => 'E',
            Instruction::Defend => 'F',
            Instruction::Evade => 'G',
            Instruction::SkipIfLowThreat => 'H',
            Instruction::SkipIfLowEnergy => 'I',
        }
    }

    /// Human readable name, for listings
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::NoOp => "Nop",
            Instruction::Reproduce => "Spawn Child",
            Instruction::LocateFood => "Locate Food",
            Instruction::EatFood => "Eat Food",
            Instruction::Grow => "Grow",
            Instruction::Defend => "Defend",
            Instruction::Evade => "Evade",
            Instruction::SkipIfLowThreat => "Skip if Low Threat",
            Instruction::SkipIfLowEnergy => "Skip if Low Energy",
        }
    }

    /// Passive instructions cost no metabolism and do not make the organism
    /// lose track of food.
    pub fn is_passive(&self) -> bool {
        matches!(
            self,
            Instruction::NoOp | Instruction::SkipIfLowThreat | Instruction::SkipIfLowEnergy
        )
    }

    /// Returns true if `found_food` survives this instruction
    pub fn keeps_food(&self) -> bool {
        self.is_passive() || *self == Instruction::LocateFood
    }

    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Instruction::SkipIfLowThreat | Instruction::SkipIfLowEnergy
        )
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A non-empty subset of the instruction set, kept in symbol order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: [Instruction; 9],
    len: usize,
}

impl Alphabet {
    /// The full nine-symbol alphabet `A`..`I`
    pub fn canonical() -> Self {
        Self {
            symbols: Instruction::ALL,
            len: Instruction::ALL.len(),
        }
    }

    /// The first `n` symbols, as used by the smaller experiments (`AB`, `ABCD`, ...)
    pub fn first(n: usize) -> Result<Self> {
        if n == 0 || n > Instruction::ALL.len() {
            return Err(Error::invalid_input(format!(
                "alphabet size must be between 1 and {}, got {}",
                Instruction::ALL.len(),
                n
            )));
        }
        Ok(Self::from_members(&Instruction::ALL[..n]))
    }

    /// Build an alphabet from a symbol string such as `"ABCD"`. Order and
    /// repetition are ignored.
    pub fn from_symbols(symbols: &str) -> Result<Self> {
        let mut members = Vec::new();
        for symbol in symbols.chars() {
            let inst = Instruction::from_symbol(symbol).ok_or_else(|| {
                Error::invalid_input(format!("unknown instruction symbol '{}'", symbol))
            })?;
            members.push(inst);
        }

        if members.is_empty() {
            return Err(Error::invalid_input("alphabet must not be empty"));
        }

        Ok(Self::from_members(&members))
    }

    fn from_members(members: &[Instruction]) -> Self {
        let mut present = [false; 9];
        for inst in members {
            present[inst.index()] = true;
        }

        let mut symbols = [Instruction::NoOp; 9];
        let mut len = 0;
        for inst in Instruction::ALL.iter().filter(|i| present[i.index()]) {
            symbols[len] = *inst;
            len += 1;
        }

        Self { symbols, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.symbols[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = Instruction> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn contains(&self, inst: Instruction) -> bool {
        self.as_slice().contains(&inst)
    }

    /// Uniform draw from the alphabet
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Instruction {
        self.symbols[rng.gen_range(0..self.len)]
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::canonical()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inst in self.iter() {
            write!(f, "{}", inst.symbol())?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Alphabet {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Alphabet::from_symbols(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_symbol_round_trip() {
        for inst in Instruction::ALL {
            assert_eq!(Instruction::from_symbol(inst.symbol()), Some(inst));
        }
        assert_eq!(Instruction::from_symbol('J'), None);
        assert_eq!(Instruction::from_symbol('a'), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(Instruction::Reproduce.name(), "Spawn Child");
        assert_eq!(Instruction::SkipIfLowEnergy.name(), "Skip if Low Energy");
    }

    #[test]
    fn test_instruction_properties() {
        assert!(Instruction::NoOp.is_passive());
        assert!(Instruction::SkipIfLowThreat.is_passive());
        assert!(!Instruction::LocateFood.is_passive());
        assert!(!Instruction::Reproduce.is_passive());

        assert!(Instruction::LocateFood.keeps_food());
        assert!(Instruction::SkipIfLowEnergy.keeps_food());
        assert!(!Instruction::EatFood.keeps_food());
        assert!(!Instruction::Grow.keeps_food());
    }

    #[test]
    fn test_alphabet_first() {
        let alphabet = Alphabet::first(2).unwrap();
        assert_eq!(alphabet.to_string(), "AB");
        assert!(alphabet.contains(Instruction::Reproduce));
        assert!(!alphabet.contains(Instruction::LocateFood));

        assert!(Alphabet::first(0).is_err());
        assert!(Alphabet::first(10).is_err());
        assert_eq!(Alphabet::first(9).unwrap(), Alphabet::canonical());
    }

    #[test]
    fn test_alphabet_from_symbols() {
        let alphabet = Alphabet::from_symbols("DBBA").unwrap();
        assert_eq!(alphabet.to_string(), "ABD");
        assert_eq!(alphabet.len(), 3);

        assert!(Alphabet::from_symbols("").is_err());
        assert!(Alphabet::from_symbols("AZ").is_err());
    }

    #[test]
    fn test_choose_stays_in_alphabet() {
        let alphabet = Alphabet::from_symbols("CEG").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(alphabet.contains(alphabet.choose(&mut rng)));
        }
    }

    #[test]
    fn test_alphabet_serialization() {
        let alphabet = Alphabet::first(4).unwrap();
        let json = serde_json::to_string(&alphabet).unwrap();
        assert_eq!(json, "\"ABCD\"");

        let back: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alphabet);

        assert!(serde_json::from_str::<Alphabet>("\"AQ\"").is_err());
    }
}
