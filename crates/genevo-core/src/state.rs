//! Organism state carried through a single evaluation.

use crate::config::OrganismConfig;
use serde::{Deserialize, Serialize};

/// Mutable state of the simulated organism. Created fresh for every
/// evaluation and discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrganismState {
    /// Successful reproduction events
    pub children: u32,
    pub energy: f64,
    /// Cleared after the next step unless that step keeps food
    pub found_food: bool,
    /// Only ever grows
    pub size: u32,
    /// Accumulated predation pressure; evading can drive it negative
    pub threat: f64,
}

impl OrganismState {
    pub fn new(config: &OrganismConfig) -> Self {
        Self {
            children: 0,
            energy: config.initial_energy,
            found_food: false,
            size: config.initial_size,
            threat: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.energy > 0.0
    }

    /// Size as a float, for the energy formulas
    pub fn size_f64(&self) -> f64 {
        self.size as f64
    }
}

impl Default for OrganismState {
    fn default() -> Self {
        Self::new(&OrganismConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = OrganismState::default();
        assert_eq!(state.children, 0);
        assert_eq!(state.energy, 10.0);
        assert!(!state.found_food);
        assert_eq!(state.size, 1);
        assert_eq!(state.threat, 0.0);
        assert!(state.is_alive());
    }

    #[test]
    fn test_zero_energy_is_dead() {
        let mut state = OrganismState::default();
        state.energy = 0.0;
        assert!(!state.is_alive());
    }
}
