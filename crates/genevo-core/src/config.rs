//! Configuration types for the interpreter and the optimizer-facing operators.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Execution limits for a single evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Maximum number of instructions executed per evaluation
    pub step_budget: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self { step_budget: 1000 }
    }
}

/// Starting values for a freshly created organism
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganismConfig {
    pub initial_energy: f64,
    pub initial_size: u32,
}

impl Default for OrganismConfig {
    fn default() -> Self {
        Self {
            initial_energy: 10.0,
            initial_size: 1,
        }
    }
}

/// Energy economy constants. The defaults are the values evolved genomes were
/// scored against; changing them changes what a genome means.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Reproduction succeeds only above this energy
    pub reproduce_threshold: f64,
    /// Deducted on every reproduction attempt, successful or not
    pub reproduce_cost: f64,
    /// Base energy gained from eating (size is added on top)
    pub food_gain: f64,
    /// Base of the post-meal energy floor (size is added on top)
    pub food_floor: f64,
    /// Exponent applied to half the size when growing
    pub grow_exponent: f64,
    /// Defending costs this divided by half the size
    pub defend_cost: f64,
    /// Evading costs this times half the size
    pub evade_cost: f64,
    /// Threat removed by defending or evading
    pub threat_relief: f64,
    /// Size divisor in the per-step metabolic cost `(1 + size/scale)^2`
    pub metabolic_scale: f64,
    /// Threat above `threat_tolerance + size` is charged against energy
    pub threat_tolerance: f64,
    /// Skip-if-low-threat fires below this threat
    pub low_threat: f64,
    /// Skip-if-low-energy fires below this energy
    pub low_energy: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            reproduce_threshold: 25.0,
            reproduce_cost: 25.0,
            food_gain: 10.0,
            food_floor: 15.0,
            grow_exponent: 1.05,
            defend_cost: 5.0,
            evade_cost: 1.0,
            threat_relief: 5.0,
            metabolic_scale: 40.0,
            threat_tolerance: 20.0,
            low_threat: 5.0,
            low_energy: 30.0,
        }
    }
}

/// Everything the evaluator needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub execution: ExecutionConfig,
    pub organism: OrganismConfig,
    pub energy: EnergyConfig,
}

/// Parameters the external optimizer uses with the genome operators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Fixed genome length for the experiment
    pub genome_length: usize,
    /// Symbols available to random construction and mutation
    pub alphabet: String,
    /// Positions rewritten per mutation
    pub mutation_points: usize,
    /// Cut points per crossover
    pub crossover_points: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            genome_length: 32,
            alphabet: "ABCDEFGHI".to_string(),
            mutation_points: 2,
            crossover_points: 3,
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub evaluator: EvaluatorConfig,
    pub evolution: EvolutionConfig,
}

impl Config {
    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.evaluator.execution.step_budget == 0 {
            return Err(Error::Config("step_budget must be at least 1".to_string()));
        }
        if self.evaluator.energy.metabolic_scale == 0.0 {
            return Err(Error::Config("metabolic_scale must be non-zero".to_string()));
        }
        if self.evolution.genome_length == 0 {
            return Err(Error::Config("genome_length must be at least 1".to_string()));
        }
        if self.evolution.alphabet.is_empty() {
            return Err(Error::Config("alphabet must not be empty".to_string()));
        }
        Ok(())
    }
}
