//! The interpreter loop.

use crate::observer::{NoopObserver, StepObserver, StepRecord};
use genevo_core::{reproductive_fitness, EvaluatorConfig, OrganismState};
use genevo_genome::{Genome, Instruction};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// A fetched genome position. Genomes only hold `Known` codons; raw text
/// evaluated through [`Evaluator::run_symbols`] may also contain symbols
/// outside the instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codon {
    Known(Instruction),
    Unexpected(char),
}

impl Codon {
    pub fn from_symbol(symbol: char) -> Self {
        Instruction::from_symbol(symbol).map_or(Codon::Unexpected(symbol), Codon::Known)
    }

    /// Unexpected codons are charged like any active instruction
    pub fn is_passive(&self) -> bool {
        match self {
            Codon::Known(inst) => inst.is_passive(),
            Codon::Unexpected(_) => false,
        }
    }

    pub fn keeps_food(&self) -> bool {
        match self {
            Codon::Known(inst) => inst.keeps_food(),
            Codon::Unexpected(_) => false,
        }
    }
}

impl From<Instruction> for Codon {
    fn from(inst: Instruction) -> Self {
        Codon::Known(inst)
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codon::Known(inst) => write!(f, "{}", inst.symbol()),
            Codon::Unexpected(symbol) => write!(f, "{}", symbol),
        }
    }
}

/// What a single instruction did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Idle,
    Reproduced,
    ReproduceFailed,
    LocatedFood,
    AteFood,
    EatFailed,
    Grew,
    Defended,
    Evaded,
    /// A skip guard held; the pointer advances by two
    Skipped,
    NotSkipped,
    Unexpected,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Idle => "No Op",
            Outcome::Reproduced => "Spawn Child succeeded",
            Outcome::ReproduceFailed => "Spawn Child failed",
            Outcome::LocatedFood => "Located Food",
            Outcome::AteFood => "Ate Food",
            Outcome::EatFailed => "Eat Food Failed",
            Outcome::Grew => "Growing",
            Outcome::Defended => "Defending",
            Outcome::Evaded => "Evading",
            Outcome::Skipped => "Skipping next instruction",
            Outcome::NotSkipped => "Not skipping",
            Outcome::Unexpected => "Unexpected",
        }
    }
}

/// Lifecycle of the organism during an evaluation. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Running,
    Dead { iteration: usize },
}

/// Result of running a genome
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// `1 - children / step_budget`; lower is better
    pub fitness: f64,
    /// Organism state when the loop ended
    pub state: OrganismState,
    /// Instructions executed, including the fatal one
    pub steps: usize,
    pub phase: Phase,
}

impl Evaluation {
    pub fn died_on(&self) -> Option<usize> {
        match self.phase {
            Phase::Running => None,
            Phase::Dead { iteration } => Some(iteration),
        }
    }

    pub fn survived(&self) -> bool {
        self.phase == Phase::Running
    }
}

/// Executes genomes against the energy economy in its configuration.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Fitness of `genome`. Never fails and is bit-identical across calls.
    pub fn evaluate(&self, genome: &Genome) -> f64 {
        self.run(genome).fitness
    }

    pub fn run(&self, genome: &Genome) -> Evaluation {
        self.execute(genome.instructions(), &mut NoopObserver)
    }

    pub fn run_observed<O: StepObserver + ?Sized>(
        &self,
        genome: &Genome,
        observer: &mut O,
    ) -> Evaluation {
        self.execute(genome.instructions(), observer)
    }

    /// Run unvalidated text. Symbols outside the instruction set are logged
    /// and executed as active steps with no effect of their own.
    pub fn run_symbols<O: StepObserver + ?Sized>(&self, text: &str, observer: &mut O) -> Evaluation {
        let program: Vec<Codon> = text.chars().map(Codon::from_symbol).collect();
        self.execute(&program, observer)
    }

    fn execute<C, O>(&self, program: &[C], observer: &mut O) -> Evaluation
    where
        C: Copy + Into<Codon>,
        O: StepObserver + ?Sized,
    {
        let budget = self.config.execution.step_budget;
        let mut state = OrganismState::new(&self.config.organism);
        let mut phase = Phase::Running;
        let mut steps = 0;

        if program.is_empty() {
            warn!("Evaluated an empty program");
            return Evaluation {
                fitness: reproductive_fitness(state.children, budget),
                state,
                steps,
                phase,
            };
        }

        let mut pointer = 0;
        for iteration in 0..budget {
            let codon: Codon = program[pointer].into();
            let outcome = self.apply(codon, &mut state);

            if !codon.keeps_food() {
                state.found_food = false;
            }
            if !codon.is_passive() {
                self.metabolize(&mut state);
            }
            steps += 1;

            observer.on_step(&StepRecord {
                iteration,
                pointer,
                codon,
                outcome,
                state,
            });

            if !state.is_alive() {
                phase = Phase::Dead { iteration };
                observer.on_death(iteration, &state);
                break;
            }

            let advance = if outcome == Outcome::Skipped { 2 } else { 1 };
            pointer = (pointer + advance) % program.len();
        }

        Evaluation {
            fitness: reproductive_fitness(state.children, budget),
            state,
            steps,
            phase,
        }
    }

    fn apply(&self, codon: Codon, state: &mut OrganismState) -> Outcome {
        let energy = &self.config.energy;
        let inst = match codon {
            Codon::Known(inst) => inst,
            Codon::Unexpected(symbol) => {
                warn!(%symbol, "Unexpected codon");
                return Outcome::Unexpected;
            }
        };
        let size = state.size_f64();

        match inst {
            Instruction::NoOp => Outcome::Idle,
            Instruction::Reproduce => {
                let outcome = if state.energy > energy.reproduce_threshold {
                    state.children += 1;
                    Outcome::Reproduced
                } else {
                    Outcome::ReproduceFailed
                };
                state.energy -= energy.reproduce_cost;
                outcome
            }
            Instruction::LocateFood => {
                state.found_food = true;
                Outcome::LocatedFood
            }
            Instruction::EatFood => {
                if state.found_food {
                    state.energy += energy.food_gain + size;
                    // Acts as a floor: eating never leaves less than size + food_floor
                    state.energy = state.energy.max(size + energy.food_floor);
                    Outcome::AteFood
                } else {
                    Outcome::EatFailed
                }
            }
            Instruction::Grow => {
                state.energy -= (size / 2.0).powf(energy.grow_exponent);
                state.size += 1;
                Outcome::Grew
            }
            Instruction::Defend => {
                state.energy -= energy.defend_cost / (size / 2.0);
                state.threat -= energy.threat_relief;
                state.threat = state.threat.max(0.0);
                Outcome::Defended
            }
            Instruction::Evade => {
                // No floor here, unlike Defend
                state.energy -= energy.evade_cost * (size / 2.0);
                state.threat -= energy.threat_relief;
                Outcome::Evaded
            }
            Instruction::SkipIfLowThreat => {
                if state.threat < energy.low_threat {
                    Outcome::Skipped
                } else {
                    Outcome::NotSkipped
                }
            }
            Instruction::SkipIfLowEnergy => {
                if state.energy < energy.low_energy {
                    Outcome::Skipped
                } else {
                    Outcome::NotSkipped
                }
            }
        }
    }

    /// Per-step upkeep for active instructions
    fn metabolize(&self, state: &mut OrganismState) {
        let energy = &self.config.energy;
        let size = state.size_f64();

        state.energy -= (1.0 + size / energy.metabolic_scale).powi(2);
        state.threat += 1.0;

        if state.threat > energy.threat_tolerance + size {
            state.energy -= state.threat;
        }
    }
}
