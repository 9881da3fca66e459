//! Per-step trace hooks.

use crate::evaluator::{Codon, Outcome};
use genevo_core::OrganismState;
use tracing::debug;

/// One executed step, with the organism state after metabolism was applied
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub iteration: usize,
    /// Genome position the codon was fetched from
    pub pointer: usize,
    pub codon: Codon,
    pub outcome: Outcome,
    pub state: OrganismState,
}

/// Receives every step of an evaluation.
pub trait StepObserver {
    fn on_step(&mut self, record: &StepRecord);

    fn on_death(&mut self, _iteration: usize, _state: &OrganismState) {}
}

/// Observer that does nothing. The default for plain evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    #[inline(always)]
    fn on_step(&mut self, _record: &StepRecord) {}
}

/// Emits a `debug` event per step and one on death
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StepObserver for TracingObserver {
    fn on_step(&mut self, record: &StepRecord) {
        debug!(
            iteration = record.iteration,
            pointer = record.pointer,
            codon = %record.codon,
            state = ?record.state,
            "{}",
            record.outcome.message()
        );
    }

    fn on_death(&mut self, iteration: usize, state: &OrganismState) {
        debug!(state = ?state, "Died on iteration {}", iteration);
    }
}

/// Keeps every step in memory
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub records: Vec<StepRecord>,
    pub died_on: Option<usize>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Genome positions in execution order
    pub fn pointers(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.pointer).collect()
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.records.iter().map(|r| r.outcome).collect()
    }
}

impl StepObserver for Recorder {
    fn on_step(&mut self, record: &StepRecord) {
        self.records.push(record.clone());
    }

    fn on_death(&mut self, iteration: usize, _state: &OrganismState) {
        self.died_on = Some(iteration);
    }
}
