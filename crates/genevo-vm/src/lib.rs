//! Genome interpreter and fitness evaluator.
//!
//! The evaluator executes a genome as a bounded-step program against a fresh
//! organism and scores it by how many children it produced. It is
//! deterministic and holds no mutable state, so one instance can be shared
//! across threads.

pub mod evaluator;
pub mod observer;
pub mod individual;

pub use evaluator::{Codon, Evaluation, Evaluator, Outcome, Phase};
pub use observer::{NoopObserver, Recorder, StepObserver, StepRecord, TracingObserver};
pub use individual::{Candidate, Individual};
