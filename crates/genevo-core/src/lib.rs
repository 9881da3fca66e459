//! Core types and utilities for the genevo genome interpreter.

pub mod state;
pub mod config;
pub mod error;
pub mod fitness;

pub use error::{Error, Result};
pub use state::*;
pub use config::*;
pub use fitness::*;
