//! Base types shared by every stage of a simulation.
//!
//! This module provides the allele label type, the run-owned label counter
//! and the random number sources used by all stochastic operations.

mod label;
mod rng;

pub use label::{AlleleLabel, LabelCounter, ALLELE_A, ALLELE_B};
pub use rng::{RandomSource, ScriptedSource, SeededSource};
