//! # Simulation Crate
//!
//! The `sim` crate provides the core logic of the Wright-Fisher engine.
//! It includes modules for allele labels and random sources, the genealogy
//! arena and coalescence queries, the evolutionary operators (resampling,
//! subdivision, infinite-allele mutation), and the simulation engine with its
//! replicate driver.

pub mod base;
pub mod errors;
pub mod evolution;
pub mod genealogy;
pub mod prelude;
pub mod simulation;

pub use base::{AlleleLabel, ALLELE_A, ALLELE_B};
