//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use gpop_sim::prelude::*;
//!
//! let mut sim = SimulationBuilder::new()
//!     .population_size(10)
//!     .generations(20)
//!     .seed(1)
//!     .build()
//!     .unwrap();
//! assert_eq!(sim.run().unwrap(), Termination::MaxGenerations);
//! ```

pub use crate::base::{AlleleLabel, RandomSource, ScriptedSource, SeededSource, ALLELE_A, ALLELE_B};
pub use crate::errors::{ConfigError, GenealogyError, SimulationError};
pub use crate::genealogy::{AncestryRetention, CoalescenceResult, Genealogy};
pub use crate::simulation::{
    Configuration, Population, RunReport, RunState, Simulation, SimulationBuilder, StopCondition,
    Termination,
};
