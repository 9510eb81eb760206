//! Simulation engine and population management.
//!
//! The most commonly used types are re-exported here so consumers can import
//! them from `gpop_sim::simulation`.
//!
//! - `Simulation`: the engine that advances generations and evaluates the
//!   stop predicate.
//! - `Population`: labels, deme partition and genealogy of the current
//!   generation.
//! - `SimulationBuilder`: fluent builder for constructing `Simulation`
//!   instances with sensible defaults and validation.
//! - `map_replicates` / `run_replicates`: independent seeded replicates on the
//!   rayon pool.

pub mod builder;
pub mod configs;
pub mod engine;
pub mod frequency;
pub mod initialization;
pub mod population;
pub mod replicates;

pub use builder::SimulationBuilder;
pub use configs::{
    Configuration, EvolutionConfig, ExecutionConfig, GenealogyConfig, StopCondition,
};
pub use engine::{RunReport, RunState, Simulation, Termination};
pub use frequency::{FrequencySnapshot, FrequencyTracker};
pub use initialization::LabelInit;
pub use population::{Lineage, Population};
pub use replicates::{
    majority_fraction, map_replicates, replicate_seeds, run_replicates, run_replicates_with,
    ReplicateSummary,
};
