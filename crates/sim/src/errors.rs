//! Error types for the simulation crate.
//!
//! Configuration problems are reported eagerly, before any generation runs.
//! Reaching the generation bound without coalescence is a terminal state and
//! never shows up here.

use crate::base::AlleleLabel;
use thiserror::Error;

/// Invalid simulation configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The population must contain at least one lineage.
    #[error("population size must be positive")]
    EmptyPopulation,

    /// Lineage indices are stored as `u32`.
    #[error("population size {0} exceeds the supported maximum of u32::MAX")]
    PopulationTooLarge(usize),

    /// Mutation rate outside `[0, 1]` (or not a number).
    #[error("invalid mutation rate: {0} (must be between 0.0 and 1.0)")]
    InvalidMutationRate(f64),

    /// Initial allele frequency outside `[0, 1]`.
    #[error("invalid initial allele frequency: {0} (must be between 0.0 and 1.0)")]
    InvalidFrequency(f64),

    /// At least one deme is required.
    #[error("number of subpopulations must be positive")]
    NoDemes,

    /// Demes must partition the population into equal parts.
    #[error("{demes} subpopulations do not evenly divide a population of {size}")]
    UnevenDemes { size: usize, demes: usize },

    /// The generation bound must allow at least one tick.
    #[error("maximum number of generations must be positive")]
    NoGenerations,

    /// A retention window must keep at least one generation of parent links.
    #[error("ancestry retention window must be positive")]
    EmptyRetentionWindow,

    /// Frequencies must be recorded at some positive interval.
    #[error("recording interval must be positive")]
    InvalidRecordInterval,

    /// Founder labels must leave room for at least one fresh label.
    #[error("founder label {0} leaves no room for fresh labels")]
    LabelOutOfRange(AlleleLabel),

    /// A required builder parameter was never set.
    #[error("missing required parameter: {0}")]
    MissingRequired(&'static str),

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

/// Errors raised by genealogy queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenealogyError {
    /// Common-ancestor queries need at least one lineage.
    #[error("lineage group is empty")]
    EmptyGroup,

    /// A lineage id does not exist in the current generation.
    #[error("lineage {id} out of range (population size = {size})")]
    LineageOutOfRange { id: usize, size: usize },
}

/// Errors returned by the simulation loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error(transparent)]
    Genealogy(#[from] GenealogyError),

    /// Every representable label has already been issued.
    #[error("no fresh allele labels left")]
    LabelsExhausted,

    /// `step` was called after the run reached a terminal state.
    #[error("simulation already terminated at generation {0}")]
    AlreadyTerminated(usize),
}
