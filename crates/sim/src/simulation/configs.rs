//! Simulation configuration.
//!
//! A [`Configuration`] fully describes a run and can be stored as JSON to
//! reproduce it later. Validation happens up front, before any generation.

use crate::errors::ConfigError;
use crate::evolution::{Demes, InfiniteAlleles};
use crate::genealogy::AncestryRetention;
use crate::simulation::LabelInit;
use serde::{Deserialize, Serialize};

/// The master configuration struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub genealogy: GenealogyConfig,
    #[serde(default)]
    pub initialization: LabelInit,
}

/// Run-level parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Number of lineages per generation
    pub population_size: usize,
    /// Generation bound; every run stops here at the latest
    pub max_generations: usize,
    /// Optional RNG seed for reproducibility
    #[serde(default)]
    pub seed: Option<u64>,
    /// Record frequencies every this many generations
    #[serde(default = "default_record_every")]
    pub record_every: usize,
    /// Predicate that ends the run before the generation bound
    #[serde(default)]
    pub stop: StopCondition,
}

fn default_record_every() -> usize {
    1
}

/// Evolutionary forces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Infinite-allele mutation probability per offspring per generation
    #[serde(default)]
    pub mutation_rate: f64,
    /// Number of isolated subpopulations (1 = panmictic)
    #[serde(default = "default_demes")]
    pub demes: usize,
}

fn default_demes() -> usize {
    1
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.0,
            demes: default_demes(),
        }
    }
}

/// Ancestry bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenealogyConfig {
    #[serde(default)]
    pub retention: AncestryRetention,
}

/// When a run ends before reaching `max_generations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopCondition {
    /// Only the generation bound ends the run.
    #[default]
    MaxGenerations,
    /// Stop once the whole population is identical by descent.
    Coalescence,
    /// Stop once every deme carries a single label.
    Fixation,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            execution: ExecutionConfig {
                population_size: 100,
                max_generations: 1000,
                seed: None,
                record_every: default_record_every(),
                stop: StopCondition::MaxGenerations,
            },
            evolution: EvolutionConfig::default(),
            genealogy: GenealogyConfig::default(),
            initialization: LabelInit::default(),
        }
    }
}

impl Configuration {
    /// Check every parameter.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.execution.population_size;
        if size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if size > u32::MAX as usize {
            return Err(ConfigError::PopulationTooLarge(size));
        }
        if self.execution.max_generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if self.execution.record_every == 0 {
            return Err(ConfigError::InvalidRecordInterval);
        }
        InfiniteAlleles::new(self.evolution.mutation_rate)?;
        Demes::new(size, self.evolution.demes)?;
        if self.genealogy.retention == AncestryRetention::Window(0) {
            return Err(ConfigError::EmptyRetentionWindow);
        }
        self.initialization.validate()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Copy of this configuration with a different seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        let mut config = self.clone();
        config.execution.seed = Some(seed);
        config
    }
}
