//! Builder pattern for creating simulations.
//!
//! Provides a fluent API for configuring and creating simulations with
//! sensible defaults and up-front validation.

use crate::base::{AlleleLabel, RandomSource};
use crate::errors::{ConfigError, SimulationError};
use crate::genealogy::AncestryRetention;
use crate::simulation::{
    Configuration, EvolutionConfig, ExecutionConfig, GenealogyConfig, LabelInit, Simulation,
    StopCondition,
};

/// Builder for constructing [`Simulation`] instances with a fluent API.
///
/// # Examples
///
/// ```
/// use gpop_sim::simulation::SimulationBuilder;
///
/// // Neutral drift from a 50:50 start
/// let mut sim = SimulationBuilder::new()
///     .population_size(100)
///     .generations(200)
///     .init_biallelic(0.5)
///     .seed(42)
///     .build()
///     .unwrap();
/// sim.run().unwrap();
///
/// // Run until every lineage shares one ancestor
/// let sim = SimulationBuilder::new()
///     .population_size(20)
///     .generations(10_000)
///     .stop_at_coalescence()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    // Required parameters
    population_size: Option<usize>,
    generations: Option<usize>,

    mutation_rate: f64,             // Default: 0.0 (no mutation)
    demes: usize,                   // Default: 1 (panmictic)
    retention: AncestryRetention,   // Default: full history
    stop: StopCondition,            // Default: generation bound only
    record_every: usize,            // Default: every generation
    initialization: LabelInit,      // Default: monomorphic A
    seed: Option<u64>,              // Default: None (random)
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    /// Create a new simulation builder with default values.
    pub fn new() -> Self {
        Self {
            population_size: None,
            generations: None,
            mutation_rate: 0.0,
            demes: 1,
            retention: AncestryRetention::Full,
            stop: StopCondition::MaxGenerations,
            record_every: 1,
            initialization: LabelInit::default(),
            seed: None,
        }
    }

    /// Start from an existing configuration.
    pub fn from_configuration(config: &Configuration) -> Self {
        Self {
            population_size: Some(config.execution.population_size),
            generations: Some(config.execution.max_generations),
            mutation_rate: config.evolution.mutation_rate,
            demes: config.evolution.demes,
            retention: config.genealogy.retention,
            stop: config.execution.stop,
            record_every: config.execution.record_every,
            initialization: config.initialization,
            seed: config.execution.seed,
        }
    }

    /// Set the population size (required).
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Set the generation bound (required).
    pub fn generations(mut self, generations: usize) -> Self {
        self.generations = Some(generations);
        self
    }

    /// Set the infinite-allele mutation rate (default: 0.0).
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Split the population into `count` equal, isolated demes (default: 1).
    pub fn demes(mut self, count: usize) -> Self {
        self.demes = count;
        self
    }

    /// Set the random seed for reproducibility.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Keep parent links for the last `generations` generations only.
    pub fn retention_window(mut self, generations: usize) -> Self {
        self.retention = AncestryRetention::Window(generations);
        self
    }

    /// Keep the full parent history (default).
    pub fn full_history(mut self) -> Self {
        self.retention = AncestryRetention::Full;
        self
    }

    /// End the run once the whole population is identical by descent.
    pub fn stop_at_coalescence(mut self) -> Self {
        self.stop = StopCondition::Coalescence;
        self
    }

    /// End the run once every deme is fixed for one label.
    pub fn stop_at_fixation(mut self) -> Self {
        self.stop = StopCondition::Fixation;
        self
    }

    /// Record frequencies every `interval` generations (default: 1).
    pub fn record_every(mut self, interval: usize) -> Self {
        self.record_every = interval;
        self
    }

    /// Every founder carries `label` (default, with allele A).
    pub fn init_monomorphic(mut self, label: AlleleLabel) -> Self {
        self.initialization = LabelInit::Monomorphic { label };
        self
    }

    /// Founders carry allele A with probability `p`, allele B otherwise.
    pub fn init_biallelic(mut self, p: f64) -> Self {
        self.initialization = LabelInit::Biallelic { p };
        self
    }

    /// Founder `i` carries label `i`.
    pub fn init_unique(mut self) -> Self {
        self.initialization = LabelInit::Unique;
        self
    }

    /// Assemble and validate the configuration without building a simulation.
    pub fn configuration(&self) -> Result<Configuration, ConfigError> {
        let population_size = self
            .population_size
            .ok_or(ConfigError::MissingRequired("population_size"))?;
        let max_generations = self
            .generations
            .ok_or(ConfigError::MissingRequired("generations"))?;

        let config = Configuration {
            execution: ExecutionConfig {
                population_size,
                max_generations,
                seed: self.seed,
                record_every: self.record_every,
                stop: self.stop,
            },
            evolution: EvolutionConfig {
                mutation_rate: self.mutation_rate,
                demes: self.demes,
            },
            genealogy: GenealogyConfig {
                retention: self.retention,
            },
            initialization: self.initialization,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build the simulation, seeded from the configured seed or from entropy.
    pub fn build(self) -> Result<Simulation, SimulationError> {
        Simulation::new(self.configuration()?)
    }

    /// Build the simulation around an explicit random source.
    ///
    /// The configured seed is kept in the configuration but not used.
    pub fn build_with_source<S: RandomSource>(
        self,
        rng: S,
    ) -> Result<Simulation<S>, SimulationError> {
        Simulation::with_source(self.configuration()?, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::ScriptedSource;

    #[test]
    fn test_builder_basic() {
        let sim = SimulationBuilder::new()
            .population_size(10)
            .generations(5)
            .build()
            .unwrap();

        assert_eq!(sim.population().size(), 10);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.config().execution.max_generations, 5);
    }

    #[test]
    fn test_builder_missing_population_size() {
        let result = SimulationBuilder::new().generations(5).build();
        assert_eq!(
            result.unwrap_err(),
            SimulationError::InvalidConfiguration(ConfigError::MissingRequired("population_size"))
        );
    }

    #[test]
    fn test_builder_missing_generations() {
        let result = SimulationBuilder::new().population_size(10).configuration();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingRequired("generations")
        );
    }

    #[test]
    fn test_builder_invalid_parameters() {
        let builder = SimulationBuilder::new().population_size(10).generations(5);

        assert_eq!(
            builder.clone().mutation_rate(1.5).configuration().unwrap_err(),
            ConfigError::InvalidMutationRate(1.5)
        );
        assert_eq!(
            builder.clone().demes(3).configuration().unwrap_err(),
            ConfigError::UnevenDemes { size: 10, demes: 3 }
        );
        assert_eq!(
            builder.clone().retention_window(0).configuration().unwrap_err(),
            ConfigError::EmptyRetentionWindow
        );
        assert_eq!(
            builder.init_biallelic(-0.1).configuration().unwrap_err(),
            ConfigError::InvalidFrequency(-0.1)
        );
    }

    #[test]
    fn test_builder_all_options() {
        let config = SimulationBuilder::new()
            .population_size(12)
            .generations(30)
            .mutation_rate(0.01)
            .demes(3)
            .seed(7)
            .retention_window(8)
            .stop_at_fixation()
            .record_every(5)
            .init_unique()
            .configuration()
            .unwrap();

        assert_eq!(config.execution.seed, Some(7));
        assert_eq!(config.execution.stop, StopCondition::Fixation);
        assert_eq!(config.execution.record_every, 5);
        assert_eq!(config.evolution.demes, 3);
        assert_eq!(config.genealogy.retention, AncestryRetention::Window(8));
        assert_eq!(config.initialization, LabelInit::Unique);
    }

    #[test]
    fn test_builder_from_configuration_roundtrip() {
        let config = SimulationBuilder::new()
            .population_size(8)
            .generations(3)
            .stop_at_coalescence()
            .init_monomorphic(4)
            .configuration()
            .unwrap();

        let rebuilt = SimulationBuilder::from_configuration(&config)
            .configuration()
            .unwrap();
        assert_eq!(rebuilt, config);
    }

    #[test]
    fn test_builder_with_scripted_source() {
        let rng = ScriptedSource::from_indices([1, 1]);
        let mut sim = SimulationBuilder::new()
            .population_size(2)
            .generations(1)
            .init_unique()
            .build_with_source(rng)
            .unwrap();

        sim.step().unwrap();
        assert_eq!(sim.population().labels(), &[1, 1]);
    }
}
