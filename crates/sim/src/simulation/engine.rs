//! Simulation engine.
//!
//! One call to [`Simulation::step`] is one Wright-Fisher tick: every offspring
//! draws its parent from its own deme, the parent table is appended to the
//! genealogy, offspring may mutate to a fresh label, frequencies are recorded
//! and the stop predicate is evaluated. The run moves from `Initialized` to
//! `Running` on the first tick and ends in `Terminated`, which is absorbing.

use crate::base::{AlleleLabel, LabelCounter, RandomSource, SeededSource};
use crate::errors::{GenealogyError, SimulationError};
use crate::evolution::{InfiniteAlleles, Subdivision};
use crate::genealogy::CoalescenceResult;
use crate::simulation::{Configuration, FrequencyTracker, Population, StopCondition};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum Termination {
    /// The whole population traces back to `ancestor_id`, `generations_ago`
    /// generations before the final one. Both are `None` when that ancestor
    /// lies beyond the retained ancestry window.
    Coalesced {
        ancestor_id: Option<usize>,
        generations_ago: Option<usize>,
    },
    /// Every deme carries a single label.
    Fixed,
    /// The generation bound was reached first.
    MaxGenerations,
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Initialized,
    Running,
    Terminated(Termination),
}

impl RunState {
    pub fn is_terminated(&self) -> bool {
        matches!(self, Self::Terminated(_))
    }

    pub fn termination(&self) -> Option<Termination> {
        match self {
            Self::Terminated(termination) => Some(*termination),
            _ => None,
        }
    }
}

/// Summary of a finished (or abandoned) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Generation reached
    pub generation: usize,
    /// `None` if the run was stopped before a terminal state
    pub termination: Option<Termination>,
    /// Total number of mutation events
    pub mutations: usize,
    /// Number of distinct labels in the final generation
    pub distinct_labels: usize,
    pub frequencies: FrequencyTracker,
}

/// Main simulation engine.
#[derive(Debug)]
pub struct Simulation<S: RandomSource = SeededSource> {
    config: Configuration,
    /// Current population
    population: Population,
    subdivision: Subdivision,
    mutation: InfiniteAlleles,
    /// Source of fresh labels, owned by this run
    labels: LabelCounter,
    tracker: FrequencyTracker,
    state: RunState,
    mutation_events: usize,
    rng: S,
}

impl Simulation<SeededSource> {
    /// Create a simulation seeded from the configured seed, or from entropy
    /// when none is set.
    pub fn new(config: Configuration) -> Result<Self, SimulationError> {
        let rng = SeededSource::from_optional_seed(config.execution.seed);
        Self::with_source(config, rng)
    }
}

impl<S: RandomSource> Simulation<S> {
    /// Create a simulation that draws every random number from `rng`.
    ///
    /// Founder labels are drawn first, then generation 0 is recorded.
    pub fn with_source(config: Configuration, mut rng: S) -> Result<Self, SimulationError> {
        config.validate()?;

        let founders = config
            .initialization
            .founder_labels(config.execution.population_size, &mut rng);
        let labels = LabelCounter::after(&founders);
        let population = Population::founders(
            founders,
            config.evolution.demes,
            config.genealogy.retention,
        )?;
        let subdivision = Subdivision::new(*population.demes());
        let mutation = InfiniteAlleles::new(config.evolution.mutation_rate)?;

        let mut tracker =
            FrequencyTracker::new(config.evolution.demes, config.execution.record_every);
        tracker.snapshot(&population);

        log::debug!(
            "initialized {} lineages in {} deme(s), mutation rate {}, stop {:?}",
            population.size(),
            population.demes().count(),
            mutation.rate(),
            config.execution.stop
        );

        Ok(Self {
            config,
            population,
            subdivision,
            mutation,
            labels,
            tracker,
            state: RunState::Initialized,
            mutation_events: 0,
            rng,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Get the current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Get the current generation number.
    pub fn generation(&self) -> usize {
        self.population.generation()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn frequencies(&self) -> &FrequencyTracker {
        &self.tracker
    }

    /// Total number of mutation events so far.
    pub fn mutation_events(&self) -> usize {
        self.mutation_events
    }

    /// Label the next mutation will receive, `None` once labels ran out.
    pub fn next_label(&self) -> Option<AlleleLabel> {
        self.labels.peek()
    }

    /// Advance a single generation.
    ///
    /// # Errors
    /// Returns [`SimulationError::AlreadyTerminated`] once the run has ended,
    /// and [`SimulationError::LabelsExhausted`] when a mutant cannot get a
    /// fresh label.
    pub fn step(&mut self) -> Result<RunState, SimulationError> {
        if self.state.is_terminated() {
            return Err(SimulationError::AlreadyTerminated(self.generation()));
        }
        self.state = RunState::Running;

        // 1. Resample parents deme by deme
        self.subdivision.advance(&mut self.population, &mut self.rng);

        // 2. Mutate offspring to fresh labels
        let events = self.mutation.mutate(
            self.population.labels_mut(),
            &mut self.labels,
            &mut self.rng,
        )?;
        self.mutation_events += events;

        // 3. Record frequencies
        self.tracker.observe(&self.population);

        // 4. Evaluate the stop predicate
        if let Some(termination) = self.check_termination() {
            self.tracker.ensure_recorded(&self.population);
            self.state = RunState::Terminated(termination);
            log::debug!(
                "run terminated at generation {}: {:?}",
                self.generation(),
                termination
            );
        } else {
            log::trace!(
                "generation {}: {} mutation(s)",
                self.generation(),
                events
            );
        }

        Ok(self.state)
    }

    fn check_termination(&self) -> Option<Termination> {
        match self.config.execution.stop {
            StopCondition::Coalescence => {
                if self.population.all_identical_by_descent() {
                    let ancestor = self.population.genealogy().population_common_ancestor();
                    return Some(Termination::Coalesced {
                        ancestor_id: ancestor.ancestor_id(),
                        generations_ago: ancestor.generations_ago(),
                    });
                }
            }
            StopCondition::Fixation => {
                if self.population.is_fixed() {
                    return Some(Termination::Fixed);
                }
            }
            StopCondition::MaxGenerations => {}
        }

        (self.generation() >= self.config.execution.max_generations)
            .then_some(Termination::MaxGenerations)
    }

    /// Run until the run terminates.
    pub fn run(&mut self) -> Result<Termination, SimulationError> {
        loop {
            if let RunState::Terminated(termination) = self.state {
                return Ok(termination);
            }
            self.step()?;
        }
    }

    /// Run for at most `generations` more generations, stopping early on
    /// termination.
    pub fn run_for(&mut self, generations: usize) -> Result<RunState, SimulationError> {
        for _ in 0..generations {
            if self.state.is_terminated() {
                break;
            }
            self.step()?;
        }
        Ok(self.state)
    }

    /// Most recent common ancestor of a group of current lineages.
    pub fn last_common_ancestor(
        &self,
        group: &[usize],
    ) -> Result<CoalescenceResult, GenealogyError> {
        self.population.last_common_ancestor(group)
    }

    /// Whether the whole population descends from a single ancestor.
    pub fn all_identical_by_descent(&self) -> bool {
        self.population.all_identical_by_descent()
    }

    /// Random group of current lineage ids, drawn with replacement.
    ///
    /// The group size is drawn uniformly from `sizes` first.
    pub fn random_group(&mut self, sizes: RangeInclusive<usize>) -> Vec<usize> {
        let (low, high) = sizes.into_inner();
        let len = if high > low {
            low + self.rng.index(high - low + 1)
        } else {
            low
        };
        let size = self.population.size();
        (0..len).map(|_| self.rng.index(size)).collect()
    }

    /// Consume the simulation and summarize it.
    pub fn into_report(self) -> RunReport {
        RunReport {
            generation: self.generation(),
            termination: self.state.termination(),
            mutations: self.mutation_events,
            distinct_labels: self.population.distinct_labels().len(),
            frequencies: self.tracker,
        }
    }
}
