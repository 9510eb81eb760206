//! Independent replicate runs.
//!
//! Replicates share one configuration and differ only in their seed. Seeds are
//! drawn from a master generator before any replicate starts, so results do
//! not depend on how rayon schedules the work.

use crate::base::{AlleleLabel, SeededSource};
use crate::errors::SimulationError;
use crate::simulation::{Configuration, RunReport, Simulation, Termination};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Seeds of `count` replicates, derived from the configured seed.
pub fn replicate_seeds(config: &Configuration, count: usize) -> Vec<u64> {
    let mut master = SeededSource::from_optional_seed(config.execution.seed);
    (0..count).map(|_| master.next_seed()).collect()
}

/// Build `count` independent simulations and hand each to `f` in parallel.
///
/// Results come back in replicate order.
pub fn map_replicates<T, F>(
    config: &Configuration,
    count: usize,
    f: F,
) -> Result<Vec<T>, SimulationError>
where
    T: Send,
    F: Fn(usize, Simulation) -> Result<T, SimulationError> + Sync + Send,
{
    config.validate()?;
    let seeds = replicate_seeds(config, count);
    log::debug!("running {count} replicate(s)");

    seeds
        .into_par_iter()
        .enumerate()
        .map(|(replicate, seed)| {
            let sim = Simulation::new(config.with_seed(seed))?;
            f(replicate, sim)
        })
        .collect()
}

/// Run `count` replicates to termination.
pub fn run_replicates(
    config: &Configuration,
    count: usize,
) -> Result<Vec<RunReport>, SimulationError> {
    run_replicates_with(config, count, |_| {})
}

/// Run `count` replicates to termination, calling `on_finish` as each ends.
pub fn run_replicates_with<F>(
    config: &Configuration,
    count: usize,
    on_finish: F,
) -> Result<Vec<RunReport>, SimulationError>
where
    F: Fn(&RunReport) + Sync + Send,
{
    map_replicates(config, count, |_, mut sim| {
        sim.run()?;
        let report = sim.into_report();
        on_finish(&report);
        Ok(report)
    })
}

/// Fraction of replicates in which `label` ends above one half.
pub fn majority_fraction(reports: &[RunReport], label: AlleleLabel) -> f64 {
    if reports.is_empty() {
        return 0.0;
    }
    let wins = reports
        .iter()
        .filter(|r| r.frequencies.final_frequency(label) > 0.5)
        .count();
    wins as f64 / reports.len() as f64
}

/// Outcome counts over a set of replicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicateSummary {
    pub replicates: usize,
    pub coalesced: usize,
    pub fixed: usize,
    pub reached_bound: usize,
    /// Mean final generation of the coalesced replicates
    pub mean_coalescence_generation: Option<f64>,
    pub mean_mutations: f64,
}

impl ReplicateSummary {
    pub fn from_reports(reports: &[RunReport]) -> Self {
        let mut summary = Self {
            replicates: reports.len(),
            coalesced: 0,
            fixed: 0,
            reached_bound: 0,
            mean_coalescence_generation: None,
            mean_mutations: 0.0,
        };

        let mut coalescence_generations = 0usize;
        for report in reports {
            match report.termination {
                Some(Termination::Coalesced { .. }) => {
                    summary.coalesced += 1;
                    coalescence_generations += report.generation;
                }
                Some(Termination::Fixed) => summary.fixed += 1,
                Some(Termination::MaxGenerations) => summary.reached_bound += 1,
                None => {}
            }
        }

        if summary.coalesced > 0 {
            summary.mean_coalescence_generation =
                Some(coalescence_generations as f64 / summary.coalesced as f64);
        }
        if !reports.is_empty() {
            summary.mean_mutations =
                reports.iter().map(|r| r.mutations).sum::<usize>() as f64 / reports.len() as f64;
        }
        summary
    }
}
