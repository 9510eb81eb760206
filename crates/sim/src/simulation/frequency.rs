//! Per-generation label frequencies.
//!
//! Each deme keeps its own series of snapshots; counts are never pooled
//! across demes.

use crate::base::AlleleLabel;
use crate::simulation::Population;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Relative frequency of every label in one deme at one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencySnapshot {
    pub generation: usize,
    pub deme: usize,
    pub frequencies: BTreeMap<AlleleLabel, f64>,
}

impl FrequencySnapshot {
    /// Count `labels` and normalise by their number.
    ///
    /// An empty group yields an empty snapshot.
    pub fn from_labels(generation: usize, deme: usize, labels: &[AlleleLabel]) -> Self {
        let mut counts: BTreeMap<AlleleLabel, usize> = BTreeMap::new();
        for &label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }

        let total = labels.len();
        let frequencies = if total == 0 {
            BTreeMap::new()
        } else {
            counts
                .into_iter()
                .map(|(label, count)| (label, count as f64 / total as f64))
                .collect()
        };

        Self {
            generation,
            deme,
            frequencies,
        }
    }

    /// Frequency of `label`, zero when absent.
    pub fn frequency(&self, label: AlleleLabel) -> f64 {
        self.frequencies.get(&label).copied().unwrap_or(0.0)
    }

    /// Number of labels present.
    pub fn distinct_labels(&self) -> usize {
        self.frequencies.len()
    }

    /// Most frequent label; ties go to the smallest label.
    pub fn majority_label(&self) -> Option<AlleleLabel> {
        self.frequencies
            .iter()
            .fold(None, |best: Option<(AlleleLabel, f64)>, (&label, &freq)| match best {
                Some((_, best_freq)) if best_freq >= freq => best,
                _ => Some((label, freq)),
            })
            .map(|(label, _)| label)
    }

    /// Whether a single label remains.
    pub fn is_fixed(&self) -> bool {
        self.frequencies.len() == 1
    }

    /// Sum of all frequencies (1 up to rounding, 0 for an empty snapshot).
    pub fn total(&self) -> f64 {
        self.frequencies.values().sum()
    }
}

/// Records frequency snapshots for every deme of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTracker {
    record_every: usize,
    series: Vec<Vec<FrequencySnapshot>>,
}

impl FrequencyTracker {
    /// Tracker for `demes` demes recording every `record_every` generations.
    pub fn new(demes: usize, record_every: usize) -> Self {
        Self {
            record_every: record_every.max(1),
            series: vec![Vec::new(); demes],
        }
    }

    pub fn record_every(&self) -> usize {
        self.record_every
    }

    /// Number of demes tracked.
    pub fn demes(&self) -> usize {
        self.series.len()
    }

    /// Append a snapshot of every deme of `population`.
    pub fn snapshot(&mut self, population: &Population) {
        let generation = population.generation();
        for (deme, series) in self.series.iter_mut().enumerate() {
            series.push(FrequencySnapshot::from_labels(
                generation,
                deme,
                population.deme_labels(deme),
            ));
        }
    }

    /// Snapshot `population` if its generation falls on the recording interval.
    pub fn observe(&mut self, population: &Population) {
        if population.generation() % self.record_every == 0 {
            self.snapshot(population);
        }
    }

    /// Snapshot `population` unless its generation is already recorded.
    pub fn ensure_recorded(&mut self, population: &Population) {
        let recorded = self
            .latest(0)
            .is_some_and(|s| s.generation == population.generation());
        if !recorded {
            self.snapshot(population);
        }
    }

    /// Snapshot series of deme `deme`.
    pub fn series(&self, deme: usize) -> &[FrequencySnapshot] {
        self.series.get(deme).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Most recent snapshot of deme `deme`.
    pub fn latest(&self, deme: usize) -> Option<&FrequencySnapshot> {
        self.series(deme).last()
    }

    /// `(generation, frequency)` of `label` in deme `deme` over time.
    pub fn trajectory(&self, deme: usize, label: AlleleLabel) -> Vec<(usize, f64)> {
        self.series(deme)
            .iter()
            .map(|s| (s.generation, s.frequency(label)))
            .collect()
    }

    /// Mean frequency of `label` across demes at the latest recorded generation.
    ///
    /// Demes have equal size, so this is the whole-population frequency.
    pub fn final_frequency(&self, label: AlleleLabel) -> f64 {
        let latest: Vec<_> = (0..self.demes()).filter_map(|d| self.latest(d)).collect();
        if latest.is_empty() {
            return 0.0;
        }
        latest.iter().map(|s| s.frequency(label)).sum::<f64>() / latest.len() as f64
    }

    /// Every snapshot, deme by deme.
    pub fn iter(&self) -> impl Iterator<Item = &FrequencySnapshot> {
        self.series.iter().flatten()
    }
}
