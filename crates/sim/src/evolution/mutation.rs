//! Infinite-allele mutation.
//!
//! After resampling, each offspring mutates independently with probability µ.
//! A mutant receives a label that has never existed in the run, taken from the
//! run's [`LabelCounter`]; a non-mutant keeps the label of the parent it was
//! resampled from.
//!
//! With µ = 0 no draws are consumed and the set of labels can only shrink.
//! With µ = 1 every offspring carries a brand-new label every generation.

use crate::base::{AlleleLabel, LabelCounter, RandomSource};
use crate::errors::{ConfigError, SimulationError};
use serde::{Deserialize, Serialize};

/// Infinite-allele mutation model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfiniteAlleles {
    /// Per-offspring, per-generation mutation probability.
    rate: f64,
}

impl InfiniteAlleles {
    /// Create the model.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidMutationRate`] unless `0 <= rate <= 1`.
    pub fn new(rate: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::InvalidMutationRate(rate));
        }
        Ok(Self { rate })
    }

    /// Model that never mutates.
    pub fn none() -> Self {
        Self { rate: 0.0 }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Whether the model leaves labels untouched.
    pub fn is_neutral(&self) -> bool {
        self.rate == 0.0
    }

    /// Mutate freshly resampled offspring labels in place.
    ///
    /// Draws one uniform real per offspring, in offspring order. Returns the
    /// number of mutation events.
    ///
    /// # Errors
    /// Returns [`SimulationError::LabelsExhausted`] when a mutant needs a label
    /// and the counter has none left.
    pub fn mutate<R: RandomSource + ?Sized>(
        &self,
        labels: &mut [AlleleLabel],
        counter: &mut LabelCounter,
        rng: &mut R,
    ) -> Result<usize, SimulationError> {
        if self.is_neutral() {
            return Ok(0);
        }

        let mut events = 0;
        for label in labels.iter_mut() {
            if rng.unit() < self.rate {
                *label = counter.issue().ok_or(SimulationError::LabelsExhausted)?;
                events += 1;
            }
        }
        Ok(events)
    }
}

impl Default for InfiniteAlleles {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{ScriptedSource, SeededSource};

    #[test]
    fn test_rate_validation() {
        assert!(InfiniteAlleles::new(0.0).is_ok());
        assert!(InfiniteAlleles::new(1.0).is_ok());
        assert_eq!(
            InfiniteAlleles::new(1.5),
            Err(ConfigError::InvalidMutationRate(1.5))
        );
        assert!(InfiniteAlleles::new(-0.1).is_err());
        assert!(InfiniteAlleles::new(f64::NAN).is_err());
    }

    #[test]
    fn test_zero_rate_consumes_no_draws() {
        let model = InfiniteAlleles::none();
        let mut labels = vec![0, 0, 1];
        let mut counter = LabelCounter::after(&labels);
        // an empty script panics on any draw
        let mut rng = ScriptedSource::default();

        assert_eq!(model.mutate(&mut labels, &mut counter, &mut rng).unwrap(), 0);
        assert_eq!(labels, vec![0, 0, 1]);
        assert_eq!(counter.peek(), Some(2));
    }

    #[test]
    fn test_mutants_get_distinct_fresh_labels() {
        let model = InfiniteAlleles::new(0.5).unwrap();
        let mut labels = vec![0, 0, 0, 0];
        let mut counter = LabelCounter::starting_at(1);
        let mut rng = ScriptedSource::new(Vec::new(), [0.1, 0.9, 0.2, 0.5]);

        let events = model.mutate(&mut labels, &mut counter, &mut rng).unwrap();

        // two mutations in one tick never share a label
        assert_eq!(events, 2);
        assert_eq!(labels, vec![1, 0, 2, 0]);
        assert_eq!(counter.peek(), Some(3));
    }

    #[test]
    fn test_full_rate_mutates_everyone() {
        let model = InfiniteAlleles::new(1.0).unwrap();
        let mut labels = vec![4; 50];
        let mut counter = LabelCounter::after(&labels);
        let mut rng = SeededSource::seed_from_u64(1);

        let events = model.mutate(&mut labels, &mut counter, &mut rng).unwrap();

        assert_eq!(events, 50);
        assert!(labels.iter().all(|&l| l > 4));
        let mut distinct = labels.clone();
        distinct.dedup();
        assert_eq!(distinct.len(), 50);
    }

    #[test]
    fn test_exhausted_counter_is_an_error() {
        let model = InfiniteAlleles::new(1.0).unwrap();
        let mut labels = vec![0, 0];
        let mut counter = LabelCounter::starting_at(AlleleLabel::MAX);
        let mut rng = ScriptedSource::new(Vec::new(), [0.0, 0.0]);

        assert_eq!(
            model.mutate(&mut labels, &mut counter, &mut rng),
            Err(SimulationError::LabelsExhausted)
        );
        // the last label went to the first mutant and is never handed out again
        assert_eq!(labels[0], AlleleLabel::MAX);
        assert!(counter.is_exhausted());
    }
}
