//! Random number sources.
//!
//! Every stochastic operation in the crate draws through [`RandomSource`], so a
//! run is fully determined by the source it is handed. [`SeededSource`] is the
//! production generator; [`ScriptedSource`] replays a fixed sequence of draws
//! and is meant for tests and worked examples.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::VecDeque;

/// Uniform integer and real draws.
pub trait RandomSource {
    /// Uniform index in `[0, upper)`. Callers guarantee `upper > 0`.
    fn index(&mut self, upper: usize) -> usize;

    /// Uniform real in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn index(&mut self, upper: usize) -> usize {
        (**self).index(upper)
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

/// Seedable generator backed by Xoshiro256++.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: Xoshiro256PlusPlus,
}

impl SeededSource {
    /// Deterministic source for a given seed.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Source seeded from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        }
    }

    /// Seeded when a seed is given, entropy-seeded otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seed_from_u64(seed),
            None => Self::from_entropy(),
        }
    }

    /// Draw a raw 64-bit value, used to derive seeds for independent streams.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }
}

impl RandomSource for SeededSource {
    #[inline]
    fn index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }

    #[inline]
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed script of draws.
///
/// Index draws and real draws are kept in separate queues so a test can pin
/// the parent choices independently of the mutation coin flips.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    indices: VecDeque<usize>,
    units: VecDeque<f64>,
}

impl ScriptedSource {
    /// Script both index and real draws.
    pub fn new(
        indices: impl IntoIterator<Item = usize>,
        units: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            units: units.into_iter().collect(),
        }
    }

    /// Script index draws only.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self::new(indices, std::iter::empty())
    }

    /// Number of index draws not yet consumed.
    pub fn remaining_indices(&self) -> usize {
        self.indices.len()
    }

    /// Number of real draws not yet consumed.
    pub fn remaining_units(&self) -> usize {
        self.units.len()
    }
}

impl RandomSource for ScriptedSource {
    /// # Panics
    /// Panics when the script is exhausted or a scripted value is `>= upper`.
    fn index(&mut self, upper: usize) -> usize {
        let value = self
            .indices
            .pop_front()
            .unwrap_or_else(|| panic!("scripted index draws exhausted"));
        assert!(value < upper, "scripted index {value} out of range 0..{upper}");
        value
    }

    /// # Panics
    /// Panics when the script is exhausted or a scripted value is outside `[0, 1)`.
    fn unit(&mut self) -> f64 {
        let value = self
            .units
            .pop_front()
            .unwrap_or_else(|| panic!("scripted unit draws exhausted"));
        assert!((0.0..1.0).contains(&value), "scripted unit {value} outside [0, 1)");
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_source_reproducible() {
        let mut a = SeededSource::seed_from_u64(42);
        let mut b = SeededSource::seed_from_u64(42);

        for _ in 0..100 {
            assert_eq!(a.index(17), b.index(17));
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn test_seeded_source_ranges() {
        let mut rng = SeededSource::seed_from_u64(7);

        for _ in 0..1000 {
            assert!(rng.index(5) < 5);
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_scripted_source_replays_in_order() {
        let mut rng = ScriptedSource::new([2, 0, 1], [0.5, 0.25]);

        assert_eq!(rng.index(3), 2);
        assert_eq!(rng.unit(), 0.5);
        assert_eq!(rng.index(3), 0);
        assert_eq!(rng.remaining_indices(), 1);
        assert_eq!(rng.remaining_units(), 1);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn test_scripted_source_exhausted() {
        let mut rng = ScriptedSource::from_indices([0]);
        rng.index(1);
        rng.index(1);
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut rng = ScriptedSource::from_indices([1]);
        let mut by_ref = &mut rng;
        assert_eq!(RandomSource::index(&mut by_ref, 2), 1);
    }
}
