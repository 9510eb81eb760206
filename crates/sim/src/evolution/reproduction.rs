//! Wright-Fisher reproduction.
//!
//! Every offspring picks its parent uniformly at random, with replacement,
//! from its own deme of the previous generation. All parents are drawn before
//! the population changes, so the whole tick samples from the pre-tick state.

use crate::base::RandomSource;
use crate::simulation::Population;
use std::ops::Range;

/// Multinomial resampling of a panmictic population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrightFisher;

impl WrightFisher {
    /// Create the reproduction model.
    pub fn new() -> Self {
        Self
    }

    /// Draw one parent for every slot of `pool`, uniformly from `pool`.
    ///
    /// Parent indices are absolute and appended to `out` in slot order.
    pub fn draw_parents_into<R: RandomSource + ?Sized>(
        &self,
        pool: Range<usize>,
        rng: &mut R,
        out: &mut Vec<usize>,
    ) {
        let n = pool.len();
        if n == 0 {
            return;
        }
        out.reserve(n);
        for _ in 0..n {
            out.push(pool.start + rng.index(n));
        }
    }

    /// Parents of a whole generation of `size` offspring.
    pub fn draw_parents<R: RandomSource + ?Sized>(&self, size: usize, rng: &mut R) -> Vec<usize> {
        let mut parents = Vec::with_capacity(size);
        self.draw_parents_into(0..size, rng, &mut parents);
        parents
    }

    /// Advance `population` by one generation.
    ///
    /// Parents are drawn deme by deme over the population's own partition, so
    /// lineages never move between demes.
    pub fn advance<R: RandomSource + ?Sized>(&self, population: &mut Population, rng: &mut R) {
        let mut parents = Vec::with_capacity(population.size());
        for range in population.demes().ranges() {
            self.draw_parents_into(range, rng, &mut parents);
        }
        population.reproduce(&parents);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{ScriptedSource, SeededSource};
    use crate::genealogy::AncestryRetention;

    #[test]
    fn test_draw_parents_within_pool() {
        let mut rng = SeededSource::seed_from_u64(42);
        let mut parents = Vec::new();

        WrightFisher::new().draw_parents_into(10..15, &mut rng, &mut parents);

        assert_eq!(parents.len(), 5);
        assert!(parents.iter().all(|p| (10..15).contains(p)));
    }

    #[test]
    fn test_draw_parents_empty_pool() {
        let mut rng = ScriptedSource::default();
        let mut parents = Vec::new();

        WrightFisher::new().draw_parents_into(3..3, &mut rng, &mut parents);

        assert!(parents.is_empty());
    }

    #[test]
    fn test_advance_uses_pre_tick_labels() {
        let mut population =
            Population::founders(vec![10, 11, 12], 1, AncestryRetention::Full).unwrap();
        // offspring 0 copies lineage 2, offspring 2 copies lineage 0: a swap,
        // which only works if labels are read from the old generation
        let mut rng = ScriptedSource::from_indices([2, 1, 0]);

        WrightFisher::new().advance(&mut population, &mut rng);

        assert_eq!(population.labels(), &[12, 11, 10]);
        assert_eq!(population.generation(), 1);
        assert_eq!(population.ancestry(0), Some(vec![2]));
    }

    #[test]
    fn test_advance_keeps_lineages_in_their_deme() {
        let mut population =
            Population::founders(vec![0, 0, 1, 1], 2, AncestryRetention::Full).unwrap();
        // local index 1 in each deme: absolute parents 1, 1, 3, 3
        let mut rng = ScriptedSource::from_indices([1, 1, 1, 1]);

        WrightFisher::new().advance(&mut population, &mut rng);

        assert_eq!(population.ancestry(2), Some(vec![3]));
        assert_eq!(population.labels(), &[0, 0, 1, 1]);

        let mut rng = SeededSource::seed_from_u64(7);
        for _ in 0..100 {
            WrightFisher::new().advance(&mut population, &mut rng);
        }
        assert_eq!(population.deme_labels(0), &[0, 0]);
        assert_eq!(population.deme_labels(1), &[1, 1]);
    }
}
