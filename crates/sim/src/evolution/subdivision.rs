//! Population subdivision without migration.
//!
//! The population is split into `K` equal, contiguous demes. Offspring of a
//! deme only ever draw parents from that deme, so no genetic material crosses
//! deme boundaries.

use crate::base::RandomSource;
use crate::errors::ConfigError;
use crate::evolution::WrightFisher;
use crate::simulation::Population;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Partition of `[0, size)` into `count` equal, contiguous ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demes {
    size: usize,
    count: usize,
}

impl Demes {
    /// Split `size` lineages into `count` demes.
    ///
    /// # Errors
    /// Fails when `size` or `count` is zero or `count` does not divide `size`.
    pub fn new(size: usize, count: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if count == 0 {
            return Err(ConfigError::NoDemes);
        }
        if size % count != 0 {
            return Err(ConfigError::UnevenDemes {
                size,
                demes: count,
            });
        }
        Ok(Self { size, count })
    }

    /// Total number of lineages.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of demes.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Lineages per deme.
    pub fn deme_size(&self) -> usize {
        self.size / self.count
    }

    pub fn is_subdivided(&self) -> bool {
        self.count > 1
    }

    /// Index range of deme `k`.
    pub fn range(&self, k: usize) -> Range<usize> {
        let m = self.deme_size();
        k * m..(k + 1) * m
    }

    /// All deme ranges in order.
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.count).map(move |k| self.range(k))
    }

    /// Deme holding lineage `id`.
    pub fn deme_of(&self, id: usize) -> usize {
        id / self.deme_size()
    }
}

/// Wright-Fisher reproduction applied independently inside each deme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subdivision {
    demes: Demes,
    reproduction: WrightFisher,
}

impl Subdivision {
    pub fn new(demes: Demes) -> Self {
        Self {
            demes,
            reproduction: WrightFisher::new(),
        }
    }

    pub fn demes(&self) -> &Demes {
        &self.demes
    }

    /// Parents for every offspring, drawn deme by deme in index order.
    pub fn draw_parents<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        let mut parents = Vec::with_capacity(self.demes.size());
        for range in self.demes.ranges() {
            self.reproduction.draw_parents_into(range, rng, &mut parents);
        }
        parents
    }

    /// Advance `population` by one generation.
    pub fn advance<R: RandomSource + ?Sized>(&self, population: &mut Population, rng: &mut R) {
        debug_assert_eq!(population.demes(), &self.demes);
        self.reproduction.advance(population, rng);
    }
}
