//! Population management.
//!
//! A [`Population`] holds the allele label of every lineage of the current
//! generation, the deme partition, and the genealogy arena recording where
//! every lineage came from.

use crate::base::AlleleLabel;
use crate::errors::{ConfigError, GenealogyError};
use crate::evolution::Demes;
use crate::genealogy::{AncestryRetention, CoalescenceResult, Genealogy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One lineage of the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    /// Index in the current generation.
    pub id: usize,
    /// Allele label carried by the lineage.
    pub label: AlleleLabel,
}

/// Fixed-size, possibly subdivided, population of haploid lineages.
#[derive(Debug, Clone)]
pub struct Population {
    /// Labels of the current generation, indexed by lineage id
    labels: Vec<AlleleLabel>,
    /// Reused buffer for the next generation's labels
    next_labels: Vec<AlleleLabel>,
    demes: Demes,
    genealogy: Genealogy,
}

impl Population {
    /// Create generation 0 from founder labels.
    ///
    /// # Errors
    /// Fails when there are no founders, when `deme_count` does not divide the
    /// number of founders, or when the population exceeds `u32::MAX` lineages.
    pub fn founders(
        labels: Vec<AlleleLabel>,
        deme_count: usize,
        retention: AncestryRetention,
    ) -> Result<Self, ConfigError> {
        if labels.len() > u32::MAX as usize {
            return Err(ConfigError::PopulationTooLarge(labels.len()));
        }
        if retention == AncestryRetention::Window(0) {
            return Err(ConfigError::EmptyRetentionWindow);
        }
        let demes = Demes::new(labels.len(), deme_count)?;
        let size = labels.len();

        Ok(Self {
            next_labels: Vec::with_capacity(size),
            labels,
            demes,
            genealogy: Genealogy::new(size, retention),
        })
    }

    /// Number of lineages per generation.
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    /// Current generation number.
    pub fn generation(&self) -> usize {
        self.genealogy.generation()
    }

    pub fn demes(&self) -> &Demes {
        &self.demes
    }

    pub fn genealogy(&self) -> &Genealogy {
        &self.genealogy
    }

    /// Labels of the current generation, indexed by lineage id.
    pub fn labels(&self) -> &[AlleleLabel] {
        &self.labels
    }

    pub(crate) fn labels_mut(&mut self) -> &mut [AlleleLabel] {
        &mut self.labels
    }

    /// Labels of the lineages in deme `k`.
    pub fn deme_labels(&self, k: usize) -> &[AlleleLabel] {
        &self.labels[self.demes.range(k)]
    }

    /// Get a lineage by id.
    pub fn lineage(&self, id: usize) -> Option<Lineage> {
        self.labels.get(id).map(|&label| Lineage { id, label })
    }

    /// Iterate over the lineages of the current generation.
    pub fn lineages(&self) -> impl Iterator<Item = Lineage> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(id, &label)| Lineage { id, label })
    }

    /// Ancestor indices of lineage `id`, oldest retained generation first.
    pub fn ancestry(&self, id: usize) -> Option<Vec<usize>> {
        self.genealogy.ancestry(id)
    }

    /// Distinct labels present in the current generation.
    pub fn distinct_labels(&self) -> BTreeSet<AlleleLabel> {
        self.labels.iter().copied().collect()
    }

    /// Whether every deme carries a single label.
    pub fn is_fixed(&self) -> bool {
        (0..self.demes.count()).all(|k| {
            let labels = self.deme_labels(k);
            labels.iter().all(|&l| l == labels[0])
        })
    }

    /// Replace the current generation by its offspring.
    ///
    /// `parents[i]` is the index, in the current generation, of the parent of
    /// offspring `i`. Offspring copy their parent's label; every label is read
    /// from the pre-tick generation.
    ///
    /// # Panics
    /// Panics if `parents.len()` differs from the population size.
    pub fn reproduce(&mut self, parents: &[usize]) {
        assert_eq!(
            parents.len(),
            self.size(),
            "one parent per offspring is required"
        );

        self.next_labels.clear();
        self.next_labels
            .extend(parents.iter().map(|&parent| self.labels[parent]));
        std::mem::swap(&mut self.labels, &mut self.next_labels);
        self.genealogy.push_generation(parents);
    }

    /// Most recent common ancestor of a group of current lineages.
    pub fn last_common_ancestor(
        &self,
        group: &[usize],
    ) -> Result<CoalescenceResult, GenealogyError> {
        self.genealogy.last_common_ancestor(group)
    }

    /// Whether the whole population descends from a single ancestor.
    pub fn all_identical_by_descent(&self) -> bool {
        self.genealogy.all_identical_by_descent()
    }
}
