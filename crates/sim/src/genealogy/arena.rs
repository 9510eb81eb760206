use crate::errors::GenealogyError;
use crate::genealogy::coalescence::{self, CoalescenceResult};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How much parent history a run keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AncestryRetention {
    /// Keep every parent table back to the founders.
    #[default]
    Full,
    /// Keep only the parent tables of the most recent `n` generations.
    Window(usize),
}

/// Flat arena of parent links for every retained generation.
///
/// Entry `(g, i)` is the index, in generation `g - 1`, of the parent of lineage
/// `i` of generation `g`. Tables are stored back to back, so the link for any
/// `(generation, lineage)` pair is a single index computation. Links are
/// retained for generations `horizon + 1 ..= generation`; `horizon` stays at
/// zero under [`AncestryRetention::Full`].
///
/// Independently of the window, every current lineage also carries the index
/// of its generation-0 founder. Two lineages share an ancestor at some depth
/// exactly when they share a founder, so that question never depends on how
/// much history was kept.
#[derive(Debug, Clone)]
pub struct Genealogy {
    size: usize,
    generation: usize,
    horizon: usize,
    links: VecDeque<u32>,
    retention: AncestryRetention,
    /// Founder of each current lineage
    founders: Vec<u32>,
    next_founders: Vec<u32>,
}

impl Genealogy {
    /// Empty genealogy for `size` founders at generation 0.
    ///
    /// `size` must not exceed `u32::MAX`. Link storage grows one table per
    /// generation and is never reserved for the whole window up front.
    pub fn new(size: usize, retention: AncestryRetention) -> Self {
        Self {
            size,
            generation: 0,
            horizon: 0,
            links: VecDeque::with_capacity(size),
            retention,
            founders: (0..size).map(|id| id as u32).collect(),
            next_founders: Vec::with_capacity(size),
        }
    }

    /// Number of lineages per generation.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current generation.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Oldest generation still reachable by walking parent links.
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn retention(&self) -> AncestryRetention {
        self.retention
    }

    /// Number of generations of parent links currently held.
    pub fn retained_depth(&self) -> usize {
        self.generation - self.horizon
    }

    /// Whether the history reaches back to the founders.
    pub fn is_complete(&self) -> bool {
        self.horizon == 0
    }

    /// Append the parent table of a new generation.
    ///
    /// `parents[i]` is the index, in the current generation, of the parent of
    /// offspring `i`. Drops the oldest tables beyond the retention window.
    pub fn push_generation(&mut self, parents: &[usize]) {
        debug_assert_eq!(parents.len(), self.size, "parent table size mismatch");
        debug_assert!(parents.iter().all(|&p| p < self.size));

        self.links.extend(parents.iter().map(|&p| p as u32));
        self.generation += 1;

        self.next_founders.clear();
        self.next_founders
            .extend(parents.iter().map(|&p| self.founders[p]));
        std::mem::swap(&mut self.founders, &mut self.next_founders);

        if let AncestryRetention::Window(window) = self.retention {
            while self.retained_depth() > window {
                self.links.drain(..self.size);
                self.horizon += 1;
            }
        }
    }

    /// Parent, in generation `generation - 1`, of lineage `id` of `generation`.
    ///
    /// `None` when the link is outside the retained range.
    #[inline]
    pub fn parent(&self, generation: usize, id: usize) -> Option<usize> {
        if generation <= self.horizon || generation > self.generation || id >= self.size {
            return None;
        }
        Some(self.link(generation, id))
    }

    /// Generation-0 founder of current lineage `id`.
    pub fn founder(&self, id: usize) -> Option<usize> {
        self.founders.get(id).map(|&f| f as usize)
    }

    /// Whether the given current lineages all descend from one founder.
    ///
    /// Ids must be in range.
    pub(crate) fn share_founder(&self, ids: &[usize]) -> bool {
        match ids.split_first() {
            Some((&first, rest)) => {
                let founder = self.founders[first];
                rest.iter().all(|&id| self.founders[id] == founder)
            }
            None => false,
        }
    }

    /// Whether every current lineage descends from one founder.
    pub(crate) fn population_shares_founder(&self) -> bool {
        match self.founders.split_first() {
            Some((first, rest)) => rest.iter().all(|f| f == first),
            None => false,
        }
    }

    /// Unchecked link lookup for callers that already validated the range.
    #[inline]
    pub(crate) fn link(&self, generation: usize, id: usize) -> usize {
        self.links[(generation - self.horizon - 1) * self.size + id] as usize
    }

    /// Index, in generation `target`, of the ancestor of current lineage `id`.
    pub fn ancestor(&self, id: usize, target: usize) -> Option<usize> {
        if id >= self.size || target < self.horizon || target > self.generation {
            return None;
        }
        Some(((target + 1)..=self.generation).rev().fold(id, |a, g| self.link(g, a)))
    }

    /// Ancestor indices of current lineage `id`, oldest generation first.
    ///
    /// Element `k` is the index of the ancestor in generation `horizon + k`, so
    /// under full retention the result has exactly `generation` entries and
    /// ends with the direct parent.
    pub fn ancestry(&self, id: usize) -> Option<Vec<usize>> {
        if id >= self.size {
            return None;
        }
        let mut ancestry = Vec::with_capacity(self.retained_depth());
        let mut current = id;
        for g in ((self.horizon + 1)..=self.generation).rev() {
            current = self.link(g, current);
            ancestry.push(current);
        }
        ancestry.reverse();
        Some(ancestry)
    }

    /// Most recent common ancestor of a group of current lineages.
    pub fn last_common_ancestor(
        &self,
        group: &[usize],
    ) -> Result<CoalescenceResult, GenealogyError> {
        coalescence::last_common_ancestor(self, group)
    }

    /// Most recent common ancestor of every current lineage.
    pub fn population_common_ancestor(&self) -> CoalescenceResult {
        coalescence::population_common_ancestor(self)
    }

    /// Whether every current lineage descends from one ancestor.
    pub fn all_identical_by_descent(&self) -> bool {
        coalescence::all_identical_by_descent(self)
    }
}
