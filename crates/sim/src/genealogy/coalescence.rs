//! Coalescence detection.
//!
//! Group members are walked back through the parent links one generation at a
//! time. Once they meet in a single ancestor they share every older ancestor
//! as well, so the first meeting point is the most recent common ancestor.
//!
//! Whether a group coalesces at all is read from the founder index the arena
//! keeps for every lineage, so a retention window can hide the identity of an
//! ancestor but never its existence.

use crate::errors::GenealogyError;
use crate::genealogy::Genealogy;
use serde::{Deserialize, Serialize};

/// Answer of a common-ancestor query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum CoalescenceResult {
    /// The group shares ancestor `ancestor_id`, an index into the generation
    /// `generations_ago` generations before the current one.
    Found {
        ancestor_id: usize,
        generations_ago: usize,
    },
    /// The group descends from more than one founder, so it has no common
    /// ancestor at any depth.
    NotFound,
    /// The group has a common ancestor, but it lies beyond the retained
    /// window and its identity was discarded.
    Unknown,
}

impl CoalescenceResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    pub fn ancestor_id(&self) -> Option<usize> {
        match self {
            Self::Found { ancestor_id, .. } => Some(*ancestor_id),
            _ => None,
        }
    }

    pub fn generations_ago(&self) -> Option<usize> {
        match self {
            Self::Found {
                generations_ago, ..
            } => Some(*generations_ago),
            _ => None,
        }
    }
}

/// Most recent common ancestor of `group`, a set of current lineage ids.
///
/// Repeated ids count once. A group that collapses to one lineage is its own
/// ancestor, zero generations ago.
pub fn last_common_ancestor(
    genealogy: &Genealogy,
    group: &[usize],
) -> Result<CoalescenceResult, GenealogyError> {
    if group.is_empty() {
        return Err(GenealogyError::EmptyGroup);
    }
    let size = genealogy.size();
    if let Some(&id) = group.iter().find(|&&id| id >= size) {
        return Err(GenealogyError::LineageOutOfRange { id, size });
    }

    let mut frontier = group.to_vec();
    frontier.sort_unstable();
    frontier.dedup();
    Ok(walk_to_common_ancestor(genealogy, frontier))
}

/// Most recent common ancestor of the whole current generation.
pub fn population_common_ancestor(genealogy: &Genealogy) -> CoalescenceResult {
    if genealogy.size() == 0 {
        return CoalescenceResult::NotFound;
    }
    let frontier: Vec<usize> = (0..genealogy.size()).collect();
    walk_to_common_ancestor(genealogy, frontier)
}

/// Whether the whole current generation traces back to a single ancestor.
///
/// Answered from the founder index alone, so the result is the same under
/// every retention setting.
pub fn all_identical_by_descent(genealogy: &Genealogy) -> bool {
    genealogy.population_shares_founder()
}

fn walk_to_common_ancestor(genealogy: &Genealogy, mut frontier: Vec<usize>) -> CoalescenceResult {
    if let [only] = frontier[..] {
        return CoalescenceResult::Found {
            ancestor_id: only,
            generations_ago: 0,
        };
    }
    if !genealogy.share_founder(&frontier) {
        return CoalescenceResult::NotFound;
    }

    let oldest = genealogy.horizon() + 1;
    for (step, generation) in (oldest..=genealogy.generation()).rev().enumerate() {
        for lineage in frontier.iter_mut() {
            *lineage = genealogy.link(generation, *lineage);
        }
        frontier.sort_unstable();
        frontier.dedup();

        if let [ancestor_id] = frontier[..] {
            return CoalescenceResult::Found {
                ancestor_id,
                generations_ago: step + 1,
            };
        }
    }

    // a shared founder is always reached by a complete history
    debug_assert!(!genealogy.is_complete());
    CoalescenceResult::Unknown
}
