//! Ancestry tracking and coalescence detection.
//!
//! A run records one parent table per generation in a [`Genealogy`] arena.
//! Lineage ancestries, common-ancestor queries and the identity-by-descent
//! stopping test are all answered from that arena.

mod arena;
pub mod coalescence;

pub use arena::{AncestryRetention, Genealogy};
pub use coalescence::{
    all_identical_by_descent, last_common_ancestor, population_common_ancestor, CoalescenceResult,
};
