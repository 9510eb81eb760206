//! Evolution module providing reproduction, subdivision and mutation.
//!
//! This module implements the per-generation evolutionary processes:
//! - **Reproduction**: Wright-Fisher resampling with replacement
//! - **Subdivision**: isolated demes, each resampled on its own (no migration)
//! - **Mutation**: infinite-allele model issuing never-before-seen labels

pub mod mutation;
pub mod reproduction;
pub mod subdivision;

pub use mutation::InfiniteAlleles;
pub use reproduction::WrightFisher;
pub use subdivision::{Demes, Subdivision};
