//! Shared default values for the command-line front end.
//! These mirror the parameters of the classic teaching scripts.

pub const DRIFT_SIMS: usize = 100;
pub const DRIFT_SIZE: usize = 100;
pub const DRIFT_GENERATIONS: usize = 1000;
/// Initial frequencies of allele A swept when `--p` is not given.
pub const DRIFT_SWEEP: [f64; 9] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

pub const MUTATION_SIMS: usize = 10;
pub const MUTATION_SIZE: usize = 100;
pub const MUTATION_RATE: f64 = 0.01;
pub const MUTATION_GENERATIONS: usize = 1000;
pub const MUTATION_RECORD_EVERY: usize = 10;

pub const STRUCTURE_SIZE: usize = 1000;
pub const STRUCTURE_P: f64 = 0.5;
pub const STRUCTURE_GENERATIONS: usize = 1000;
pub const STRUCTURE_DEMES: usize = 10;

pub const COALESCENT_SIZE: usize = 100;
pub const COALESCENT_SIMS: usize = 10;
pub const COALESCENT_MAX_ITER: usize = 1000;
pub const COALESCENT_GROUPS: usize = 10;
pub const COALESCENT_GROUP_MIN: usize = 2;
pub const COALESCENT_GROUP_MAX: usize = 5;

pub const LOG_FILTER: &str = "warn";
