use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::defaults;

/// Format of exported data.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Random seed (default: seeded from entropy)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Write exported data to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Show a progress bar
    #[arg(long, global = true)]
    pub progress: bool,
}

#[derive(Args, Debug)]
pub struct DriftArgs {
    /// Number of replicates per initial frequency
    #[arg(long, visible_alias = "sim", default_value_t = defaults::DRIFT_SIMS)]
    pub sims: usize,

    /// Population size
    #[arg(long, default_value_t = defaults::DRIFT_SIZE)]
    pub size: usize,

    /// Number of generations
    #[arg(long, visible_alias = "gen", default_value_t = defaults::DRIFT_GENERATIONS)]
    pub generations: usize,

    /// Initial frequency of allele A (repeatable; default: sweep 0.1 to 0.9)
    #[arg(short, long)]
    pub p: Vec<f64>,

    /// Export A-frequency trajectories instead of the summary table
    #[arg(long)]
    pub trajectories: bool,
}

#[derive(Args, Debug)]
pub struct MutationArgs {
    /// Number of replicates
    #[arg(long, visible_alias = "sim", default_value_t = defaults::MUTATION_SIMS)]
    pub sims: usize,

    /// Population size
    #[arg(long, default_value_t = defaults::MUTATION_SIZE)]
    pub size: usize,

    /// Infinite-allele mutation rate per lineage per generation
    #[arg(short = 'm', long, default_value_t = defaults::MUTATION_RATE)]
    pub mutation_rate: f64,

    /// Number of generations
    #[arg(long, visible_alias = "gen", default_value_t = defaults::MUTATION_GENERATIONS)]
    pub generations: usize,

    /// Record label frequencies every N generations
    #[arg(long, default_value_t = defaults::MUTATION_RECORD_EVERY)]
    pub record_every: usize,
}

#[derive(Args, Debug)]
pub struct StructureArgs {
    /// Size of the whole (undivided) population
    #[arg(long, default_value_t = defaults::STRUCTURE_SIZE)]
    pub size: usize,

    /// Initial frequency of allele A
    #[arg(short, long, default_value_t = defaults::STRUCTURE_P)]
    pub p: f64,

    /// Number of generations
    #[arg(long, default_value_t = defaults::STRUCTURE_GENERATIONS)]
    pub generations: usize,

    /// Number of isolated subpopulations
    #[arg(long, default_value_t = defaults::STRUCTURE_DEMES)]
    pub demes: usize,
}

#[derive(Args, Debug)]
pub struct CoalescentArgs {
    /// Population size
    #[arg(long, default_value_t = defaults::COALESCENT_SIZE)]
    pub size: usize,

    /// Number of replicates
    #[arg(long, visible_alias = "sim", default_value_t = defaults::COALESCENT_SIMS)]
    pub sims: usize,

    /// Maximum number of generations per replicate
    #[arg(long, default_value_t = defaults::COALESCENT_MAX_ITER)]
    pub max_iter: usize,

    /// Random lineage groups queried after each replicate
    #[arg(long, default_value_t = defaults::COALESCENT_GROUPS)]
    pub groups: usize,

    /// Keep parent links for this many recent generations only
    #[arg(long)]
    pub window: Option<usize>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// JSON configuration file (see `gpop config`)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Number of independent replicates
    #[arg(short, long, default_value_t = 1)]
    pub replicates: usize,
}
