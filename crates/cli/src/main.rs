mod args;
mod commands;
pub mod defaults;
mod export;
mod printing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use args::{CoalescentArgs, CommonArgs, DriftArgs, MutationArgs, RunArgs, StructureArgs};
use commands::{coalescent, config, drift, mutation, run, structure};

/// gpop: Wright-Fisher population genetics simulator
///
/// Simulates genetic drift, infinite-allele mutation, population subdivision
/// and coalescence in fixed-size haploid populations.
#[derive(Parser, Debug)]
#[command(name = "gpop")]
#[command(author, version, about = "Simulates neutral evolution in Wright-Fisher populations", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel replicates
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Genetic drift of a biallelic locus.
    ///
    /// Reports how often allele A ends in the majority for each initial
    /// frequency.
    Drift(DriftArgs),

    /// Infinite-allele mutation from a monomorphic start.
    Mutation(MutationArgs),

    /// Isolated subpopulations drifting independently.
    Structure(StructureArgs),

    /// Run until every lineage shares one ancestor.
    ///
    /// Reports the most recent common ancestor of the population, then of
    /// random groups of lineages.
    Coalescent(CoalescentArgs),

    /// Run any simulation described by a JSON configuration file.
    Run(RunArgs),

    /// Print the default configuration as JSON.
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or(defaults::LOG_FILTER)).init();

    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
        log::debug!("using {threads} worker thread(s)");
    }

    match cli.command {
        Commands::Drift(args) => drift::run_drift(&args, &cli.common)?,
        Commands::Mutation(args) => mutation::run_mutation(&args, &cli.common)?,
        Commands::Structure(args) => structure::run_structure(&args, &cli.common)?,
        Commands::Coalescent(args) => coalescent::run_coalescent(&args, &cli.common)?,
        Commands::Run(args) => run::run_from_config(&args, &cli.common)?,
        Commands::Config => config::print_default_config(&cli.common)?,
    }

    Ok(())
}
