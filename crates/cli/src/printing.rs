use anyhow::Result;
use gpop_sim::genealogy::AncestryRetention;
use gpop_sim::simulation::{Configuration, LabelInit, ReplicateSummary, StopCondition};
use indicatif::{ProgressBar, ProgressStyle};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {per_sec}";

pub fn print_banner(title: &str) {
    eprintln!("🧬 gpop - {title}");
    eprintln!("============================================\n");
}

/// Progress bar over `len` units, or `None` when progress display is off.
pub fn progress_bar(len: u64, enabled: bool) -> Result<Option<ProgressBar>> {
    if !enabled {
        return Ok(None);
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)?
            .progress_chars("#>-"),
    );
    Ok(Some(pb))
}

pub fn print_parameters(config: &Configuration) {
    let execution = &config.execution;
    eprintln!("📋 Simulation Configuration");
    eprintln!("  • Population Size: {}", execution.population_size);
    eprintln!("  • Generations: {}", execution.max_generations);
    if let Some(seed) = execution.seed {
        eprintln!("  • Random Seed: {seed}");
    } else {
        eprintln!("  • Random Seed: from entropy");
    }
    let stop = match execution.stop {
        StopCondition::MaxGenerations => "generation bound",
        StopCondition::Coalescence => "identity by descent",
        StopCondition::Fixation => "fixation in every deme",
    };
    eprintln!("  • Stop At: {stop}");

    eprintln!("\n⚡ Evolution");
    eprintln!(
        "  • Mutation Rate: {:.2e} (infinite alleles)",
        config.evolution.mutation_rate
    );
    eprintln!("  • Subpopulations: {}", config.evolution.demes);

    eprintln!("\n🌳 Genealogy");
    match config.genealogy.retention {
        AncestryRetention::Full => eprintln!("  • Retention: full history"),
        AncestryRetention::Window(window) => {
            eprintln!("  • Retention: last {window} generations")
        }
    }

    eprintln!("\n🎯 Initialization");
    match config.initialization {
        LabelInit::Monomorphic { label } => eprintln!("  • Monomorphic (label {label})"),
        LabelInit::Biallelic { p } => eprintln!("  • Biallelic, p(A) = {p}"),
        LabelInit::Unique => eprintln!("  • One label per founder"),
    }
    eprintln!();
}

pub fn print_summary(summary: &ReplicateSummary) {
    eprintln!("\n📊 Replicate Summary");
    eprintln!("  • Replicates: {}", summary.replicates);
    eprintln!("  • Coalesced: {}", summary.coalesced);
    eprintln!("  • Fixed: {}", summary.fixed);
    eprintln!("  • Reached generation bound: {}", summary.reached_bound);
    if let Some(mean) = summary.mean_coalescence_generation {
        eprintln!("  • Mean coalescence generation: {mean:.1}");
    }
    eprintln!("  • Mean mutation events: {:.1}", summary.mean_mutations);
}
