use anyhow::{Context, Result};
use gpop_sim::base::{ALLELE_A, ALLELE_B};
use gpop_sim::simulation::SimulationBuilder;
use serde::Serialize;

use crate::args::{CommonArgs, StructureArgs};
use crate::export::{self, CsvRecord};
use crate::printing::{print_banner, print_parameters, progress_bar};

/// Frequency of allele A in one deme at one generation.
#[derive(Debug, Serialize)]
pub struct DemeFrequencyRow {
    pub deme: usize,
    pub generation: usize,
    pub frequency_a: f64,
}

impl CsvRecord for DemeFrequencyRow {
    const HEADER: &'static str = "deme,generation,frequency_a";

    fn to_csv(&self) -> String {
        format!("{},{},{}", self.deme, self.generation, self.frequency_a)
    }
}

pub fn run_structure(args: &StructureArgs, common: &CommonArgs) -> Result<()> {
    print_banner("Population Structure");

    let mut builder = SimulationBuilder::new()
        .population_size(args.size)
        .generations(args.generations)
        .demes(args.demes)
        .init_biallelic(args.p);
    if let Some(seed) = common.seed {
        builder = builder.seed(seed);
    }
    let mut sim = builder
        .build()
        .context("Invalid population structure parameters")?;
    print_parameters(sim.config());

    let pb = progress_bar(args.generations as u64, common.progress)?;
    while !sim.state().is_terminated() {
        sim.step()?;
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    let tracker = sim.frequencies();
    let mut fixed_a = 0;
    let mut fixed_b = 0;
    eprintln!("📊 Final frequency of A per subpopulation");
    for deme in 0..tracker.demes() {
        if let Some(latest) = tracker.latest(deme) {
            let frequency = latest.frequency(ALLELE_A);
            eprintln!("  • Deme {deme}: {frequency:.3}");
            if latest.is_fixed() {
                if latest.frequency(ALLELE_B) > 0.0 {
                    fixed_b += 1;
                } else {
                    fixed_a += 1;
                }
            }
        }
    }
    eprintln!("  • Fixed for A: {fixed_a}, fixed for B: {fixed_b}");
    eprintln!(
        "  • Whole population: {:.3}",
        tracker.final_frequency(ALLELE_A)
    );
    eprintln!("\n✓ Structure simulation complete\n");

    let rows: Vec<DemeFrequencyRow> = tracker
        .iter()
        .map(|snapshot| DemeFrequencyRow {
            deme: snapshot.deme,
            generation: snapshot.generation,
            frequency_a: snapshot.frequency(ALLELE_A),
        })
        .collect();
    export::export(&rows, common.format, common.output.as_deref())
}
