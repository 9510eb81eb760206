use anyhow::{Context, Result};
use gpop_sim::base::AlleleLabel;
use gpop_sim::simulation::{run_replicates_with, ReplicateSummary, SimulationBuilder};
use serde::Serialize;

use crate::args::{CommonArgs, MutationArgs};
use crate::export::{self, CsvRecord};
use crate::printing::{print_banner, print_parameters, print_summary, progress_bar};

/// Frequency of one label at one recorded generation of one replicate.
#[derive(Debug, Serialize)]
pub struct LabelFrequencyRow {
    pub replicate: usize,
    pub generation: usize,
    pub label: AlleleLabel,
    pub frequency: f64,
}

impl CsvRecord for LabelFrequencyRow {
    const HEADER: &'static str = "replicate,generation,label,frequency";

    fn to_csv(&self) -> String {
        format!(
            "{},{},{},{}",
            self.replicate, self.generation, self.label, self.frequency
        )
    }
}

pub fn run_mutation(args: &MutationArgs, common: &CommonArgs) -> Result<()> {
    print_banner("Infinite-Allele Mutation");

    let mut builder = SimulationBuilder::new()
        .population_size(args.size)
        .generations(args.generations)
        .mutation_rate(args.mutation_rate)
        .record_every(args.record_every);
    if let Some(seed) = common.seed {
        builder = builder.seed(seed);
    }
    let config = builder
        .configuration()
        .context("Invalid mutation parameters")?;
    print_parameters(&config);

    let pb = progress_bar(args.sims as u64, common.progress)?;
    let reports = run_replicates_with(&config, args.sims, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;
    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    for (replicate, report) in reports.iter().enumerate() {
        eprintln!(
            "  Replicate {replicate}: {} distinct label(s) after {} generations, {} mutation event(s)",
            report.distinct_labels, report.generation, report.mutations
        );
    }
    print_summary(&ReplicateSummary::from_reports(&reports));
    eprintln!("\n✓ Mutation simulation complete\n");

    let rows: Vec<LabelFrequencyRow> = reports
        .iter()
        .enumerate()
        .flat_map(|(replicate, report)| {
            report.frequencies.series(0).iter().flat_map(move |snapshot| {
                snapshot
                    .frequencies
                    .iter()
                    .map(move |(&label, &frequency)| LabelFrequencyRow {
                        replicate,
                        generation: snapshot.generation,
                        label,
                        frequency,
                    })
            })
        })
        .collect();
    export::export(&rows, common.format, common.output.as_deref())
}
