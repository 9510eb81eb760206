use anyhow::{bail, Context, Result};
use gpop_sim::base::AlleleLabel;
use gpop_sim::simulation::{
    run_replicates_with, Configuration, ReplicateSummary, RunReport, Simulation,
};
use serde::Serialize;
use std::path::Path;

use crate::args::{CommonArgs, OutputFormat, RunArgs};
use crate::export::{self, CsvRecord};
use crate::printing::{print_banner, print_parameters, print_summary, progress_bar};

#[derive(Debug, Serialize)]
pub struct FrequencyRow {
    pub replicate: usize,
    pub deme: usize,
    pub generation: usize,
    pub label: AlleleLabel,
    pub frequency: f64,
}

impl CsvRecord for FrequencyRow {
    const HEADER: &'static str = "replicate,deme,generation,label,frequency";

    fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.replicate, self.deme, self.generation, self.label, self.frequency
        )
    }
}

pub fn load_configuration(path: &Path) -> Result<Configuration> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration {}", path.display()))?;
    Configuration::from_json(&text)
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

pub fn run_from_config(args: &RunArgs, common: &CommonArgs) -> Result<()> {
    print_banner("Running Simulation");

    if args.replicates == 0 {
        bail!("At least one replicate is required");
    }
    let mut config = load_configuration(&args.config)?;
    if let Some(seed) = common.seed {
        config = config.with_seed(seed);
    }
    print_parameters(&config);

    let reports = if args.replicates == 1 {
        vec![run_single(config, common.progress)?]
    } else {
        let pb = progress_bar(args.replicates as u64, common.progress)?;
        let reports = run_replicates_with(&config, args.replicates, |_| {
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        })?;
        if let Some(pb) = pb {
            pb.finish_with_message("Done");
        }
        reports
    };

    for (replicate, report) in reports.iter().enumerate() {
        eprintln!(
            "  Replicate {replicate}: generation {}, {:?}",
            report.generation, report.termination
        );
    }
    print_summary(&ReplicateSummary::from_reports(&reports));
    eprintln!("\n✓ Simulation complete\n");

    export_reports(&reports, common.format, common.output.as_deref())
}

fn run_single(config: Configuration, show_progress: bool) -> Result<RunReport> {
    let total = config.execution.max_generations;
    let mut sim = Simulation::new(config)?;

    let pb = progress_bar(total as u64, show_progress)?;
    while !sim.state().is_terminated() {
        let generation = sim.generation() + 1;
        sim.step()
            .with_context(|| format!("Generation {generation} failed"))?;
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }
    Ok(sim.into_report())
}

/// Full reports as JSON, or the flattened frequency series as CSV.
fn export_reports(reports: &[RunReport], format: OutputFormat, output: Option<&Path>) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let content = serde_json::to_string_pretty(reports)?;
            export::emit(&content, output)
        }
        OutputFormat::Csv => {
            let rows: Vec<FrequencyRow> = reports
                .iter()
                .enumerate()
                .flat_map(|(replicate, report)| {
                    report.frequencies.iter().flat_map(move |snapshot| {
                        snapshot
                            .frequencies
                            .iter()
                            .map(move |(&label, &frequency)| FrequencyRow {
                                replicate,
                                deme: snapshot.deme,
                                generation: snapshot.generation,
                                label,
                                frequency,
                            })
                    })
                })
                .collect();
            export::export(&rows, format, output)
        }
    }
}
