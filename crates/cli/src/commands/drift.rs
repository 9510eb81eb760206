use anyhow::{Context, Result};
use gpop_sim::base::{SeededSource, ALLELE_A};
use gpop_sim::simulation::{majority_fraction, run_replicates_with, SimulationBuilder};
use serde::Serialize;

use crate::args::{CommonArgs, DriftArgs};
use crate::defaults;
use crate::export::{self, CsvRecord};
use crate::printing::{print_banner, progress_bar};

/// Outcome of all replicates started from one initial frequency.
#[derive(Debug, Serialize)]
pub struct DriftRow {
    pub p: f64,
    pub replicates: usize,
    /// Fraction of replicates in which allele A ends in the majority
    pub majority_a: f64,
    pub mean_final_a: f64,
}

impl CsvRecord for DriftRow {
    const HEADER: &'static str = "p,replicates,majority_a,mean_final_a";

    fn to_csv(&self) -> String {
        format!(
            "{},{},{:.4},{:.4}",
            self.p, self.replicates, self.majority_a, self.mean_final_a
        )
    }
}

#[derive(Debug, Serialize)]
pub struct TrajectoryRow {
    pub p: f64,
    pub replicate: usize,
    pub generation: usize,
    pub frequency_a: f64,
}

impl CsvRecord for TrajectoryRow {
    const HEADER: &'static str = "p,replicate,generation,frequency_a";

    fn to_csv(&self) -> String {
        format!(
            "{},{},{},{}",
            self.p, self.replicate, self.generation, self.frequency_a
        )
    }
}

pub fn run_drift(args: &DriftArgs, common: &CommonArgs) -> Result<()> {
    print_banner("Genetic Drift");

    let sweep = if args.p.is_empty() {
        defaults::DRIFT_SWEEP.to_vec()
    } else {
        args.p.clone()
    };
    eprintln!(
        "Population size {}, {} generations, {} replicate(s) per p\n",
        args.size, args.generations, args.sims
    );

    let pb = progress_bar((sweep.len() * args.sims) as u64, common.progress)?;
    let mut master = SeededSource::from_optional_seed(common.seed);
    let mut rows = Vec::with_capacity(sweep.len());
    let mut trajectories = Vec::new();

    for &p in &sweep {
        let config = SimulationBuilder::new()
            .population_size(args.size)
            .generations(args.generations)
            .init_biallelic(p)
            .seed(master.next_seed())
            .configuration()
            .with_context(|| format!("Invalid drift parameters for p = {p}"))?;

        let reports = run_replicates_with(&config, args.sims, |_| {
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        })?;

        let mean_final_a = if reports.is_empty() {
            0.0
        } else {
            reports
                .iter()
                .map(|r| r.frequencies.final_frequency(ALLELE_A))
                .sum::<f64>()
                / reports.len() as f64
        };
        let row = DriftRow {
            p,
            replicates: reports.len(),
            majority_a: majority_fraction(&reports, ALLELE_A),
            mean_final_a,
        };
        if pb.is_none() {
            eprintln!(
                "  p = {:.2}: A in the majority in {:.1}% of replicates",
                row.p,
                row.majority_a * 100.0
            );
        }
        rows.push(row);

        if args.trajectories {
            for (replicate, report) in reports.iter().enumerate() {
                trajectories.extend(report.frequencies.trajectory(0, ALLELE_A).into_iter().map(
                    |(generation, frequency_a)| TrajectoryRow {
                        p,
                        replicate,
                        generation,
                        frequency_a,
                    },
                ));
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }
    eprintln!("\n✓ Drift simulation complete\n");

    let output = common.output.as_deref();
    if args.trajectories {
        export::export(&trajectories, common.format, output)
    } else {
        export::export(&rows, common.format, output)
    }
}
