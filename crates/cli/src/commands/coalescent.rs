use anyhow::{Context, Result};
use gpop_sim::errors::SimulationError;
use gpop_sim::genealogy::CoalescenceResult;
use gpop_sim::simulation::{map_replicates, ReplicateSummary, SimulationBuilder, Termination};
use serde::Serialize;

use crate::args::{CoalescentArgs, CommonArgs};
use crate::defaults;
use crate::export::{self, CsvRecord};
use crate::printing::{print_banner, print_parameters, print_summary, progress_bar};

/// Common-ancestor answer for one random lineage group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupQuery {
    pub members: Vec<usize>,
    pub result: CoalescenceResult,
}

/// One coalescent replicate: how it ended and its group queries.
#[derive(Debug, Clone, Serialize)]
pub struct CoalescentOutcome {
    pub replicate: usize,
    pub generation: usize,
    pub termination: Termination,
    pub groups: Vec<GroupQuery>,
}

/// Flat export row; the first row of every replicate describes the whole
/// population, the following ones the random groups.
#[derive(Debug, Serialize)]
pub struct CoalescentRow {
    pub replicate: usize,
    pub generation: usize,
    pub query: &'static str,
    pub members: String,
    pub status: &'static str,
    pub ancestor_id: Option<usize>,
    pub generations_ago: Option<usize>,
}

impl CsvRecord for CoalescentRow {
    const HEADER: &'static str =
        "replicate,generation,query,members,status,ancestor_id,generations_ago";

    fn to_csv(&self) -> String {
        let optional = |v: Option<usize>| v.map(|v| v.to_string()).unwrap_or_default();
        format!(
            "{},{},{},{},{},{},{}",
            self.replicate,
            self.generation,
            self.query,
            self.members,
            self.status,
            optional(self.ancestor_id),
            optional(self.generations_ago)
        )
    }
}

fn status_label(result: &CoalescenceResult) -> &'static str {
    match result {
        CoalescenceResult::Found { .. } => "found",
        CoalescenceResult::NotFound => "not_found",
        CoalescenceResult::Unknown => "unknown",
    }
}

impl CoalescentOutcome {
    fn rows(&self) -> Vec<CoalescentRow> {
        let mut rows = Vec::with_capacity(self.groups.len() + 1);
        let (status, ancestor_id, generations_ago) = match self.termination {
            Termination::Coalesced {
                ancestor_id: Some(ancestor_id),
                generations_ago,
            } => ("found", Some(ancestor_id), generations_ago),
            Termination::Coalesced { .. } => ("unknown", None, None),
            _ => ("max_generations", None, None),
        };
        rows.push(CoalescentRow {
            replicate: self.replicate,
            generation: self.generation,
            query: "population",
            members: "all".to_string(),
            status,
            ancestor_id,
            generations_ago,
        });
        for group in &self.groups {
            let members: Vec<String> = group.members.iter().map(|m| m.to_string()).collect();
            rows.push(CoalescentRow {
                replicate: self.replicate,
                generation: self.generation,
                query: "group",
                members: members.join(" "),
                status: status_label(&group.result),
                ancestor_id: group.result.ancestor_id(),
                generations_ago: group.result.generations_ago(),
            });
        }
        rows
    }

    fn print(&self) {
        eprintln!("Replicate {}", self.replicate);
        match self.termination {
            Termination::Coalesced {
                ancestor_id: Some(ancestor_id),
                generations_ago: Some(generations_ago),
            } => eprintln!(
                "  ✓ Identical by descent at generation {} with ancestor {ancestor_id} \
                 of generation {} ({generations_ago} generation(s) ago)",
                self.generation,
                self.generation - generations_ago
            ),
            Termination::Coalesced { .. } => eprintln!(
                "  ✓ Identical by descent at generation {}, ancestor beyond the retained window",
                self.generation
            ),
            _ => eprintln!(
                "  ⚠️  Maximum number of iterations reached ({} generations)",
                self.generation
            ),
        }
        for group in &self.groups {
            match group.result {
                CoalescenceResult::Found {
                    ancestor_id,
                    generations_ago,
                } => eprintln!(
                    "    • Group {:?}: ancestor {ancestor_id}, {generations_ago} generation(s) ago",
                    group.members
                ),
                CoalescenceResult::NotFound => {
                    eprintln!("    • Group {:?}: no common ancestor", group.members)
                }
                CoalescenceResult::Unknown => eprintln!(
                    "    • Group {:?}: no common ancestor within the retained window",
                    group.members
                ),
            }
        }
    }
}

pub fn run_coalescent(args: &CoalescentArgs, common: &CommonArgs) -> Result<()> {
    print_banner("Coalescent");

    let mut builder = SimulationBuilder::new()
        .population_size(args.size)
        .generations(args.max_iter)
        .init_unique()
        .stop_at_coalescence();
    if let Some(seed) = common.seed {
        builder = builder.seed(seed);
    }
    if let Some(window) = args.window {
        builder = builder.retention_window(window);
    }
    let config = builder
        .configuration()
        .context("Invalid coalescent parameters")?;
    print_parameters(&config);

    let pb = progress_bar(args.sims as u64, common.progress)?;
    let outcomes = map_replicates(&config, args.sims, |replicate, mut sim| {
        let termination = sim.run()?;
        let groups = (0..args.groups)
            .map(|_| {
                let members = sim.random_group(
                    defaults::COALESCENT_GROUP_MIN..=defaults::COALESCENT_GROUP_MAX,
                );
                let result = sim.last_common_ancestor(&members)?;
                Ok(GroupQuery { members, result })
            })
            .collect::<Result<Vec<_>, SimulationError>>()?;
        if let Some(pb) = &pb {
            pb.inc(1);
        }
        Ok((sim.into_report(), termination, replicate, groups))
    })?;
    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut rows = Vec::new();
    for (report, termination, replicate, groups) in outcomes {
        let outcome = CoalescentOutcome {
            replicate,
            generation: report.generation,
            termination,
            groups,
        };
        outcome.print();
        rows.extend(outcome.rows());
        reports.push(report);
    }
    print_summary(&ReplicateSummary::from_reports(&reports));
    eprintln!("\n✓ Coalescent simulation complete\n");

    export::export(&rows, common.format, common.output.as_deref())
}
