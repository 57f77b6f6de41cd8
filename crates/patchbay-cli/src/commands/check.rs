//! Diagram check command: load with repair and report.

use clap::Args;
use patchbay_core::{DropReason, RepairReport};
use std::path::PathBuf;

use super::common::Context;

#[derive(Args)]
pub struct CheckArgs {
    /// Diagram path, saved diagram name, or example name
    diagram: String,

    /// Write the repaired diagram to this path
    #[arg(short, long, value_name = "OUT")]
    write: Option<PathBuf>,
}

pub fn run(ctx: &Context, args: CheckArgs) -> anyhow::Result<()> {
    let loaded = ctx.load_diagram(&args.diagram)?;
    let (graph, report) = loaded.graph();

    println!("Diagram: {}", loaded.diagram.name);
    if let Some(path) = &loaded.path {
        println!("File:    {}", path.display());
    }
    println!(
        "Nodes:   {} ({} in file)",
        graph.node_count(),
        loaded.diagram.node_count()
    );
    println!(
        "Edges:   {} ({} in file)",
        graph.edge_count(),
        loaded.diagram.edge_count()
    );
    println!();

    if report.is_clean() {
        println!("OK: no repairs needed");
    } else {
        print_report(&report);
    }

    if let Some(out) = &args.write {
        loaded.save_graph(&graph, out)?;
        println!();
        println!("Wrote repaired diagram to {}", out.display());
    }

    Ok(())
}

fn print_report(report: &RepairReport) {
    println!("Repairs:");
    for id in &report.duplicate_nodes {
        println!("  dropped duplicate node {}", id);
    }
    for id in &report.cleared_selections {
        println!("  cleared unavailable output selection on {}", id);
    }
    for dropped in &report.dropped_edges {
        let why = match &dropped.reason {
            DropReason::Invalid(reason) => reason.clone(),
            DropReason::InputOccupied(by) => format!("input already fed by {}", by),
            DropReason::ConsoleOutputTaken(by) => format!("console output already used by {}", by),
            DropReason::DuplicateId => "duplicate edge id".to_string(),
        };
        println!(
            "  dropped {} ({}): {}",
            dropped.edge.id,
            dropped.edge.connection(),
            why
        );
    }
    for id in &report.refreshed_edges {
        println!("  refreshed cached signal type of {}", id);
    }
}
