//! Diagram information command.

use clap::Args;
use patchbay_core::{Graph, PortHandle};

use super::common::{Context, describe_node};

#[derive(Args)]
pub struct InfoArgs {
    /// Diagram path, saved diagram name, or example name
    diagram: String,

    /// Print the repaired graph as JSON instead
    #[arg(long)]
    json: bool,
}

pub fn run(ctx: &Context, args: InfoArgs) -> anyhow::Result<()> {
    let loaded = ctx.load_diagram(&args.diagram)?;
    let (graph, report) = loaded.graph();

    if args.json {
        let (nodes, edges) = graph.into_parts();
        let value = serde_json::json!({ "nodes": nodes, "edges": edges });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", loaded.diagram.name);
    println!("{}", "=".repeat(loaded.diagram.name.len()));
    if let Some(desc) = &loaded.diagram.description {
        println!("{}", desc);
    }
    if !report.is_clean() {
        println!(
            "(repaired on load: {} edges dropped; run 'patchbay check' for details)",
            report.dropped_edges.len()
        );
    }
    println!();

    print_nodes(&graph);
    print_edges(&graph);
    Ok(())
}

fn print_nodes(graph: &Graph) {
    println!("Nodes ({}):", graph.node_count());
    for node in graph.nodes() {
        println!("  {}", describe_node(node));
        let Some(ports) = graph.ports(&node.id) else {
            continue;
        };
        for port in &ports.inputs {
            let handle = PortHandle::input(port.index);
            let cable = graph
                .edge_at_input(&node.id, port.index)
                .map(|e| format!("<- {}", e.id))
                .unwrap_or_default();
            println!("      {:7} {:10} {}", handle.to_string(), port.signal.as_str(), cable);
        }
        for port in &ports.outputs {
            let handle = PortHandle::output(port.index);
            println!("      {:7} {}", handle.to_string(), port.signal.as_str());
        }
    }
    println!();
}

fn print_edges(graph: &Graph) {
    println!("Cables ({}):", graph.edge_count());
    for edge in graph.edges() {
        println!(
            "  {:8} {}:{} -> {}:{}  {} {}",
            edge.id.as_str(),
            edge.source,
            edge.source_handle(),
            edge.target,
            edge.target_handle(),
            edge.signal,
            edge.color()
        );
    }
}
