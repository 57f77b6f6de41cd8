//! Example diagram listing and export command.

use clap::Args;
use patchbay_config::{factory_diagram_names, factory_diagrams, get_factory_diagram};
use std::path::PathBuf;

use super::common::describe_node;

#[derive(Args)]
pub struct ExamplesArgs {
    /// Show a specific example
    #[arg(value_name = "NAME")]
    name: Option<String>,

    /// Write the example to a JSON file
    #[arg(long, value_name = "PATH", requires = "name")]
    export: Option<PathBuf>,
}

pub fn run(args: ExamplesArgs) -> anyhow::Result<()> {
    let Some(name) = &args.name else {
        println!("Example Diagrams:");
        println!("=================");
        for (short, diagram) in factory_diagram_names().into_iter().zip(factory_diagrams()) {
            let desc = diagram.description.as_deref().unwrap_or("");
            println!("  {:10} {:16} - {}", short, diagram.name, desc);
        }
        println!();
        println!("  Export one with: patchbay examples <name> --export <path>");
        return Ok(());
    };

    let diagram = get_factory_diagram(name).ok_or_else(|| {
        anyhow::anyhow!("Unknown example: {}. Use 'patchbay examples' to list them.", name)
    })?;

    if let Some(path) = &args.export {
        diagram.save(path)?;
        println!("Exported '{}' to {}", diagram.name, path.display());
        return Ok(());
    }

    println!("{}", diagram.name);
    println!("{}", "=".repeat(diagram.name.len()));
    if let Some(desc) = &diagram.description {
        println!("{}", desc);
    }
    println!();
    let (graph, _) = diagram.to_graph();
    println!("Nodes ({}):", graph.node_count());
    for node in graph.nodes() {
        println!("  {}", describe_node(node));
    }
    println!();
    println!("Cables ({}):", graph.edge_count());
    for edge in graph.edges() {
        println!("  {:8} {}  {}", edge.id.as_str(), edge.connection(), edge.signal);
    }
    Ok(())
}
