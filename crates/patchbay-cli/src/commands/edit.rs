//! Diagram editing command.
//!
//! Operations are applied in a fixed order (adds, connects, disconnects,
//! removals, retypes, count changes, type changes). A rejected operation
//! leaves the graph untouched and the rest still run, so every problem is
//! reported at once; the file is only written when nothing was rejected.

use clap::Args;
use patchbay_config::instantiate;
use patchbay_core::{
    Connection, Direction, EdgeId, Graph, NodeId, PortChange, PortHandle, SignalType,
};
use std::path::PathBuf;

use super::common::{Context, parse_key_val};

#[derive(Args)]
pub struct EditArgs {
    /// Diagram path, saved diagram name, or example name
    diagram: String,

    /// Add a node from a catalog template
    #[arg(long, value_name = "TEMPLATE")]
    add: Vec<String>,

    /// Connect an output to an input (e.g., "node_0:out-0=node_1:in-2")
    #[arg(long, value_name = "SRC:out-N=TGT:in-M", value_parser = parse_connection)]
    connect: Vec<Connection>,

    /// Remove a cable
    #[arg(long, value_name = "EDGE")]
    disconnect: Vec<String>,

    /// Remove a node and its cables
    #[arg(long, value_name = "NODE")]
    remove: Vec<String>,

    /// Switch a console's active output (e.g., "node_0=rgb")
    #[arg(long, value_name = "NODE=TYPE", value_parser = parse_key_val)]
    retype: Vec<(String, String)>,

    /// Set the input count of a scalable switch
    #[arg(long, value_name = "NODE=N", value_parser = parse_count)]
    inputs: Vec<(String, usize)>,

    /// Set the output count of a scalable switch
    #[arg(long, value_name = "NODE=N", value_parser = parse_count)]
    outputs: Vec<(String, usize)>,

    /// Set the type of one scalable switch input (e.g., "node_4:2=s-video")
    #[arg(long, value_name = "NODE:IDX=TYPE", value_parser = parse_port_type)]
    input_type: Vec<PortType>,

    /// Set the type of one scalable switch output
    #[arg(long, value_name = "NODE:IDX=TYPE", value_parser = parse_port_type)]
    output_type: Vec<PortType>,

    /// Write the result here instead of back to the source file
    #[arg(short, long, value_name = "OUT")]
    output: Option<PathBuf>,
}

/// A `NODE:IDX=TYPE` argument.
#[derive(Clone, Debug, PartialEq)]
pub struct PortType {
    node: NodeId,
    index: usize,
    signal: SignalType,
}

pub fn run(ctx: &Context, args: EditArgs) -> anyhow::Result<()> {
    let loaded = ctx.load_diagram(&args.diagram)?;
    let Some(target) = args.output.clone().or_else(|| loaded.path.clone()) else {
        anyhow::bail!(
            "'{}' is a bundled example; use -o to save the edited copy",
            args.diagram
        );
    };

    let registry = ctx.settings.load_registry()?;
    let (mut graph, report) = loaded.graph();
    if !report.is_clean() {
        println!(
            "note: diagram repaired on load ({} edges dropped)",
            report.dropped_edges.len()
        );
    }

    let mut rejected = 0usize;
    let mut reject = |op: String, err: &dyn std::fmt::Display| {
        println!("rejected {}: {}", op, err);
        rejected += 1;
    };

    for template in &args.add {
        match instantiate(&registry, template) {
            Ok(new) => {
                let label = new.label.clone();
                let id = graph.add_node(new);
                println!("added {} ({})", id, label);
            }
            Err(e) => reject(format!("--add {}", template), &e),
        }
    }

    for connection in &args.connect {
        match graph.connect(connection) {
            Ok(id) => {
                let signal = graph.edge(&id).map(|e| e.signal.to_string()).unwrap_or_default();
                println!("connected {} {} ({})", id, connection, signal);
            }
            Err(e) => reject(format!("--connect {}", connection), &e),
        }
    }

    for edge in &args.disconnect {
        match graph.disconnect(&EdgeId::new(edge.as_str())) {
            Ok(removed) => println!("disconnected {} ({})", removed.id, removed.connection()),
            Err(e) => reject(format!("--disconnect {}", edge), &e),
        }
    }

    for node in &args.remove {
        match graph.remove_node(&NodeId::new(node.as_str())) {
            Ok((removed, edges)) => {
                println!("removed {} ({})", removed.id, removed.label);
                for edge in edges {
                    println!("  dropped {}", edge.id);
                }
            }
            Err(e) => reject(format!("--remove {}", node), &e),
        }
    }

    for (node, signal) in &args.retype {
        let id = NodeId::new(node.as_str());
        match graph.retype_console_output(&id, SignalType::new(signal.as_str())) {
            Ok(refreshed) => println!(
                "switched {} to {} ({} cables updated)",
                node,
                signal,
                refreshed.len()
            ),
            Err(e) => reject(format!("--retype {}={}", node, signal), &e),
        }
    }

    for (node, count) in &args.inputs {
        let op = format!("--inputs {}={}", node, count);
        let result = graph.set_input_count(&NodeId::new(node.as_str()), *count);
        match result {
            Ok(change) => {
                print_change(node, "inputs", *count, change.config.num_inputs, &change);
            }
            Err(e) => reject(op, &e),
        }
    }

    for (node, count) in &args.outputs {
        let op = format!("--outputs {}={}", node, count);
        let result = graph.set_output_count(&NodeId::new(node.as_str()), *count);
        match result {
            Ok(change) => {
                print_change(node, "outputs", *count, change.config.num_outputs, &change);
            }
            Err(e) => reject(op, &e),
        }
    }

    for spec in &args.input_type {
        let op = format!("--input-type {}:{}={}", spec.node, spec.index, spec.signal);
        match set_port_type(&mut graph, spec, Direction::Input) {
            Ok(change) => print_retyped(spec, PortHandle::input(spec.index), &change),
            Err(e) => reject(op, &e),
        }
    }

    for spec in &args.output_type {
        let op = format!("--output-type {}:{}={}", spec.node, spec.index, spec.signal);
        match set_port_type(&mut graph, spec, Direction::Output) {
            Ok(change) => print_retyped(spec, PortHandle::output(spec.index), &change),
            Err(e) => reject(op, &e),
        }
    }

    if rejected > 0 {
        anyhow::bail!(
            "{} operation(s) rejected; {} was not written",
            rejected,
            target.display()
        );
    }

    loaded.save_graph(&graph, &target)?;
    let name = patchbay_config::diagram_name_from_path(&target)
        .unwrap_or_else(|| loaded.diagram.name.clone());
    ctx.touch_recent(&name, &target);
    println!(
        "Saved {} nodes, {} cables to {}",
        graph.node_count(),
        graph.edge_count(),
        target.display()
    );
    Ok(())
}

/// Port retype as a single result, treating an out-of-range index as an error.
fn set_port_type(
    graph: &mut Graph,
    spec: &PortType,
    direction: Direction,
) -> anyhow::Result<PortChange> {
    let change = match direction {
        Direction::Input => graph.set_input_type(&spec.node, spec.index, spec.signal.clone()),
        Direction::Output => graph.set_output_type(&spec.node, spec.index, spec.signal.clone()),
    }?;

    if !change.applied {
        let side = match direction {
            Direction::Input => "input",
            Direction::Output => "output",
        };
        anyhow::bail!("node {} has no {} {}", spec.node, side, spec.index);
    }
    Ok(change)
}

fn print_change(node: &str, side: &str, requested: usize, applied: usize, change: &PortChange) {
    if requested == applied {
        println!("{} now has {} {}", node, applied, side);
    } else {
        println!("{} now has {} {} (clamped from {})", node, applied, side, requested);
    }
    print_pruned(change);
}

fn print_retyped(spec: &PortType, handle: PortHandle, change: &PortChange) {
    println!("{} {} is now {}", spec.node, handle, spec.signal);
    print_pruned(change);
}

fn print_pruned(change: &PortChange) {
    for edge in &change.reconciliation.pruned {
        println!("  dropped {} ({})", edge.id, edge.connection());
    }
}

/// Parse `SRC:out-N=TGT:in-M`.
fn parse_connection(s: &str) -> Result<Connection, String> {
    let err = || format!("Invalid connection: '{}' (expected SRC:out-N=TGT:in-M)", s);
    let (source, target) = s.split_once('=').ok_or_else(err)?;
    let (source, source_handle) = parse_endpoint(source).ok_or_else(err)?;
    let (target, target_handle) = parse_endpoint(target).ok_or_else(err)?;

    if source_handle.direction != Direction::Output || target_handle.direction != Direction::Input
    {
        return Err(err());
    }
    Ok(Connection::new(
        source,
        source_handle.index,
        target,
        target_handle.index,
    ))
}

fn parse_endpoint(s: &str) -> Option<(NodeId, PortHandle)> {
    let (node, handle) = s.trim().rsplit_once(':')?;
    if node.is_empty() {
        return None;
    }
    Some((NodeId::new(node), handle.parse().ok()?))
}

/// Parse `NODE=N`.
fn parse_count(s: &str) -> Result<(String, usize), String> {
    let (node, count) = parse_key_val(s)?;
    let count = count
        .parse()
        .map_err(|_| format!("Invalid count: '{}' (expected NODE=N)", s))?;
    Ok((node, count))
}

/// Parse `NODE:IDX=TYPE`.
fn parse_port_type(s: &str) -> Result<PortType, String> {
    let err = || format!("Invalid port type: '{}' (expected NODE:IDX=TYPE)", s);
    let (port, signal) = parse_key_val(s).map_err(|_| err())?;
    let (node, index) = port.rsplit_once(':').ok_or_else(err)?;
    let index = index.parse().map_err(|_| err())?;
    if node.is_empty() {
        return Err(err());
    }
    Ok(PortType {
        node: NodeId::new(node),
        index,
        signal: SignalType::new(signal),
    })
}
