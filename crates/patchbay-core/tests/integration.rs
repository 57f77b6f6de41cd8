//! Integration tests for patchbay-core.
//!
//! Walks through realistic editing sessions on a [`Graph`]: wiring a console
//! to a display, reworking a scalable switch, deleting equipment, and loading
//! a stale snapshot from JSON.

use patchbay_core::{
    Connection, Edge, Graph, GraphError, NewNode, Node, NodeKind, PortLimits, Rejection,
    SignalType, StaticSpec, SvsConfig, is_compatible,
};

fn console(label: &str, outputs: &[&str], selected: &str) -> NewNode {
    NewNode::fixed(label, NodeKind::Console, StaticSpec::new(&[], outputs))
        .with_selected_output(selected)
}

fn display(label: &str, inputs: &[&str]) -> NewNode {
    NewNode::fixed(label, NodeKind::Display, StaticSpec::new(inputs, &[]))
}

// ============================================================================
// 1. Compatibility table
// ============================================================================

#[test]
fn test_documented_pairings() {
    assert!(!is_compatible("hdmi", "component"));
    assert!(is_compatible("hdmi", "hdmi"));
    assert!(!is_compatible("rf", "composite"));
    assert!(is_compatible("rf", "rf"));
    assert!(!is_compatible("component", "s-video"));
    assert!(is_compatible("component", "scart"));
}

// ============================================================================
// 2. Console wiring
// ============================================================================

#[test]
fn test_console_to_display_session() {
    let mut graph = Graph::new();
    let a = graph.add_node(console("A", &["rf", "composite", "s-video"], "composite"));
    let b = graph.add_node(display("B", &["composite", "hdmi"]));

    let edge = graph.connect(&Connection::new(a.clone(), 0, b.clone(), 0)).unwrap();
    assert_eq!(graph.edge(&edge).unwrap().signal.as_str(), "composite");
    assert_eq!(graph.edge(&edge).unwrap().color(), "#eab308");

    assert!(graph.retype_console_output(&a, "hdmi".into()).is_err());

    // s-video is offered but would break the composite input.
    let err = graph.retype_console_output(&a, "s-video".into()).unwrap_err();
    assert!(
        matches!(&err, GraphError::RetypeRejected { target_label, .. } if target_label == "B"),
        "{err}"
    );
    assert!(err.to_string().contains("composite"));

    let node = graph.node(&a).unwrap();
    assert_eq!(node.selected_output.as_ref().unwrap().as_str(), "composite");
    assert_eq!(graph.edge(&edge).unwrap().signal.as_str(), "composite");
}

#[test]
fn test_retype_after_disconnect_succeeds() {
    let mut graph = Graph::new();
    let a = graph.add_node(console("A", &["rf", "composite", "s-video"], "composite"));
    let b = graph.add_node(display("B", &["composite", "s-video"]));

    let edge = graph.connect(&Connection::new(a.clone(), 0, b.clone(), 0)).unwrap();
    graph.disconnect(&edge).unwrap();
    graph.retype_console_output(&a, "s-video".into()).unwrap();

    let edge = graph.connect(&Connection::new(a, 0, b, 1)).unwrap();
    assert_eq!(graph.edge(&edge).unwrap().signal.as_str(), "s-video");
}

#[test]
fn test_rejection_reasons() {
    let mut graph = Graph::new();
    let a = graph.add_node(console("A", &["rf"], "rf"));
    let b = graph.add_node(display("B", &["composite"]));

    let err = graph.connect(&Connection::new(a.clone(), 0, b.clone(), 0)).unwrap_err();
    assert_eq!(
        err,
        GraphError::Rejected(Rejection::Incompatible {
            output: SignalType::from("rf"),
            input: SignalType::from("composite"),
        })
    );
    assert!(matches!(
        graph.connect(&Connection::new(a, 0, b, 7)),
        Err(GraphError::Rejected(Rejection::MissingInput { port: 7, .. }))
    ));
    assert_eq!(graph.edge_count(), 0);
}

// ============================================================================
// 3. Scalable switch editing
// ============================================================================

#[test]
fn test_svs_session() {
    let mut graph = Graph::new();
    let snes = graph.add_node(console("SNES", &["rf", "composite", "s-video", "rgb"], "rgb"));
    let md = graph.add_node(console("Mega Drive", &["rf", "composite", "rgb"], "rgb"));
    let svs = graph.add_node(NewNode::scalable(
        "gscartsw",
        SvsConfig::uniform(2, 1),
        PortLimits::from_declared(Some(8), Some(2)),
    ));
    let pvm = graph.add_node(display("PVM", &["rgb", "scart"]));

    // Default inputs are component, which rgb cannot drive.
    assert!(graph.connect(&Connection::new(snes.clone(), 0, svs.clone(), 0)).is_err());

    graph.set_input_type(&svs, 0, "scart".into()).unwrap();
    graph.set_input_type(&svs, 1, "scart".into()).unwrap();
    graph.set_output_type(&svs, 0, "rgb".into()).unwrap();

    graph.connect(&Connection::new(snes, 0, svs.clone(), 0)).unwrap();
    graph.connect(&Connection::new(md, 0, svs.clone(), 1)).unwrap();
    let out = graph.connect(&Connection::new(svs.clone(), 0, pvm, 0)).unwrap();
    assert_eq!(graph.edge_count(), 3);

    // Grow, then shrink below the wired input.
    let change = graph.set_input_count(&svs, 5).unwrap();
    assert_eq!(change.config.inputs.len(), 5);
    assert_eq!(change.config.inputs[1].as_str(), "scart");
    assert!(change.reconciliation.is_empty());

    let change = graph.set_input_count(&svs, 1).unwrap();
    assert_eq!(change.reconciliation.pruned.len(), 1);
    assert_eq!(graph.edge_count(), 2);

    // Retyping the output to scart keeps the cable to the rgb input and
    // refreshes its cached type.
    let change = graph.set_output_type(&svs, 0, "scart".into()).unwrap();
    assert_eq!(change.reconciliation.refreshed, vec![out.clone()]);
    assert_eq!(graph.edge(&out).unwrap().signal.as_str(), "scart");
}

// ============================================================================
// 4. Deletion
// ============================================================================

#[test]
fn test_delete_leaves_no_dangling_edges() {
    let mut graph = Graph::new();
    let a = graph.add_node(console("A", &["scart"], "scart"));
    let svs = graph.add_node(NewNode::scalable(
        "SVS",
        SvsConfig::new(vec!["scart".into()], vec!["scart".into(), "scart".into()]),
        PortLimits::default(),
    ));
    let b = graph.add_node(display("B", &["scart"]));
    let c = graph.add_node(display("C", &["scart"]));

    graph.connect(&Connection::new(a, 0, svs.clone(), 0)).unwrap();
    graph.connect(&Connection::new(svs.clone(), 0, b, 0)).unwrap();
    graph.connect(&Connection::new(svs.clone(), 1, c, 0)).unwrap();

    let (_, removed) = graph.remove_node(&svs).unwrap();
    assert_eq!(removed.len(), 3);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.node_count(), 3);
}

// ============================================================================
// 5. Snapshot loading
// ============================================================================

#[test]
fn test_load_stale_json_snapshot() {
    let nodes = r#"[
        {
            "id": "node_3", "label": "N64", "kind": "console",
            "staticSpec": { "outputs": ["rf", "composite", "s-video"] },
            "selectedOutput": "s-video"
        },
        {
            "id": "node_7", "label": "SVS", "kind": "switcher", "isSVS": true,
            "dynamicConfig": { "numInputs": 2, "numOutputs": 1 }
        },
        {
            "id": "node_8", "label": "TV", "kind": "display",
            "staticSpec": { "inputs": ["s-video", "component"] }
        }
    ]"#;
    let edges = r#"[
        { "id": "edge_2", "sourceNodeId": "node_3", "sourcePortIndex": 0,
          "targetNodeId": "node_8", "targetPortIndex": 0, "signalType": "composite" },
        { "id": "edge_5", "sourceNodeId": "node_7", "sourcePortIndex": 0,
          "targetNodeId": "node_8", "targetPortIndex": 1, "signalType": "component" },
        { "id": "edge_6", "sourceNodeId": "node_7", "sourcePortIndex": 3,
          "targetNodeId": "node_8", "targetPortIndex": 1, "signalType": "component" }
    ]"#;
    let nodes: Vec<Node> = serde_json::from_str(nodes).unwrap();
    let edges: Vec<Edge> = serde_json::from_str(edges).unwrap();

    let (mut graph, report) = Graph::from_parts(nodes, edges);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(report.refreshed_edges.len(), 1);
    assert_eq!(report.dropped_edges.len(), 1);
    assert_eq!(report.dropped_edges[0].edge.id.as_str(), "edge_6");
    assert_eq!(graph.edges()[0].signal.as_str(), "s-video");

    // Malformed SVS config was repaired at the read boundary.
    let ports = graph.ports(&"node_7".into()).unwrap();
    assert_eq!(ports.inputs.len(), 2);

    // Counters resume past the highest loaded suffix.
    let id = graph.add_node(display("New", &["rgb"]));
    assert_eq!(id.as_str(), "node_9");
    graph.disconnect(&"edge_2".into()).unwrap();
    let edge = graph.connect(&Connection::new("node_3", 0, "node_8", 0)).unwrap();
    assert_eq!(edge.as_str(), "edge_7");
}
