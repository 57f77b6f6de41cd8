//! Integration tests for patchbay-config.
//!
//! These tests verify end-to-end functionality across modules.

use patchbay_config::{
    ConfigError, Diagram, EditorSettings, EquipmentRegistry, RecentDiagrams, factory_diagrams,
    get_factory_diagram, instantiate, paths,
};
use patchbay_core::{Connection, DropReason, GraphError, NodeId, SignalType};
use tempfile::TempDir;

/// Build a diagram from catalog templates, save it and load it back.
#[test]
fn test_catalog_to_saved_diagram() {
    let temp_dir = TempDir::new().unwrap();
    let registry = EquipmentRegistry::new();

    let (mut graph, _) = Diagram::new("Den").into_graph();
    let snes = graph.add_node(instantiate(&registry, "snes").unwrap().with_selected_output("rgb"));
    let breakout = graph.add_node(instantiate(&registry, "rgb-to-scart").unwrap());
    let tv = graph.add_node(instantiate(&registry, "euro-crt").unwrap());

    graph
        .connect(&Connection::new(snes.clone(), 0, breakout.clone(), 0))
        .unwrap();
    graph.connect(&Connection::new(breakout, 0, tv, 1)).unwrap();

    let path = temp_dir.path().join("den.json");
    Diagram::from_graph("Den", &graph).save(&path).unwrap();

    let (loaded, report) = Diagram::load(&path).unwrap().into_graph();
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(loaded.node_count(), 3);
    assert_eq!(loaded.edges(), graph.edges());
    assert_eq!(loaded.node(&snes).unwrap().template_id.as_deref(), Some("snes"));
}

/// A snapshot edited outside the editor is repaired, not rejected.
#[test]
fn test_tampered_snapshot_repaired() {
    let mut diagram = get_factory_diagram("medium").unwrap();

    // Point the NES cable at the S-Video input of the selector.
    diagram.edges[0].target_port = 2;
    // And forget the PlayStation entirely.
    diagram.nodes.retain(|n| n.id.as_str() != "node_2");

    let (graph, report) = diagram.into_graph();
    assert_eq!(report.dropped_edges.len(), 2);
    assert!(
        report
            .dropped_edges
            .iter()
            .all(|d| matches!(d.reason, DropReason::Invalid(_)))
    );
    assert_eq!(graph.edge_count(), 3);

    // Every survivor still passes validation.
    for edge in graph.edges() {
        assert!(graph.is_valid_connection(&edge.connection()), "{}", edge.id);
    }
}

/// Factory diagrams survive editing and re-saving.
#[test]
fn test_factory_svs_edit_and_resave() {
    let temp_dir = TempDir::new().unwrap();
    let (mut graph, report) = get_factory_diagram("svs").unwrap().into_graph();
    assert!(report.is_clean());

    let switch = NodeId::from("node_4");

    // The N64 feeds input 3; shrinking to three inputs cuts it loose.
    let change = graph.set_input_count(&switch, 3).unwrap();
    assert_eq!(change.config.num_inputs, 3);
    assert_eq!(change.reconciliation.pruned.len(), 1);
    assert_eq!(change.reconciliation.pruned[0].source.as_str(), "node_3");

    // Growing past the ceiling of the gscartsw clamps at eight.
    let change = graph.set_input_count(&switch, 12).unwrap();
    assert_eq!(change.config.num_inputs, 8);
    assert_eq!(change.config.inputs[7].as_str(), "component");

    let path = temp_dir.path().join("svs.json");
    Diagram::from_graph("SVS Setup", &graph).save(&path).unwrap();
    let (reloaded, report) = Diagram::load(&path).unwrap().into_graph();
    assert!(report.is_clean());
    assert_eq!(reloaded.edge_count(), 6);
}

/// Retyping a console is refused while its cable would become invalid.
#[test]
fn test_factory_advanced_retype() {
    let (mut graph, _) = get_factory_diagram("advanced").unwrap().into_graph();
    let ps2 = NodeId::from("node_4");

    // The component switch cannot take composite.
    let err = graph
        .retype_console_output(&ps2, SignalType::from("composite"))
        .unwrap_err();
    assert!(matches!(err, GraphError::RetypeRejected { .. }));
    let selected = graph.node(&ps2).unwrap().selected_output.clone();
    assert_eq!(selected, Some(SignalType::from("component")));

    let edge = graph.edges_from(&ps2).next().unwrap().id.clone();
    graph.disconnect(&edge).unwrap();
    graph
        .retype_console_output(&ps2, SignalType::from("composite"))
        .unwrap();
}

/// Every factory diagram resumes ID allocation past its highest suffix.
#[test]
fn test_factory_id_allocation() {
    let registry = EquipmentRegistry::new();
    for diagram in factory_diagrams() {
        let node_count = diagram.node_count();
        let (mut graph, _) = diagram.into_graph();
        let id = graph.add_node(instantiate(&registry, "ossc").unwrap());
        assert_eq!(id, NodeId::new(format!("node_{node_count}")));
    }
}

/// Settings drive the catalog, the diagrams directory and the recent list.
#[test]
fn test_settings_recent_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let diagrams_dir = temp_dir.path().join("racks");
    let settings_path = temp_dir.path().join("settings.toml");
    let recent_path = temp_dir.path().join("recent.json");

    EditorSettings {
        recent_limit: 2,
        catalog_path: None,
        diagrams_dir: Some(diagrams_dir.clone()),
    }
    .save(&settings_path)
    .unwrap();

    let settings = EditorSettings::load(&settings_path).unwrap();
    let mut recent = RecentDiagrams::load(&recent_path, settings.recent_limit).unwrap();

    for name in ["simple", "medium", "svs"] {
        let diagram = get_factory_diagram(name).unwrap();
        let path = settings.diagrams_dir().join(paths::diagram_file_name(name));
        diagram.save(&path).unwrap();
        recent.touch(name, &path);
    }
    recent.save(&recent_path).unwrap();

    assert_eq!(paths::list_diagrams_in_dir(&diagrams_dir).len(), 3);
    assert_eq!(settings.find_diagram("medium").unwrap(), diagrams_dir.join("medium.json"));

    let recent = RecentDiagrams::load(&recent_path, settings.recent_limit).unwrap();
    assert_eq!(recent.names(), ["svs", "medium"]);
}

/// An external catalog replaces the built-in one.
#[test]
fn test_external_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("catalog.json");
    std::fs::write(
        &catalog_path,
        r#"[
            { "id": 1, "name": "Famicom", "category": "console",
              "specs": { "outputs": ["rf"] } },
            { "id": 2, "name": "Custom SVS", "category": "switcher",
              "specs": { "isSVS": true, "maxInputs": 4, "maxOutputs": 1 } },
            { "id": 3, "name": "RCA Lead", "category": "cable",
              "specs": { "inputs": ["rca"], "outputs": ["composite"] } }
        ]"#,
    )
    .unwrap();

    let settings = EditorSettings {
        catalog_path: Some(catalog_path),
        ..EditorSettings::default()
    };
    let registry = settings.load_registry().unwrap();
    assert_eq!(registry.len(), 3);
    assert!(matches!(
        instantiate(&registry, "snes"),
        Err(ConfigError::UnknownTemplate(_))
    ));

    let (mut graph, _) = Diagram::new("Custom").into_graph();
    let svs = graph.add_node(instantiate(&registry, "2").unwrap());
    let change = graph.set_output_count(&svs, 3).unwrap();
    assert_eq!(change.config.num_outputs, 1);
}

/// A broken catalog file surfaces as a catalog error.
#[test]
fn test_malformed_catalog() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("catalog.json");
    std::fs::write(&catalog_path, r#"[{ "name": "No ID" }]"#).unwrap();

    let settings = EditorSettings {
        catalog_path: Some(catalog_path),
        ..EditorSettings::default()
    };
    assert!(matches!(settings.load_registry(), Err(ConfigError::Catalog(_))));
}
