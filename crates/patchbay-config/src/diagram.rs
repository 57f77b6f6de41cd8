//! Diagram snapshot format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use patchbay_core::{Edge, Graph, Node, RepairReport};

use crate::error::ConfigError;

/// Canvas pan and zoom, carried through snapshots untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal pan.
    pub x: f64,
    /// Vertical pan.
    pub y: f64,
    /// Zoom factor.
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// A saved wiring diagram.
///
/// Snapshots are JSON files holding the node and edge collections exactly as
/// the graph stores them. Nothing in a snapshot is trusted: [`into_graph`]
/// runs every edge back through the validator and re-derives cached signal
/// types.
///
/// # JSON Format
///
/// ```json
/// {
///   "name": "Living Room",
///   "nodes": [
///     { "id": "node_0", "label": "SNES", "kind": "console",
///       "staticSpec": { "outputs": ["rf", "composite", "s-video", "rgb"] },
///       "selectedOutput": "s-video" },
///     { "id": "node_1", "label": "Trinitron", "kind": "display",
///       "staticSpec": { "inputs": ["rf", "composite", "s-video"] } }
///   ],
///   "edges": [
///     { "id": "edge_0", "sourceNodeId": "node_0", "sourcePortIndex": 0,
///       "targetNodeId": "node_1", "targetPortIndex": 2, "signalType": "s-video" }
///   ],
///   "viewport": { "x": 0, "y": 0, "zoom": 1 }
/// }
/// ```
///
/// [`into_graph`]: Diagram::into_graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    /// Name of the diagram.
    pub name: String,

    /// Optional description of the diagram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Equipment on the canvas.
    #[serde(default)]
    pub nodes: Vec<Node>,

    /// Cables between equipment.
    #[serde(default)]
    pub edges: Vec<Edge>,

    /// Canvas pan and zoom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl Diagram {
    /// Create a new empty diagram.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport: None,
        }
    }

    /// Snapshot the current state of a graph.
    pub fn from_graph(name: impl Into<String>, graph: &Graph) -> Self {
        Self {
            name: name.into(),
            description: None,
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
            viewport: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the viewport.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Rebuild a graph from this snapshot, repairing what it has to.
    pub fn into_graph(self) -> (Graph, RepairReport) {
        let name = self.name;
        let (graph, report) = Graph::from_parts(self.nodes, self.edges);
        if report.is_clean() {
            tracing::debug!(
                diagram = %name,
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "diagram loaded"
            );
        } else {
            tracing::info!(
                diagram = %name,
                dropped = report.dropped_edges.len(),
                refreshed = report.refreshed_edges.len(),
                "diagram repaired on load"
            );
        }
        (graph, report)
    }

    /// Rebuild a graph without consuming the snapshot.
    pub fn to_graph(&self) -> (Graph, RepairReport) {
        self.clone().into_graph()
    }

    /// Load a diagram from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let diagram = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), "diagram read");
        Ok(diagram)
    }

    /// Load a diagram from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save the diagram to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
            }
        }

        let content = self.to_json()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), "diagram written");
        Ok(())
    }

    /// Convert the diagram to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of nodes in the snapshot.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the snapshot.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchbay_core::{Connection, NewNode, NodeKind, StaticSpec};
    use tempfile::TempDir;

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        let snes = graph.add_node(
            NewNode::fixed(
                "SNES",
                NodeKind::Console,
                StaticSpec::new(&[], &["rf", "composite", "s-video"]),
            )
            .with_selected_output("s-video")
            .at(40.0, 80.0),
        );
        let tv = graph.add_node(NewNode::fixed(
            "Trinitron",
            NodeKind::Display,
            StaticSpec::new(&["rf", "composite", "s-video"], &[]),
        ));
        graph.connect(&Connection::new(snes, 0, tv, 2)).unwrap();
        graph
    }

    #[test]
    fn test_from_graph_and_back() {
        let graph = sample_graph();
        let diagram = Diagram::from_graph("Den", &graph);
        assert_eq!(diagram.node_count(), 2);
        assert_eq!(diagram.edge_count(), 1);

        let (rebuilt, report) = diagram.into_graph();
        assert!(report.is_clean());
        assert_eq!(rebuilt.edges(), graph.edges());
    }

    #[test]
    fn test_json_shape() {
        let diagram =
            Diagram::from_graph("Den", &sample_graph()).with_viewport(Viewport::default());
        let value: serde_json::Value = serde_json::from_str(&diagram.to_json().unwrap()).unwrap();
        assert_eq!(value["name"], "Den");
        assert_eq!(value["nodes"][0]["selectedOutput"], "s-video");
        assert_eq!(value["nodes"][0]["position"]["x"], 40.0);
        assert_eq!(value["edges"][0]["signalType"], "s-video");
        assert_eq!(value["viewport"]["zoom"], 1.0);
    }

    #[test]
    fn test_minimal_json() {
        let diagram = Diagram::from_json(r#"{ "name": "Empty" }"#).unwrap();
        assert!(diagram.nodes.is_empty());
        assert!(diagram.viewport.is_none());
        assert!(Diagram::from_json("not json").is_err());
    }

    #[test]
    fn test_stale_cache_repaired() {
        let mut diagram = Diagram::from_graph("Den", &sample_graph());
        diagram.edges[0].signal = "composite".into();
        let (graph, report) = diagram.to_graph();
        assert_eq!(report.refreshed_edges.len(), 1);
        assert_eq!(graph.edges()[0].signal.as_str(), "s-video");
        assert_eq!(diagram.edges[0].signal.as_str(), "composite");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("den.json");

        let diagram = Diagram::from_graph("Den", &sample_graph());
        diagram.save(&path).unwrap();
        assert!(path.exists());

        let loaded = Diagram::load(&path).unwrap();
        assert_eq!(loaded, diagram);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Diagram::load("/nonexistent/den.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }
}
