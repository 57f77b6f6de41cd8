//! Shared CLI helpers used across multiple commands.

use patchbay_config::{
    Diagram, EditorSettings, RecentDiagrams, diagram_name_from_path, get_factory_diagram, paths,
};
use patchbay_core::{Graph, Node, NodeKind, RepairReport};
use std::path::{Path, PathBuf};

/// Settings and state file locations for one invocation.
pub struct Context {
    pub settings: EditorSettings,
    recent_path: PathBuf,
}

impl Context {
    /// Load settings from `config_dir`, or from the user config directory.
    pub fn load(config_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let (settings_path, recent_path) = match config_dir {
            Some(dir) => (dir.join("settings.toml"), dir.join("recent.json")),
            None => (paths::settings_path(), paths::recent_path()),
        };
        let settings = EditorSettings::load(&settings_path)?;
        Ok(Self {
            settings,
            recent_path,
        })
    }

    /// Load the recent list.
    pub fn recent(&self) -> anyhow::Result<RecentDiagrams> {
        Ok(RecentDiagrams::load(
            &self.recent_path,
            self.settings.recent_limit,
        )?)
    }

    /// Remember that the diagram at `path` was used.
    ///
    /// Failures are logged, never fatal.
    pub fn touch_recent(&self, name: &str, path: &Path) {
        let result = self.recent().and_then(|mut recent| {
            recent.touch(name, path);
            Ok(recent.save(&self.recent_path)?)
        });
        if let Err(e) = result {
            tracing::warn!(error = %e, "could not update recent diagrams");
        }
    }

    /// Load a diagram by path, by name in the diagrams directory, or by
    /// example name.
    pub fn load_diagram(&self, name: &str) -> anyhow::Result<LoadedDiagram> {
        if let Ok(path) = self.settings.find_diagram(name) {
            let diagram = Diagram::load(&path)?;
            let recent_name =
                diagram_name_from_path(&path).unwrap_or_else(|| diagram.name.clone());
            self.touch_recent(&recent_name, &path);
            return Ok(LoadedDiagram {
                diagram,
                path: Some(path),
            });
        }

        if let Some(diagram) = get_factory_diagram(name) {
            return Ok(LoadedDiagram {
                diagram,
                path: None,
            });
        }

        anyhow::bail!(
            "Diagram '{}' not found. Use 'patchbay examples' to see the bundled diagrams.",
            name
        )
    }
}

/// A diagram and the file it came from (`None` for bundled examples).
pub struct LoadedDiagram {
    pub diagram: Diagram,
    pub path: Option<PathBuf>,
}

impl LoadedDiagram {
    /// Rebuild the graph, logging any repairs.
    pub fn graph(&self) -> (Graph, RepairReport) {
        self.diagram.to_graph()
    }

    /// Write `graph` back, keeping name, description and viewport.
    pub fn save_graph(&self, graph: &Graph, path: &Path) -> anyhow::Result<()> {
        let mut diagram = Diagram::from_graph(self.diagram.name.clone(), graph);
        diagram.description = self.diagram.description.clone();
        diagram.viewport = self.diagram.viewport;
        diagram.save(path)?;
        Ok(())
    }
}

/// Split `key=value` for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .ok_or_else(|| format!("Invalid format: '{}' (expected KEY=VALUE)", s))
}

/// One-line summary of a node for listings.
pub fn describe_node(node: &Node) -> String {
    let kind = if node.is_svs {
        "svs".to_string()
    } else {
        node.kind.name().to_string()
    };
    let mut line = format!("{:10} {:12} {}", node.id.as_str(), kind, node.label);
    if node.kind == NodeKind::Console && !node.is_svs {
        let outputs: Vec<&str> = node.available_outputs().iter().map(|s| s.as_str()).collect();
        let selected = node
            .effective_console_output()
            .map_or("-", |s| s.as_str());
        line.push_str(&format!("  [output: {} of {}]", selected, outputs.join("/")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("node_1=rgb"),
            Ok(("node_1".to_string(), "rgb".to_string()))
        );
        assert_eq!(
            parse_key_val("node_1:2 = s-video"),
            Ok(("node_1:2".to_string(), "s-video".to_string()))
        );
        assert!(parse_key_val("node_1").is_err());
        assert!(parse_key_val("=rgb").is_err());
    }
}
