//! Example diagrams bundled with the library.
//!
//! These are always available without external files and load without any
//! repair, so they double as fixtures for the graph rules.

use crate::Diagram;

/// Array of factory diagram names for external access.
pub static FACTORY_DIAGRAM_NAMES: &[&str] = &["simple", "medium", "advanced", "svs"];

/// JSON content for factory diagrams, embedded at compile time.
static FACTORY_DIAGRAMS_JSON: &[(&str, &str)] = &[
    ("simple", SIMPLE_DIAGRAM),
    ("medium", MEDIUM_DIAGRAM),
    ("advanced", ADVANCED_DIAGRAM),
    ("svs", SVS_DIAGRAM),
];

/// One console straight into a CRT.
const SIMPLE_DIAGRAM: &str = r##"{
  "name": "Simple Setup",
  "description": "Basic console to display connection",
  "nodes": [
    {
      "id": "node_0", "label": "Super Nintendo", "kind": "console", "templateId": "snes",
      "staticSpec": { "inputs": [], "outputs": ["rf", "composite", "s-video", "rgb"] },
      "selectedOutput": "s-video",
      "position": { "x": 100, "y": 150 }
    },
    {
      "id": "node_1", "label": "Sony Trinitron KV-27", "kind": "display", "templateId": "trinitron-kv27",
      "staticSpec": { "inputs": ["rf", "composite", "s-video", "component"], "outputs": [] },
      "position": { "x": 450, "y": 150 }
    }
  ],
  "edges": [
    { "id": "edge_0", "sourceNodeId": "node_0", "sourcePortIndex": 0,
      "targetNodeId": "node_1", "targetPortIndex": 2, "signalType": "s-video" }
  ],
  "viewport": { "x": 0, "y": 0, "zoom": 1 }
}"##;

/// Three consoles sharing a TV through an A/V selector.
const MEDIUM_DIAGRAM: &str = r##"{
  "name": "Medium Setup",
  "description": "Multiple consoles through a switcher",
  "nodes": [
    {
      "id": "node_0", "label": "Nintendo NES", "kind": "console", "templateId": "nes",
      "staticSpec": { "inputs": [], "outputs": ["rf", "composite"] },
      "selectedOutput": "composite",
      "position": { "x": 80, "y": 60 }
    },
    {
      "id": "node_1", "label": "Nintendo 64", "kind": "console", "templateId": "n64",
      "staticSpec": { "inputs": [], "outputs": ["rf", "composite", "s-video"] },
      "selectedOutput": "s-video",
      "position": { "x": 80, "y": 200 }
    },
    {
      "id": "node_2", "label": "PlayStation", "kind": "console", "templateId": "ps1",
      "staticSpec": { "inputs": [], "outputs": ["composite", "s-video", "rgb"] },
      "selectedOutput": "s-video",
      "position": { "x": 80, "y": 340 }
    },
    {
      "id": "node_3", "label": "Composite / S-Video Selector", "kind": "switcher", "templateId": "av-selector",
      "staticSpec": {
        "inputs": ["composite", "composite", "s-video", "s-video"],
        "outputs": ["composite", "s-video"]
      },
      "position": { "x": 380, "y": 180 }
    },
    {
      "id": "node_4", "label": "Sony Trinitron KV-27", "kind": "display", "templateId": "trinitron-kv27",
      "staticSpec": { "inputs": ["rf", "composite", "s-video", "component"], "outputs": [] },
      "position": { "x": 680, "y": 180 }
    }
  ],
  "edges": [
    { "id": "edge_0", "sourceNodeId": "node_0", "sourcePortIndex": 0,
      "targetNodeId": "node_3", "targetPortIndex": 0, "signalType": "composite" },
    { "id": "edge_1", "sourceNodeId": "node_1", "sourcePortIndex": 0,
      "targetNodeId": "node_3", "targetPortIndex": 2, "signalType": "s-video" },
    { "id": "edge_2", "sourceNodeId": "node_2", "sourcePortIndex": 0,
      "targetNodeId": "node_3", "targetPortIndex": 3, "signalType": "s-video" },
    { "id": "edge_3", "sourceNodeId": "node_3", "sourcePortIndex": 0,
      "targetNodeId": "node_4", "targetPortIndex": 1, "signalType": "composite" },
    { "id": "edge_4", "sourceNodeId": "node_3", "sourcePortIndex": 1,
      "targetNodeId": "node_4", "targetPortIndex": 2, "signalType": "s-video" }
  ],
  "viewport": { "x": 0, "y": 0, "zoom": 1 }
}"##;

/// RGB and component chains meeting in an upscaler, plus a PVM on the side.
const ADVANCED_DIAGRAM: &str = r##"{
  "name": "Advanced Setup",
  "description": "Complex multi-switcher routing system",
  "nodes": [
    {
      "id": "node_0", "label": "Sega Genesis / Mega Drive", "kind": "console", "templateId": "genesis",
      "staticSpec": { "inputs": [], "outputs": ["rf", "composite", "rgb"] },
      "selectedOutput": "rgb",
      "position": { "x": 40, "y": 40 }
    },
    {
      "id": "node_1", "label": "Super Nintendo", "kind": "console", "templateId": "snes",
      "staticSpec": { "inputs": [], "outputs": ["rf", "composite", "s-video", "rgb"] },
      "selectedOutput": "rgb",
      "position": { "x": 40, "y": 160 }
    },
    {
      "id": "node_2", "label": "Sega Saturn", "kind": "console", "templateId": "saturn",
      "staticSpec": { "inputs": [], "outputs": ["composite", "s-video", "rgb"] },
      "selectedOutput": "rgb",
      "position": { "x": 40, "y": 280 }
    },
    {
      "id": "node_3", "label": "3-Way SCART Switch", "kind": "switcher", "templateId": "scart-switch-3",
      "staticSpec": { "inputs": ["scart", "scart", "scart"], "outputs": ["scart"] },
      "position": { "x": 320, "y": 160 }
    },
    {
      "id": "node_4", "label": "PlayStation 2", "kind": "console", "templateId": "ps2",
      "staticSpec": { "inputs": [], "outputs": ["composite", "s-video", "rgb", "component"] },
      "selectedOutput": "component",
      "position": { "x": 40, "y": 420 }
    },
    {
      "id": "node_5", "label": "Nintendo GameCube", "kind": "console", "templateId": "gamecube",
      "staticSpec": { "inputs": [], "outputs": ["composite", "s-video", "rgb", "component"] },
      "selectedOutput": "component",
      "position": { "x": 40, "y": 540 }
    },
    {
      "id": "node_6", "label": "4-Port Component Switch", "kind": "switcher", "templateId": "component-switch-4",
      "staticSpec": {
        "inputs": ["component", "component", "component", "component"],
        "outputs": ["component"]
      },
      "position": { "x": 320, "y": 480 }
    },
    {
      "id": "node_7", "label": "Open Source Scan Converter", "kind": "upscaler", "templateId": "ossc",
      "staticSpec": { "inputs": ["scart", "component", "vga"], "outputs": ["hdmi"] },
      "position": { "x": 600, "y": 300 }
    },
    {
      "id": "node_8", "label": "5-Port HDMI Switch", "kind": "switcher", "templateId": "hdmi-switch-5",
      "staticSpec": { "inputs": ["hdmi", "hdmi", "hdmi", "hdmi", "hdmi"], "outputs": ["hdmi"] },
      "position": { "x": 860, "y": 300 }
    },
    {
      "id": "node_9", "label": "Sega Dreamcast", "kind": "console", "templateId": "dreamcast",
      "staticSpec": { "inputs": [], "outputs": ["composite", "s-video", "rgb", "vga"] },
      "selectedOutput": "vga",
      "position": { "x": 860, "y": 520 }
    },
    {
      "id": "node_10", "label": "HDMI Flat Panel", "kind": "display", "templateId": "lcd-tv",
      "staticSpec": { "inputs": ["hdmi", "hdmi", "component", "composite", "vga"], "outputs": [] },
      "position": { "x": 1120, "y": 380 }
    },
    {
      "id": "node_11", "label": "Sony PVM-20M2", "kind": "display", "templateId": "pvm-20m2",
      "staticSpec": { "inputs": ["composite", "s-video", "rgb", "component"], "outputs": [] },
      "position": { "x": 600, "y": 620 }
    }
  ],
  "edges": [
    { "id": "edge_0", "sourceNodeId": "node_0", "sourcePortIndex": 0,
      "targetNodeId": "node_3", "targetPortIndex": 0, "signalType": "rgb" },
    { "id": "edge_1", "sourceNodeId": "node_1", "sourcePortIndex": 0,
      "targetNodeId": "node_3", "targetPortIndex": 1, "signalType": "rgb" },
    { "id": "edge_2", "sourceNodeId": "node_2", "sourcePortIndex": 0,
      "targetNodeId": "node_3", "targetPortIndex": 2, "signalType": "rgb" },
    { "id": "edge_3", "sourceNodeId": "node_4", "sourcePortIndex": 0,
      "targetNodeId": "node_6", "targetPortIndex": 0, "signalType": "component" },
    { "id": "edge_4", "sourceNodeId": "node_5", "sourcePortIndex": 0,
      "targetNodeId": "node_6", "targetPortIndex": 1, "signalType": "component" },
    { "id": "edge_5", "sourceNodeId": "node_3", "sourcePortIndex": 0,
      "targetNodeId": "node_7", "targetPortIndex": 0, "signalType": "scart" },
    { "id": "edge_6", "sourceNodeId": "node_6", "sourcePortIndex": 0,
      "targetNodeId": "node_7", "targetPortIndex": 1, "signalType": "component" },
    { "id": "edge_7", "sourceNodeId": "node_7", "sourcePortIndex": 0,
      "targetNodeId": "node_8", "targetPortIndex": 0, "signalType": "hdmi" },
    { "id": "edge_8", "sourceNodeId": "node_8", "sourcePortIndex": 0,
      "targetNodeId": "node_10", "targetPortIndex": 0, "signalType": "hdmi" },
    { "id": "edge_9", "sourceNodeId": "node_9", "sourcePortIndex": 0,
      "targetNodeId": "node_10", "targetPortIndex": 4, "signalType": "vga" },
    { "id": "edge_10", "sourceNodeId": "node_6", "sourcePortIndex": 0,
      "targetNodeId": "node_11", "targetPortIndex": 3, "signalType": "component" }
  ],
  "viewport": { "x": 0, "y": 0, "zoom": 1 }
}"##;

/// A configured Scalable Video Switch feeding a PVM and an upscaler.
const SVS_DIAGRAM: &str = r##"{
  "name": "SVS Setup",
  "description": "Scalable Video Switch with multiple consoles",
  "nodes": [
    {
      "id": "node_0", "label": "Super Nintendo", "kind": "console", "templateId": "snes",
      "staticSpec": { "inputs": [], "outputs": ["rf", "composite", "s-video", "rgb"] },
      "selectedOutput": "rgb",
      "position": { "x": 60, "y": 40 }
    },
    {
      "id": "node_1", "label": "Sega Genesis / Mega Drive", "kind": "console", "templateId": "genesis",
      "staticSpec": { "inputs": [], "outputs": ["rf", "composite", "rgb"] },
      "selectedOutput": "rgb",
      "position": { "x": 60, "y": 160 }
    },
    {
      "id": "node_2", "label": "PlayStation", "kind": "console", "templateId": "ps1",
      "staticSpec": { "inputs": [], "outputs": ["composite", "s-video", "rgb"] },
      "selectedOutput": "rgb",
      "position": { "x": 60, "y": 280 }
    },
    {
      "id": "node_3", "label": "Nintendo 64", "kind": "console", "templateId": "n64",
      "staticSpec": { "inputs": [], "outputs": ["rf", "composite", "s-video"] },
      "selectedOutput": "s-video",
      "position": { "x": 60, "y": 400 }
    },
    {
      "id": "node_4", "label": "gscartsw SCART Switch", "kind": "switcher", "templateId": "svs-gscartsw",
      "isSVS": true,
      "dynamicConfig": {
        "numInputs": 4, "numOutputs": 2,
        "inputs": ["scart", "scart", "scart", "s-video"],
        "outputs": ["scart", "scart"]
      },
      "limits": { "maxInputs": 8, "maxOutputs": 2 },
      "position": { "x": 360, "y": 200 }
    },
    {
      "id": "node_5", "label": "Sony PVM-20M2", "kind": "display", "templateId": "pvm-20m2",
      "staticSpec": { "inputs": ["composite", "s-video", "rgb", "component"], "outputs": [] },
      "position": { "x": 680, "y": 60 }
    },
    {
      "id": "node_6", "label": "Open Source Scan Converter", "kind": "upscaler", "templateId": "ossc",
      "staticSpec": { "inputs": ["scart", "component", "vga"], "outputs": ["hdmi"] },
      "position": { "x": 680, "y": 320 }
    },
    {
      "id": "node_7", "label": "HDMI Flat Panel", "kind": "display", "templateId": "lcd-tv",
      "staticSpec": { "inputs": ["hdmi", "hdmi", "component", "composite", "vga"], "outputs": [] },
      "position": { "x": 960, "y": 320 }
    }
  ],
  "edges": [
    { "id": "edge_0", "sourceNodeId": "node_0", "sourcePortIndex": 0,
      "targetNodeId": "node_4", "targetPortIndex": 0, "signalType": "rgb" },
    { "id": "edge_1", "sourceNodeId": "node_1", "sourcePortIndex": 0,
      "targetNodeId": "node_4", "targetPortIndex": 1, "signalType": "rgb" },
    { "id": "edge_2", "sourceNodeId": "node_2", "sourcePortIndex": 0,
      "targetNodeId": "node_4", "targetPortIndex": 2, "signalType": "rgb" },
    { "id": "edge_3", "sourceNodeId": "node_3", "sourcePortIndex": 0,
      "targetNodeId": "node_4", "targetPortIndex": 3, "signalType": "s-video" },
    { "id": "edge_4", "sourceNodeId": "node_4", "sourcePortIndex": 0,
      "targetNodeId": "node_5", "targetPortIndex": 2, "signalType": "scart" },
    { "id": "edge_5", "sourceNodeId": "node_4", "sourcePortIndex": 1,
      "targetNodeId": "node_6", "targetPortIndex": 0, "signalType": "scart" },
    { "id": "edge_6", "sourceNodeId": "node_6", "sourcePortIndex": 0,
      "targetNodeId": "node_7", "targetPortIndex": 0, "signalType": "hdmi" }
  ],
  "viewport": { "x": 0, "y": 0, "zoom": 1 }
}"##;

/// Get all factory diagrams.
///
/// # Example
///
/// ```rust
/// use patchbay_config::factory_diagrams;
///
/// for diagram in factory_diagrams() {
///     println!("{} ({} nodes)", diagram.name, diagram.node_count());
/// }
/// ```
pub fn factory_diagrams() -> Vec<Diagram> {
    FACTORY_DIAGRAMS_JSON
        .iter()
        .filter_map(|(_, json)| Diagram::from_json(json).ok())
        .collect()
}

/// Get a factory diagram by short name or display name, ignoring case.
///
/// ```rust
/// use patchbay_config::get_factory_diagram;
///
/// let diagram = get_factory_diagram("svs").unwrap();
/// assert_eq!(diagram.name, "SVS Setup");
/// assert!(get_factory_diagram("Simple Setup").is_some());
/// ```
pub fn get_factory_diagram(name: &str) -> Option<Diagram> {
    if let Some((_, json)) = FACTORY_DIAGRAMS_JSON
        .iter()
        .find(|(short, _)| short.eq_ignore_ascii_case(name))
    {
        return Diagram::from_json(json).ok();
    }

    factory_diagrams()
        .into_iter()
        .find(|diagram| diagram.name.eq_ignore_ascii_case(name))
}

/// Get the short names of all factory diagrams.
pub fn factory_diagram_names() -> Vec<&'static str> {
    FACTORY_DIAGRAMS_JSON.iter().map(|(name, _)| *name).collect()
}

/// Check if a name refers to a factory diagram (case-insensitive).
pub fn is_factory_diagram(name: &str) -> bool {
    get_factory_diagram(name).is_some()
}
