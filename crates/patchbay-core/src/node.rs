//! Equipment nodes placed on a wiring diagram.
//!
//! Each [`Node`] has a [`NodeId`], a [`NodeKind`] describing what the box is,
//! and one of two port sources: a fixed [`StaticSpec`] copied from the catalog,
//! or a mutable [`SvsConfig`] for Scalable Video Switch nodes. Which one drives
//! port derivation is decided solely by [`Node::is_svs`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::signal::SignalType;
use crate::svs::SvsConfig;

/// Input ceiling for scalable switches that do not declare one.
pub const DEFAULT_MAX_INPUTS: usize = 32;

/// Output ceiling for scalable switches that do not declare one.
pub const DEFAULT_MAX_OUTPUTS: usize = 6;

/// Hard ceiling on either side of a scalable switch, whatever its limits say.
pub const MAX_PORT_COUNT: usize = 64;

/// Unique identifier for a node in a diagram.
///
/// Graph-assigned IDs have the form `node_<n>`. IDs are never reused within a
/// graph instance, even after the node is deleted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wraps an existing identifier (e.g. one read from a snapshot).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing decimal digits of the identifier, if any.
    ///
    /// Used to resume the ID counter after loading a snapshot.
    pub fn numeric_suffix(&self) -> Option<u64> {
        numeric_suffix(&self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Parses the run of ASCII digits at the end of `id`.
pub(crate) fn numeric_suffix(id: &str) -> Option<u64> {
    let digits = id.len() - id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    id[id.len() - digits..].parse().ok()
}

/// What a piece of equipment is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Game console or other source with a single selectable output.
    Console,
    /// Input selector or matrix switch.
    Switcher,
    /// CRT, monitor or TV.
    Display,
    /// Passive cable adapter.
    Adapter,
    /// Line doubler / scaler.
    Upscaler,
}

impl NodeKind {
    /// Returns `true` for kinds that expose one active output at a time.
    pub const fn is_single_output(self) -> bool {
        matches!(self, NodeKind::Console)
    }

    /// Lowercase name used in catalogs and snapshots.
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Console => "console",
            NodeKind::Switcher => "switcher",
            NodeKind::Display => "display",
            NodeKind::Adapter => "adapter",
            NodeKind::Upscaler => "upscaler",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed port lists copied from a catalog template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSpec {
    /// Input port types, in handle order.
    #[serde(default)]
    pub inputs: Vec<SignalType>,
    /// Output port types, in handle order. For consoles this is the list of
    /// selectable outputs, not a set of simultaneous ports.
    #[serde(default)]
    pub outputs: Vec<SignalType>,
}

impl StaticSpec {
    /// Builds a spec from label slices.
    pub fn new(inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| SignalType::from(*s)).collect(),
            outputs: outputs.iter().map(|s| SignalType::from(*s)).collect(),
        }
    }
}

/// Port-count ceilings for a scalable switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortLimits {
    /// Largest allowed input count.
    pub max_inputs: usize,
    /// Largest allowed output count.
    pub max_outputs: usize,
}

impl Default for PortLimits {
    fn default() -> Self {
        Self {
            max_inputs: DEFAULT_MAX_INPUTS,
            max_outputs: DEFAULT_MAX_OUTPUTS,
        }
    }
}

impl PortLimits {
    /// Builds limits from optional catalog values, defaulting each side.
    ///
    /// Declared ceilings are kept within `[1, MAX_PORT_COUNT]`.
    pub fn from_declared(max_inputs: Option<usize>, max_outputs: Option<usize>) -> Self {
        Self {
            max_inputs: max_inputs.unwrap_or(DEFAULT_MAX_INPUTS).clamp(1, MAX_PORT_COUNT),
            max_outputs: max_outputs.unwrap_or(DEFAULT_MAX_OUTPUTS).clamp(1, MAX_PORT_COUNT),
        }
    }

    /// Effective input ceiling. Limits read from a snapshot are not trusted.
    pub fn input_ceiling(&self) -> usize {
        self.max_inputs.clamp(1, MAX_PORT_COUNT)
    }

    /// Effective output ceiling.
    pub fn output_ceiling(&self) -> usize {
        self.max_outputs.clamp(1, MAX_PORT_COUNT)
    }
}

/// Canvas position, carried through snapshots untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal canvas coordinate.
    pub x: f64,
    /// Vertical canvas coordinate.
    pub y: f64,
}

/// A piece of equipment in the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Graph-unique identifier.
    pub id: NodeId,
    /// Human-readable name shown on the canvas.
    pub label: String,
    /// Equipment kind.
    pub kind: NodeKind,
    /// Scalable Video Switch flag; selects `dynamic_config` over `static_spec`.
    #[serde(default, rename = "isSVS")]
    pub is_svs: bool,
    /// Catalog template this node was created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Fixed ports for ordinary equipment.
    #[serde(default)]
    pub static_spec: Option<StaticSpec>,
    /// Runtime port configuration for scalable switches.
    #[serde(default)]
    pub dynamic_config: Option<SvsConfig>,
    /// Ceilings for `dynamic_config` counts.
    #[serde(default)]
    pub limits: PortLimits,
    /// Active output of a console, or `None` before selection.
    #[serde(default)]
    pub selected_output: Option<SignalType>,
    /// Canvas position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Node {
    /// Returns `true` if this node exposes one active output at a time.
    ///
    /// Scalable switches never do, whatever their kind.
    pub fn is_single_output(&self) -> bool {
        !self.is_svs && self.kind.is_single_output()
    }

    /// Output types a console can switch between.
    pub fn available_outputs(&self) -> &[SignalType] {
        self.static_spec
            .as_ref()
            .map(|spec| spec.outputs.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if `signal` is one of this node's static output types.
    pub fn offers_output(&self, signal: &SignalType) -> bool {
        self.available_outputs().iter().any(|s| s.same_as(signal))
    }

    /// The single output a console currently exposes.
    ///
    /// Falls back to the first static output when nothing has been selected.
    pub fn effective_console_output(&self) -> Option<&SignalType> {
        self.selected_output
            .as_ref()
            .or_else(|| self.available_outputs().first())
    }

    /// Clears a console selection that is not among its available outputs.
    ///
    /// Returns `true` if the selection was cleared.
    pub(crate) fn normalize_selection(&mut self) -> bool {
        let stale = match &self.selected_output {
            Some(selected) => !self.is_single_output() || !self.offers_output(selected),
            None => false,
        };
        if stale {
            self.selected_output = None;
        }
        stale
    }
}

/// Description of a node to be inserted; the graph assigns the ID.
#[derive(Clone, Debug, PartialEq)]
pub struct NewNode {
    /// Human-readable name.
    pub label: String,
    /// Equipment kind.
    pub kind: NodeKind,
    /// Scalable Video Switch flag.
    pub is_svs: bool,
    /// Catalog template ID.
    pub template_id: Option<String>,
    /// Fixed ports.
    pub static_spec: Option<StaticSpec>,
    /// Initial scalable configuration.
    pub dynamic_config: Option<SvsConfig>,
    /// Count ceilings.
    pub limits: PortLimits,
    /// Initial console output selection.
    pub selected_output: Option<SignalType>,
    /// Canvas drop position.
    pub position: Option<Position>,
}

impl NewNode {
    /// Ordinary equipment with fixed ports.
    pub fn fixed(label: impl Into<String>, kind: NodeKind, spec: StaticSpec) -> Self {
        Self {
            label: label.into(),
            kind,
            is_svs: false,
            template_id: None,
            static_spec: Some(spec),
            dynamic_config: None,
            limits: PortLimits::default(),
            selected_output: None,
            position: None,
        }
    }

    /// A scalable video switch with the given initial configuration.
    pub fn scalable(label: impl Into<String>, config: SvsConfig, limits: PortLimits) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Switcher,
            is_svs: true,
            template_id: None,
            static_spec: None,
            dynamic_config: Some(config),
            limits,
            selected_output: None,
            position: None,
        }
    }

    /// Overrides the equipment kind.
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the console output selection.
    pub fn with_selected_output(mut self, signal: impl Into<SignalType>) -> Self {
        self.selected_output = Some(signal.into());
        self
    }

    /// Records the originating catalog template.
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Sets the canvas position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    pub(crate) fn into_node(self, id: NodeId) -> Node {
        Node {
            id,
            label: self.label,
            kind: self.kind,
            is_svs: self.is_svs,
            template_id: self.template_id,
            static_spec: self.static_spec,
            dynamic_config: self.dynamic_config,
            limits: self.limits,
            selected_output: self.selected_output,
            position: self.position,
        }
    }
}
