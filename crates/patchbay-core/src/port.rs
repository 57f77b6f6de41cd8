//! Port derivation: the typed connection points a node exposes.
//!
//! Ports are positional. Input `n` is addressed by the handle `in-<n>` and
//! output `n` by `out-<n>`; the index is stable for as long as the port exists.
//!
//! [`ports`] is a pure function of the node and is recomputed on every read, so
//! rendering and validation always agree on what a node exposes.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{Node, NodeKind};
use crate::signal::SignalType;

/// Side of a node a port sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Receives a signal (`in-<n>`).
    Input,
    /// Emits a signal (`out-<n>`).
    Output,
}

impl Direction {
    const fn prefix(self) -> &'static str {
        match self {
            Direction::Input => "in",
            Direction::Output => "out",
        }
    }
}

/// Stable handle identifier of a port, e.g. `out-0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortHandle {
    /// Port side.
    pub direction: Direction,
    /// Position on that side.
    pub index: usize,
}

impl PortHandle {
    /// Handle of input `index`.
    pub const fn input(index: usize) -> Self {
        Self {
            direction: Direction::Input,
            index,
        }
    }

    /// Handle of output `index`.
    pub const fn output(index: usize) -> Self {
        Self {
            direction: Direction::Output,
            index,
        }
    }
}

impl fmt::Display for PortHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.direction.prefix(), self.index)
    }
}

/// Error returned when a string is not an `in-<n>` / `out-<n>` handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid port handle '{0}' (expected in-<n> or out-<n>)")]
pub struct ParseHandleError(pub String);

impl FromStr for PortHandle {
    type Err = ParseHandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseHandleError(s.to_string());
        let (prefix, index) = s.trim().split_once('-').ok_or_else(err)?;
        let direction = match prefix {
            "in" => Direction::Input,
            "out" => Direction::Output,
            _ => return Err(err()),
        };
        let index = index.parse().map_err(|_| err())?;
        Ok(Self { direction, index })
    }
}

/// A single typed port.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// Position on its side.
    pub index: usize,
    /// Signal type carried by the port.
    #[serde(rename = "type")]
    pub signal: SignalType,
}

/// All ports of a node, inputs and outputs in handle order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ports {
    /// Input ports.
    pub inputs: Vec<PortSpec>,
    /// Output ports.
    pub outputs: Vec<PortSpec>,
}

impl Ports {
    fn from_types<'a>(
        inputs: impl IntoIterator<Item = &'a SignalType>,
        outputs: impl IntoIterator<Item = &'a SignalType>,
    ) -> Self {
        let specs = |types: Vec<&SignalType>| {
            types
                .into_iter()
                .enumerate()
                .map(|(index, signal)| PortSpec {
                    index,
                    signal: signal.clone(),
                })
                .collect()
        };
        Self {
            inputs: specs(inputs.into_iter().collect()),
            outputs: specs(outputs.into_iter().collect()),
        }
    }

    /// Type of input `index`.
    pub fn input(&self, index: usize) -> Option<&SignalType> {
        self.inputs.get(index).map(|p| &p.signal)
    }

    /// Type of output `index`.
    pub fn output(&self, index: usize) -> Option<&SignalType> {
        self.outputs.get(index).map(|p| &p.signal)
    }
}

/// Derives the ports a node currently exposes.
///
/// - Scalable switches take their lists from the normalized dynamic
///   configuration, so each side always has at least one port.
/// - Consoles expose a single output: the selected one, or the first static
///   output if nothing is selected.
/// - Everything else uses its static spec verbatim.
pub fn ports(node: &Node) -> Ports {
    if node.is_svs {
        let config = node
            .dynamic_config
            .clone()
            .unwrap_or_default()
            .normalized_within(&node.limits);
        return Ports::from_types(&config.inputs, &config.outputs);
    }

    let empty = Vec::new();
    let inputs = node.static_spec.as_ref().map_or(&empty, |s| &s.inputs);

    if node.kind == NodeKind::Console {
        return Ports::from_types(inputs, node.effective_console_output());
    }

    let outputs = node.static_spec.as_ref().map_or(&empty, |s| &s.outputs);
    Ports::from_types(inputs, outputs)
}

/// Effective output type of `node` at `index`.
///
/// Consoles always answer with their single active output, whatever index is
/// asked for.
pub fn output_type(node: &Node, index: usize) -> Option<SignalType> {
    if node.is_single_output() {
        return node.effective_console_output().cloned();
    }
    ports(node).output(index).cloned()
}

/// Effective input type of `node` at `index`.
pub fn input_type(node: &Node, index: usize) -> Option<SignalType> {
    ports(node).input(index).cloned()
}
