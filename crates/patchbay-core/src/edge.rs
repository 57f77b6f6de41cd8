//! Graph edge types.
//!
//! An [`Edge`] is a committed cable from one node's output to another node's
//! input. It caches the signal type it carries so the canvas can colour it
//! without re-deriving ports; the graph keeps that cache in sync whenever the
//! source's effective output changes.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::node::{NodeId, numeric_suffix};
use crate::port::PortHandle;
use crate::signal::SignalType;
use crate::validate::Connection;

/// Unique identifier for an edge in a diagram.
///
/// Graph-assigned IDs have the form `edge_<n>` and are never reused within a
/// graph instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    /// Wraps an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing decimal digits of the identifier, if any.
    pub fn numeric_suffix(&self) -> Option<u64> {
        numeric_suffix(&self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A committed connection between two ports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Graph-unique identifier.
    pub id: EdgeId,
    /// Node emitting the signal.
    #[serde(rename = "sourceNodeId")]
    pub source: NodeId,
    /// Output index on the source.
    #[serde(rename = "sourcePortIndex")]
    pub source_port: usize,
    /// Node receiving the signal.
    #[serde(rename = "targetNodeId")]
    pub target: NodeId,
    /// Input index on the target.
    #[serde(rename = "targetPortIndex")]
    pub target_port: usize,
    /// Cached effective output type of the source port.
    #[serde(rename = "signalType")]
    pub signal: SignalType,
}

impl Edge {
    /// The endpoints of this edge as a connection candidate.
    pub fn connection(&self) -> Connection {
        Connection {
            source: self.source.clone(),
            source_port: self.source_port,
            target: self.target.clone(),
            target_port: self.target_port,
        }
    }

    /// Returns `true` if either endpoint is `node`.
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }

    /// Handle of the source port, e.g. `out-0`.
    pub fn source_handle(&self) -> PortHandle {
        PortHandle::output(self.source_port)
    }

    /// Handle of the target port, e.g. `in-1`.
    pub fn target_handle(&self) -> PortHandle {
        PortHandle::input(self.target_port)
    }

    /// Display colour for the cable.
    pub fn color(&self) -> &'static str {
        self.signal.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge() -> Edge {
        Edge {
            id: EdgeId::from("edge_4"),
            source: NodeId::from("node_0"),
            source_port: 0,
            target: NodeId::from("node_1"),
            target_port: 2,
            signal: SignalType::from("scart"),
        }
    }

    #[test]
    fn test_edge_helpers() {
        let e = edge();
        assert!(e.touches(&NodeId::from("node_1")));
        assert!(!e.touches(&NodeId::from("node_9")));
        assert_eq!(e.target_handle().to_string(), "in-2");
        assert_eq!(e.id.numeric_suffix(), Some(4));
        assert_eq!(e.connection().target_port, 2);
        assert_eq!(e.color(), "#ef4444");
    }

    #[test]
    fn test_edge_json_shape() {
        let json = serde_json::to_value(edge()).unwrap();
        assert_eq!(json["sourceNodeId"], "node_0");
        assert_eq!(json["targetPortIndex"], 2);
        assert_eq!(json["signalType"], "scart");
    }
}
