//! Connection admissibility.
//!
//! A proposed [`Connection`] becomes a [`ValidatedConnection`] only by passing
//! [`validate`]. The graph commits nothing else, so every stored edge has been
//! checked against the port model and the signal compatibility table.
//!
//! The same check gates interactive connection attempts, console output
//! retyping and snapshot loading.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{Node, NodeId};
use crate::port::{self, PortHandle};
use crate::signal::SignalType;

/// Read access to nodes by ID.
///
/// Implemented by [`Graph`](crate::Graph) and by node slices, so candidates can
/// be checked against a snapshot before a graph exists.
pub trait NodeLookup {
    /// Returns the node with the given ID.
    fn lookup(&self, id: &NodeId) -> Option<&Node>;
}

impl NodeLookup for [Node] {
    fn lookup(&self, id: &NodeId) -> Option<&Node> {
        self.iter().find(|n| &n.id == id)
    }
}

impl NodeLookup for Vec<Node> {
    fn lookup(&self, id: &NodeId) -> Option<&Node> {
        self.as_slice().lookup(id)
    }
}

/// A proposed edge: output `source_port` of `source` to input `target_port` of
/// `target`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Node emitting the signal.
    pub source: NodeId,
    /// Output index on the source.
    pub source_port: usize,
    /// Node receiving the signal.
    pub target: NodeId,
    /// Input index on the target.
    pub target_port: usize,
}

impl Connection {
    /// Creates a connection candidate.
    pub fn new(
        source: impl Into<NodeId>,
        source_port: usize,
        target: impl Into<NodeId>,
        target_port: usize,
    ) -> Self {
        Self {
            source: source.into(),
            source_port,
            target: target.into(),
            target_port,
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} → {}:{}",
            self.source,
            PortHandle::output(self.source_port),
            self.target,
            PortHandle::input(self.target_port)
        )
    }
}

/// Why a connection was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The source node does not exist.
    #[error("source node {0} not found")]
    SourceNotFound(NodeId),

    /// The target node does not exist.
    #[error("target node {0} not found")]
    TargetNotFound(NodeId),

    /// The source has no output at the requested index.
    #[error("node {node} has no output {port}")]
    MissingOutput {
        /// Source node.
        node: NodeId,
        /// Requested output index.
        port: usize,
    },

    /// The target has no input at the requested index.
    #[error("node {node} has no input {port}")]
    MissingInput {
        /// Target node.
        node: NodeId,
        /// Requested input index.
        port: usize,
    },

    /// A port resolved to an empty signal label.
    #[error("port {handle} on node {node} has no signal type")]
    UntypedPort {
        /// Node owning the port.
        node: NodeId,
        /// Port handle, e.g. `in-2`.
        handle: String,
    },

    /// The signals cannot be physically connected.
    #[error("{output} output cannot drive {input} input")]
    Incompatible {
        /// Resolved source output type.
        output: SignalType,
        /// Resolved target input type.
        input: SignalType,
    },
}

/// A connection that passed [`validate`], carrying the resolved output type.
///
/// Only this module can construct one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedConnection {
    connection: Connection,
    signal: SignalType,
}

impl ValidatedConnection {
    /// The checked connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Effective source output type at validation time.
    pub fn signal(&self) -> &SignalType {
        &self.signal
    }

    pub(crate) fn into_parts(self) -> (Connection, SignalType) {
        (self.connection, self.signal)
    }
}

/// Checks a candidate against the current nodes.
///
/// 1. Both endpoints must exist.
/// 2. The source output type is resolved through the port model (a console
///    always answers with its active output).
/// 3. The target input type is resolved the same way.
/// 4. Neither may be empty.
/// 5. [`is_compatible`](crate::signal::is_compatible) decides.
pub fn validate<L>(nodes: &L, candidate: &Connection) -> Result<ValidatedConnection, Rejection>
where
    L: NodeLookup + ?Sized,
{
    let source = nodes
        .lookup(&candidate.source)
        .ok_or_else(|| Rejection::SourceNotFound(candidate.source.clone()))?;
    let target = nodes
        .lookup(&candidate.target)
        .ok_or_else(|| Rejection::TargetNotFound(candidate.target.clone()))?;

    let output = port::output_type(source, candidate.source_port).ok_or_else(|| {
        Rejection::MissingOutput {
            node: source.id.clone(),
            port: candidate.source_port,
        }
    })?;
    let input = port::input_type(target, candidate.target_port).ok_or_else(|| {
        Rejection::MissingInput {
            node: target.id.clone(),
            port: candidate.target_port,
        }
    })?;

    if output.is_empty() {
        return Err(Rejection::UntypedPort {
            node: source.id.clone(),
            handle: PortHandle::output(candidate.source_port).to_string(),
        });
    }
    if input.is_empty() {
        return Err(Rejection::UntypedPort {
            node: target.id.clone(),
            handle: PortHandle::input(candidate.target_port).to_string(),
        });
    }

    if !output.drives(&input) {
        return Err(Rejection::Incompatible { output, input });
    }

    Ok(ValidatedConnection {
        connection: candidate.clone(),
        signal: output,
    })
}

/// Boolean form of [`validate`].
pub fn is_valid_connection<L>(nodes: &L, candidate: &Connection) -> bool
where
    L: NodeLookup + ?Sized,
{
    validate(nodes, candidate).is_ok()
}
