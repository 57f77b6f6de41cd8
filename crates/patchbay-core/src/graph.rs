//! Wiring graph — node/edge ownership and consistency.
//!
//! [`Graph`] is the only owner of the node and edge collections. Everything
//! that changes the diagram goes through its methods, and each method either
//! applies completely (including cascading edge cleanup) or returns an error
//! and leaves the graph untouched.
//!
//! Invariants maintained after every operation:
//!
//! - every edge passed [`validate`] when committed and still does;
//! - an input port terminates at most one edge;
//! - a console has at most one outgoing edge in total;
//! - every edge's cached signal equals its source's effective output type;
//! - node and edge IDs are never reused.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::edge::{Edge, EdgeId};
use crate::node::{NewNode, Node, NodeId};
use crate::port::{self, Ports};
use crate::signal::SignalType;
use crate::svs::SvsConfig;
use crate::validate::{Connection, NodeLookup, Rejection, ValidatedConnection, validate};

const NODE_ID_PREFIX: &str = "node_";
const EDGE_ID_PREFIX: &str = "edge_";

/// Snapshot ID suffixes at or above this do not advance the ID counters.
const MAX_RESUMED_SLOT: u64 = u32::MAX as u64;

/// Counter value that follows a snapshot ID with the given numeric suffix.
fn resume_slot(suffix: Option<u64>) -> u64 {
    suffix.filter(|&n| n < MAX_RESUMED_SLOT).map_or(0, |n| n + 1)
}

/// Errors returned by graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The specified node was not found in the graph.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// The specified edge was not found in the graph.
    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),

    /// The connection failed validation.
    #[error("connection rejected: {0}")]
    Rejected(#[from] Rejection),

    /// Switching a console output would break an existing cable.
    #[error(
        "cannot switch {node} to {signal}: input {port} of {target_label} ({target}) is {input}"
    )]
    RetypeRejected {
        /// Console being retyped.
        node: NodeId,
        /// Requested output type.
        signal: SignalType,
        /// Downstream node that would become invalid.
        target: NodeId,
        /// Label of that node, for messages.
        target_label: String,
        /// Input index on the downstream node.
        port: usize,
        /// Type of that input, or empty if it no longer resolves.
        input: SignalType,
    },

    /// The operation only applies to single-output (console) nodes.
    #[error("node {0} is not a console")]
    NotConsole(NodeId),

    /// The requested output type is not one the console offers.
    #[error("node {node} has no {signal} output")]
    OutputNotOffered {
        /// Console node.
        node: NodeId,
        /// Requested type.
        signal: SignalType,
    },

    /// The operation only applies to scalable switch nodes.
    #[error("node {0} is not a scalable switch")]
    NotScalable(NodeId),
}

/// Edges affected by a port-shape change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Edges removed because their port vanished or became incompatible.
    pub pruned: Vec<Edge>,
    /// Edges whose cached signal type was updated.
    pub refreshed: Vec<EdgeId>,
}

impl Reconciliation {
    /// Returns `true` if no edge was touched.
    pub fn is_empty(&self) -> bool {
        self.pruned.is_empty() && self.refreshed.is_empty()
    }
}

/// Result of a scalable-switch configuration change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortChange {
    /// Configuration after the change.
    pub config: SvsConfig,
    /// `false` if the change was a no-op (out-of-range type index).
    pub applied: bool,
    /// Edge cleanup performed after the change.
    pub reconciliation: Reconciliation,
}

/// Why a snapshot edge was not admitted on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "detail")]
pub enum DropReason {
    /// The edge failed validation against the loaded nodes.
    Invalid(String),
    /// Another edge already terminates at the same input.
    InputOccupied(EdgeId),
    /// The console source already has an outgoing edge.
    ConsoleOutputTaken(EdgeId),
    /// An earlier edge has the same ID.
    DuplicateId,
}

/// An edge discarded while loading a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedEdge {
    /// The discarded edge as it appeared in the snapshot.
    pub edge: Edge,
    /// Why it was discarded.
    pub reason: DropReason,
}

/// Everything [`Graph::from_parts`] had to fix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairReport {
    /// Nodes discarded because an earlier node had the same ID.
    pub duplicate_nodes: Vec<NodeId>,
    /// Consoles whose selected output was not among their outputs.
    pub cleared_selections: Vec<NodeId>,
    /// Edges not admitted.
    pub dropped_edges: Vec<DroppedEdge>,
    /// Admitted edges whose cached signal type was stale.
    pub refreshed_edges: Vec<EdgeId>,
}

impl RepairReport {
    /// Returns `true` if the snapshot loaded without changes.
    pub fn is_clean(&self) -> bool {
        self.duplicate_nodes.is_empty()
            && self.cleared_selections.is_empty()
            && self.dropped_edges.is_empty()
            && self.refreshed_edges.is_empty()
    }
}

/// The wiring diagram: nodes, edges and the operations that keep them
/// consistent.
///
/// # Usage
///
/// 1. Create a graph with [`new()`](Self::new) or load one with
///    [`from_parts()`](Self::from_parts)
/// 2. Add equipment: [`add_node()`](Self::add_node)
/// 3. Wire it: [`connect()`](Self::connect)
/// 4. Edit it: [`retype_console_output()`](Self::retype_console_output),
///    [`set_input_count()`](Self::set_input_count),
///    [`disconnect()`](Self::disconnect), [`remove_node()`](Self::remove_node)
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_node_slot: u64,
    next_edge_slot: u64,
}

impl NodeLookup for Graph {
    fn lookup(&self, id: &NodeId) -> Option<&Node> {
        self.node(id)
    }
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Loading ---

    /// Rebuilds a graph from snapshot data without trusting it.
    ///
    /// Nodes are kept in order (later duplicates of an ID are discarded) and
    /// stale console selections are cleared. Edges are then admitted one by
    /// one through the same checks as [`connect()`](Self::connect), except
    /// that an occupied input or console output keeps the earlier edge instead
    /// of replacing it. Admitted edges get their cached signal re-derived.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> (Self, RepairReport) {
        let mut report = RepairReport::default();
        let mut graph = Self::new();

        for mut node in nodes {
            if graph.node(&node.id).is_some() {
                report.duplicate_nodes.push(node.id);
                continue;
            }
            if node.normalize_selection() {
                report.cleared_selections.push(node.id.clone());
            }
            graph.next_node_slot = graph.next_node_slot.max(resume_slot(node.id.numeric_suffix()));
            graph.nodes.push(node);
        }

        for edge in edges {
            graph.next_edge_slot = graph.next_edge_slot.max(resume_slot(edge.id.numeric_suffix()));

            if graph.edge(&edge.id).is_some() {
                report.dropped_edges.push(DroppedEdge {
                    edge,
                    reason: DropReason::DuplicateId,
                });
                continue;
            }

            let signal = match validate(&graph, &edge.connection()) {
                Ok(validated) => validated.signal().clone(),
                Err(rejection) => {
                    report.dropped_edges.push(DroppedEdge {
                        edge,
                        reason: DropReason::Invalid(rejection.to_string()),
                    });
                    continue;
                }
            };

            if let Some(existing) = graph.edge_at_input(&edge.target, edge.target_port) {
                let reason = DropReason::InputOccupied(existing.id.clone());
                report.dropped_edges.push(DroppedEdge { edge, reason });
                continue;
            }

            let single_output = graph
                .node(&edge.source)
                .is_some_and(Node::is_single_output);
            let taken = single_output
                .then(|| graph.edges_from(&edge.source).next())
                .flatten()
                .map(|existing| existing.id.clone());
            if let Some(existing) = taken {
                let reason = DropReason::ConsoleOutputTaken(existing);
                report.dropped_edges.push(DroppedEdge { edge, reason });
                continue;
            }

            let mut edge = edge;
            if edge.signal != signal {
                edge.signal = signal;
                report.refreshed_edges.push(edge.id.clone());
            }
            graph.edges.push(edge);
        }

        #[cfg(feature = "tracing")]
        if !report.is_clean() {
            tracing::warn!(
                dropped = report.dropped_edges.len(),
                refreshed = report.refreshed_edges.len(),
                cleared = report.cleared_selections.len(),
                duplicates = report.duplicate_nodes.len(),
                "graph_load: snapshot repaired"
            );
        }

        (graph, report)
    }

    /// Consumes the graph, returning its nodes and edges.
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    // --- Node mutations ---

    /// Adds a node and returns its newly assigned ID.
    ///
    /// A console selection that is not among the node's outputs is dropped.
    pub fn add_node(&mut self, new: NewNode) -> NodeId {
        let id = self.allocate_node_id();
        let mut node = new.into_node(id.clone());
        node.normalize_selection();
        #[cfg(feature = "tracing")]
        tracing::debug!(node = %id, kind = %node.kind, svs = node.is_svs, "graph_add");
        self.nodes.push(node);
        id
    }

    /// Removes a node and every edge that starts or ends at it.
    ///
    /// Returns the removed node and edges.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<(Node, Vec<Edge>), GraphError> {
        let idx = self.node_index(id)?;
        let node = self.nodes.remove(idx);
        let removed = self.take_edges(|e| e.touches(id));
        #[cfg(feature = "tracing")]
        tracing::debug!(node = %id, edges = removed.len(), "graph_remove");
        Ok((node, removed))
    }

    // --- Edge mutations ---

    /// Validates and commits a connection.
    ///
    /// On success any edge already terminating at the target input is
    /// replaced, and if the source is a console all of its previous outgoing
    /// edges are replaced too. On rejection nothing changes.
    pub fn connect(&mut self, candidate: &Connection) -> Result<EdgeId, GraphError> {
        let validated = validate(self, candidate).inspect_err(|_rejection| {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                connection = %candidate,
                reason = %_rejection,
                "graph_connect rejected"
            );
        })?;
        Ok(self.commit(validated))
    }

    /// Removes a single edge.
    pub fn disconnect(&mut self, id: &EdgeId) -> Result<Edge, GraphError> {
        let idx = self
            .edges
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| GraphError::EdgeNotFound(id.clone()))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(edge = %id, "graph_disconnect");
        Ok(self.edges.remove(idx))
    }

    /// Switches a console to another of its outputs.
    ///
    /// Every existing outgoing edge is checked against the new type first; if
    /// any downstream input would become incompatible the whole change is
    /// rejected with that input named. On success the selection and every
    /// outgoing edge's cached signal are updated together.
    ///
    /// Returns the IDs of the updated edges.
    pub fn retype_console_output(
        &mut self,
        id: &NodeId,
        signal: SignalType,
    ) -> Result<Vec<EdgeId>, GraphError> {
        let node = self.lookup_node(id)?;
        if !node.is_single_output() {
            return Err(GraphError::NotConsole(id.clone()));
        }
        if !node.offers_output(&signal) {
            return Err(GraphError::OutputNotOffered {
                node: id.clone(),
                signal,
            });
        }

        for edge in self.edges_from(id) {
            let target = self.node(&edge.target);
            let input = target.and_then(|t| port::input_type(t, edge.target_port));
            let compatible = input.as_ref().is_some_and(|input| signal.drives(input));
            if !compatible {
                return Err(GraphError::RetypeRejected {
                    node: id.clone(),
                    signal,
                    target: edge.target.clone(),
                    target_label: target.map(|t| t.label.clone()).unwrap_or_default(),
                    port: edge.target_port,
                    input: input.unwrap_or_else(|| SignalType::new("")),
                });
            }
        }

        let idx = self.node_index(id)?;
        self.nodes[idx].selected_output = Some(signal.clone());

        let mut updated = Vec::new();
        for edge in self.edges.iter_mut().filter(|e| &e.source == id) {
            edge.signal = signal.clone();
            updated.push(edge.id.clone());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(node = %id, signal = %signal, edges = updated.len(), "graph_retype");
        Ok(updated)
    }

    // --- Scalable switch configuration ---

    /// Sets the input count of a scalable switch, then reconciles its edges.
    pub fn set_input_count(&mut self, id: &NodeId, count: usize) -> Result<PortChange, GraphError> {
        self.reconfigure(id, |config, limits| {
            config.set_input_count(count, limits);
            true
        })
    }

    /// Sets the output count of a scalable switch, then reconciles its edges.
    pub fn set_output_count(
        &mut self,
        id: &NodeId,
        count: usize,
    ) -> Result<PortChange, GraphError> {
        self.reconfigure(id, |config, limits| {
            config.set_output_count(count, limits);
            true
        })
    }

    /// Retypes one input of a scalable switch, then reconciles its edges.
    ///
    /// An out-of-range index is a no-op reported through
    /// [`PortChange::applied`].
    pub fn set_input_type(
        &mut self,
        id: &NodeId,
        index: usize,
        signal: SignalType,
    ) -> Result<PortChange, GraphError> {
        self.reconfigure(id, |config, _| config.set_input_type(index, signal))
    }

    /// Retypes one output of a scalable switch, then reconciles its edges.
    ///
    /// An out-of-range index is a no-op reported through
    /// [`PortChange::applied`].
    pub fn set_output_type(
        &mut self,
        id: &NodeId,
        index: usize,
        signal: SignalType,
    ) -> Result<PortChange, GraphError> {
        self.reconfigure(id, |config, _| config.set_output_type(index, signal))
    }

    /// Re-checks every edge touching `id` after its ports changed shape.
    ///
    /// Edges whose port index is now out of range, or whose endpoints are no
    /// longer compatible, are removed. Remaining edges leaving `id` get their
    /// cached signal refreshed.
    pub fn reconcile_after_port_change(
        &mut self,
        id: &NodeId,
    ) -> Result<Reconciliation, GraphError> {
        self.node_index(id)?;

        let mut prune = Vec::new();
        let mut refresh = Vec::new();
        for edge in self.edges.iter().filter(|e| e.touches(id)) {
            match validate(self, &edge.connection()) {
                Ok(validated) if validated.signal() != &edge.signal => {
                    refresh.push((edge.id.clone(), validated.signal().clone()));
                }
                Ok(_) => {}
                Err(_) => prune.push(edge.id.clone()),
            }
        }

        let pruned = self.take_edges(|e| prune.contains(&e.id));
        let mut refreshed = Vec::with_capacity(refresh.len());
        for (edge_id, signal) in refresh {
            if let Some(edge) = self.edges.iter_mut().find(|e| e.id == edge_id) {
                edge.signal = signal;
                refreshed.push(edge_id);
            }
        }

        #[cfg(feature = "tracing")]
        if !pruned.is_empty() || !refreshed.is_empty() {
            tracing::debug!(
                node = %id,
                pruned = pruned.len(),
                refreshed = refreshed.len(),
                "graph_reconcile"
            );
        }
        Ok(Reconciliation { pruned, refreshed })
    }

    // --- Queries ---

    /// Returns the node with the given ID.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Returns the edge with the given ID.
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Derived ports of a node.
    pub fn ports(&self, id: &NodeId) -> Option<Ports> {
        self.node(id).map(port::ports)
    }

    /// Edges leaving `id`.
    pub fn edges_from<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| &e.source == id)
    }

    /// Edges arriving at `id`.
    pub fn edges_into<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| &e.target == id)
    }

    /// The edge terminating at input `port` of `id`, if any.
    pub fn edge_at_input(&self, id: &NodeId, port: usize) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| &e.target == id && e.target_port == port)
    }

    /// Returns `true` if the candidate would pass validation.
    pub fn is_valid_connection(&self, candidate: &Connection) -> bool {
        validate(self, candidate).is_ok()
    }

    // --- Internal helpers ---

    fn commit(&mut self, validated: ValidatedConnection) -> EdgeId {
        let (connection, signal) = validated.into_parts();
        let single_output = self
            .node(&connection.source)
            .is_some_and(Node::is_single_output);

        let _replaced = self.take_edges(|e| {
            (e.target == connection.target && e.target_port == connection.target_port)
                || (single_output && e.source == connection.source)
        });

        let id = self.allocate_edge_id();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            edge = %id,
            connection = %connection,
            signal = %signal,
            replaced = _replaced.len(),
            "graph_connect"
        );
        self.edges.push(Edge {
            id: id.clone(),
            source: connection.source,
            source_port: connection.source_port,
            target: connection.target,
            target_port: connection.target_port,
            signal,
        });
        id
    }

    fn reconfigure<F>(&mut self, id: &NodeId, apply: F) -> Result<PortChange, GraphError>
    where
        F: FnOnce(&mut SvsConfig, &crate::node::PortLimits) -> bool,
    {
        let idx = self.node_index(id)?;
        let node = &mut self.nodes[idx];
        if !node.is_svs {
            return Err(GraphError::NotScalable(id.clone()));
        }

        let mut config = node
            .dynamic_config
            .clone()
            .unwrap_or_default()
            .normalized_within(&node.limits);
        let applied = apply(&mut config, &node.limits);
        node.dynamic_config = Some(config.clone());
        #[cfg(feature = "tracing")]
        if !applied {
            tracing::debug!(node = %id, "svs_config: port index out of range, ignored");
        }

        let reconciliation = self.reconcile_after_port_change(id)?;
        Ok(PortChange {
            config,
            applied,
            reconciliation,
        })
    }

    /// Removes and returns every edge matching `pred`, preserving order.
    fn take_edges(&mut self, pred: impl Fn(&Edge) -> bool) -> Vec<Edge> {
        let (taken, kept): (Vec<Edge>, Vec<Edge>) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|e| pred(e));
        self.edges = kept;
        taken
    }

    fn node_index(&self, id: &NodeId) -> Result<usize, GraphError> {
        self.nodes
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    fn lookup_node(&self, id: &NodeId) -> Result<&Node, GraphError> {
        self.node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))
    }

    fn allocate_node_id(&mut self) -> NodeId {
        loop {
            let id = NodeId::new(format!("{NODE_ID_PREFIX}{}", self.next_node_slot));
            self.next_node_slot = self.next_node_slot.saturating_add(1);
            if self.node(&id).is_none() {
                return id;
            }
        }
    }

    fn allocate_edge_id(&mut self) -> EdgeId {
        loop {
            let id = EdgeId::new(format!("{EDGE_ID_PREFIX}{}", self.next_edge_slot));
            self.next_edge_slot = self.next_edge_slot.saturating_add(1);
            if self.edge(&id).is_none() {
                return id;
            }
        }
    }
}
