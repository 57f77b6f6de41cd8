//! Patchbay Core - signal compatibility and wiring consistency for A/V diagrams
//!
//! This crate is the rules engine behind a retro-gaming A/V wiring planner.
//! It knows which physical video signals can be cabled together, which ports a
//! piece of equipment exposes, and how to keep a diagram consistent while it is
//! edited.
//!
//! # Core Abstractions
//!
//! ## Signals
//!
//! - [`SignalType`] - Opaque, case-insensitive signal label (`hdmi`, `scart`, ...)
//! - [`is_compatible`] - The compatibility table; single source of truth
//! - [`display_color`] - Canvas colour for a signal label
//!
//! ## Equipment
//!
//! - [`Node`] / [`NewNode`] - A placed piece of equipment and its insertion form
//! - [`SvsConfig`] - Variable-arity ports of a Scalable Video Switch
//! - [`ports`] - Derives the ports a node currently exposes
//!
//! ## Connections
//!
//! - [`Connection`] - A proposed cable
//! - [`validate`] - Turns a candidate into a [`ValidatedConnection`] or a [`Rejection`]
//! - [`Graph`] - Owns nodes and edges; every mutation goes through it
//!
//! # Example
//!
//! ```rust
//! use patchbay_core::{Connection, Graph, NewNode, NodeKind, StaticSpec};
//!
//! let mut graph = Graph::new();
//! let snes = graph.add_node(
//!     NewNode::fixed(
//!         "SNES",
//!         NodeKind::Console,
//!         StaticSpec::new(&[], &["rf", "composite", "s-video"]),
//!     )
//!     .with_selected_output("s-video"),
//! );
//! let tv = graph.add_node(NewNode::fixed(
//!     "CRT",
//!     NodeKind::Display,
//!     StaticSpec::new(&["rf", "composite", "s-video"], &[]),
//! ));
//!
//! // s-video cannot drive a composite input
//! assert!(graph.connect(&Connection::new(snes.clone(), 0, tv.clone(), 1)).is_err());
//! let edge = graph.connect(&Connection::new(snes, 0, tv, 2)).unwrap();
//! assert_eq!(graph.edge(&edge).unwrap().signal.as_str(), "s-video");
//! ```
//!
//! # Design Principles
//!
//! - **One rule table**: validation, retyping and snapshot loading all call [`validate`]
//! - **Derived ports**: port lists are recomputed from node data on every read
//! - **Atomic edits**: a [`Graph`] operation applies completely or not at all
//! - **Tolerant loading**: malformed snapshots are repaired, never rejected

pub mod edge;
pub mod graph;
pub mod node;
pub mod port;
pub mod signal;
pub mod svs;
pub mod validate;

// Re-export main types at crate root
pub use edge::{Edge, EdgeId};
pub use graph::{
    DropReason, DroppedEdge, Graph, GraphError, PortChange, Reconciliation, RepairReport,
};
pub use node::{
    DEFAULT_MAX_INPUTS, DEFAULT_MAX_OUTPUTS, MAX_PORT_COUNT, NewNode, Node, NodeId, NodeKind,
    PortLimits, Position, StaticSpec,
};
pub use port::{
    Direction, ParseHandleError, PortHandle, PortSpec, Ports, input_type, output_type, ports,
};
pub use signal::{
    DEFAULT_SIGNAL, FALLBACK_COLOR, KNOWN_SIGNALS, SignalType, display_color, is_compatible,
};
pub use svs::SvsConfig;
pub use validate::{
    Connection, NodeLookup, Rejection, ValidatedConnection, is_valid_connection, validate,
};
