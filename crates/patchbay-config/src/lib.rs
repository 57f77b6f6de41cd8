//! Diagram persistence and editor configuration for patchbay.
//!
//! This crate is the storage side of the wiring editor: it turns graphs into
//! JSON snapshots and back, remembers recently used diagrams, reads editor
//! settings, and bundles a handful of example diagrams.
//!
//! # Features
//!
//! - **Diagrams**: JSON snapshots that are repaired on load, never trusted
//! - **Settings**: TOML editor settings with an optional external catalog
//! - **Recent list**: most-recently-used diagrams, newest first
//! - **Paths**: platform-specific config and diagram directories
//! - **Factory diagrams**: built-in examples from a single cable to an SVS rack
//!
//! # Example
//!
//! ```rust,no_run
//! use patchbay_config::{Diagram, EditorSettings, instantiate};
//! use patchbay_core::Connection;
//!
//! let settings = EditorSettings::load_default().unwrap();
//! let registry = settings.load_registry().unwrap();
//!
//! let (mut graph, report) = Diagram::load("living_room.json").unwrap().into_graph();
//! if !report.is_clean() {
//!     eprintln!("dropped {} edges", report.dropped_edges.len());
//! }
//!
//! let snes = graph.add_node(instantiate(&registry, "snes").unwrap());
//! let tv = graph.add_node(instantiate(&registry, "trinitron-kv27").unwrap());
//! graph.connect(&Connection::new(snes, 0, tv, 0)).unwrap();
//!
//! Diagram::from_graph("Living Room", &graph)
//!     .save(settings.diagrams_dir().join("living_room.json"))
//!     .unwrap();
//! ```

mod diagram;
mod error;
mod recent;
mod settings;

/// Platform-specific paths for diagrams and configuration.
pub mod paths;

/// Factory diagrams bundled with the library.
pub mod factory_diagrams;

pub use diagram::{Diagram, Viewport};
pub use error::ConfigError;
pub use factory_diagrams::{
    FACTORY_DIAGRAM_NAMES, factory_diagram_names, factory_diagrams, get_factory_diagram,
    is_factory_diagram,
};
pub use paths::{
    diagram_name_from_path, ensure_user_config_dir, ensure_user_diagrams_dir, find_diagram,
    list_user_diagrams, user_config_dir, user_diagrams_dir,
};
pub use recent::{RecentDiagrams, RecentEntry};
pub use settings::{DEFAULT_RECENT_LIMIT, EditorSettings, instantiate};

/// Re-export commonly used types from patchbay-registry
pub use patchbay_registry::{EquipmentCategory, EquipmentRegistry, EquipmentTemplate};
