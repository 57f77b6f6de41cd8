//! Equipment catalog and node factory for patchbay wiring diagrams.
//!
//! This crate provides the catalog the editor's sidebar is filled from: every
//! piece of equipment that can be dropped onto a diagram, with the ports it
//! exposes. Templates are turned into [`NewNode`]s for insertion into a
//! [`Graph`](patchbay_core::Graph).
//!
//! # Features
//!
//! - **Built-in catalog**: retro consoles, switchers, displays, upscalers and adapters
//! - **External catalogs**: load a JSON item list with [`EquipmentRegistry::from_json`]
//! - **Category system**: templates organized by [`EquipmentCategory`]
//! - **Search**: case-insensitive name filter, like the sidebar search box
//!
//! # Example
//!
//! ```rust
//! use patchbay_registry::{EquipmentCategory, EquipmentRegistry};
//! use patchbay_core::Graph;
//!
//! let registry = EquipmentRegistry::new();
//!
//! for template in registry.in_category(EquipmentCategory::Console) {
//!     println!("{}: {}", template.id, template.name);
//! }
//!
//! let mut graph = Graph::new();
//! if let Some(node) = registry.instantiate("snes") {
//!     graph.add_node(node);
//! }
//! ```

mod builtin;

use core::fmt;

use patchbay_core::{NewNode, NodeKind, PortLimits, SignalType, StaticSpec, SvsConfig};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog is not valid JSON or does not match the item schema.
    #[error("invalid catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// Two templates share an ID.
    #[error("duplicate template id '{0}'")]
    DuplicateId(String),

    /// A template has an empty ID.
    #[error("template '{0}' has an empty id")]
    EmptyId(String),
}

/// Category of equipment for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentCategory {
    /// Game consoles and other signal sources
    Console,
    /// Input selectors and matrix switches
    Switcher,
    /// CRTs, monitors and TVs
    Display,
    /// Passive cables and adapters
    #[serde(alias = "cable")]
    Adapter,
    /// Line doublers and scalers
    Upscaler,
}

impl EquipmentCategory {
    /// All categories, in sidebar order.
    pub const ALL: [EquipmentCategory; 5] = [
        EquipmentCategory::Console,
        EquipmentCategory::Switcher,
        EquipmentCategory::Upscaler,
        EquipmentCategory::Adapter,
        EquipmentCategory::Display,
    ];

    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            EquipmentCategory::Console => "Consoles",
            EquipmentCategory::Switcher => "Switchers",
            EquipmentCategory::Display => "Displays",
            EquipmentCategory::Adapter => "Adapters",
            EquipmentCategory::Upscaler => "Upscalers",
        }
    }

    /// Returns a description of the category.
    pub const fn description(&self) -> &'static str {
        match self {
            EquipmentCategory::Console => "Consoles and computers with selectable outputs",
            EquipmentCategory::Switcher => "Input selectors and scalable video switches",
            EquipmentCategory::Display => "CRTs, broadcast monitors and flat panels",
            EquipmentCategory::Adapter => "Passive cables and signal breakouts",
            EquipmentCategory::Upscaler => "Line doublers and scalers",
        }
    }

    /// Node kind created for templates in this category.
    pub const fn node_kind(&self) -> NodeKind {
        match self {
            EquipmentCategory::Console => NodeKind::Console,
            EquipmentCategory::Switcher => NodeKind::Switcher,
            EquipmentCategory::Display => NodeKind::Display,
            EquipmentCategory::Adapter => NodeKind::Adapter,
            EquipmentCategory::Upscaler => NodeKind::Upscaler,
        }
    }

    /// Parses a lowercase category name (`cable` is accepted for adapters).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "console" | "consoles" => Some(EquipmentCategory::Console),
            "switcher" | "switchers" => Some(EquipmentCategory::Switcher),
            "display" | "displays" => Some(EquipmentCategory::Display),
            "adapter" | "adapters" | "cable" | "cables" => Some(EquipmentCategory::Adapter),
            "upscaler" | "upscalers" => Some(EquipmentCategory::Upscaler),
            _ => None,
        }
    }
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Port and capability description of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSpecs {
    /// Input port types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<SignalType>,
    /// Output port types (for consoles, the selectable outputs).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<SignalType>,
    /// Signal formats the device supports, shown as badges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<SignalType>,
    /// Marks a Scalable Video Switch.
    #[serde(default, rename = "isSVS", skip_serializing_if = "core::ops::Not::not")]
    pub is_svs: bool,
    /// Input ceiling for scalable switches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_inputs: Option<usize>,
    /// Output ceiling for scalable switches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_outputs: Option<usize>,
}

/// Describes a piece of equipment in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentTemplate {
    /// Unique identifier (numeric IDs from item lists are accepted).
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Category for organization.
    pub category: EquipmentCategory,
    /// Ports and capabilities.
    #[serde(default)]
    pub specs: TemplateSpecs,
}

impl EquipmentTemplate {
    /// Builds a fixed-port template.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: EquipmentCategory,
        inputs: &[&str],
        outputs: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            specs: TemplateSpecs {
                inputs: inputs.iter().map(|s| SignalType::from(*s)).collect(),
                outputs: outputs.iter().map(|s| SignalType::from(*s)).collect(),
                ..TemplateSpecs::default()
            },
        }
    }

    /// Marks the template as a scalable switch with the given ceilings.
    pub fn scalable(mut self, max_inputs: usize, max_outputs: usize) -> Self {
        self.specs.is_svs = true;
        self.specs.max_inputs = Some(max_inputs);
        self.specs.max_outputs = Some(max_outputs);
        self
    }

    /// Sets the supported signal badges.
    pub fn with_signals(mut self, signals: &[&str]) -> Self {
        self.specs.signals = signals.iter().map(|s| SignalType::from(*s)).collect();
        self
    }

    /// Returns `true` if `query` occurs in the name or ID, ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        self.name.to_lowercase().contains(&query) || self.id.to_lowercase().contains(&query)
    }

    /// Creates the node description for dropping this template on a diagram.
    ///
    /// Scalable switches start with the template's port lists (one `component`
    /// port per empty side), clamped to the declared ceilings.
    pub fn to_new_node(&self) -> NewNode {
        let new = if self.specs.is_svs {
            let limits = PortLimits::from_declared(self.specs.max_inputs, self.specs.max_outputs);
            let mut config = SvsConfig::new(self.specs.inputs.clone(), self.specs.outputs.clone());
            config.set_input_count(config.num_inputs, &limits);
            config.set_output_count(config.num_outputs, &limits);
            NewNode::scalable(self.name.clone(), config, limits)
                .with_kind(self.category.node_kind())
        } else {
            NewNode::fixed(
                self.name.clone(),
                self.category.node_kind(),
                StaticSpec {
                    inputs: self.specs.inputs.clone(),
                    outputs: self.specs.outputs.clone(),
                },
            )
        };
        new.with_template(self.id.clone())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// Registry of all available equipment templates.
///
/// [`new()`](Self::new) registers the built-in catalog;
/// [`from_json()`](Self::from_json) replaces it with an external item list.
#[derive(Debug, Clone)]
pub struct EquipmentRegistry {
    templates: Vec<EquipmentTemplate>,
}

impl Default for EquipmentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EquipmentRegistry {
    /// Create a new registry with the built-in catalog registered.
    pub fn new() -> Self {
        let templates = builtin::catalog();
        Self { templates }
    }

    /// Create a registry with no templates.
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// Load a catalog from a JSON array of items.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let items: Vec<EquipmentTemplate> = serde_json::from_str(json)?;
        let mut registry = Self::empty();
        for item in items {
            registry.register(item)?;
        }
        Ok(registry)
    }

    /// Serialize the catalog as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.templates)?)
    }

    /// Register a template.
    pub fn register(&mut self, template: EquipmentTemplate) -> Result<(), CatalogError> {
        if template.id.trim().is_empty() {
            return Err(CatalogError::EmptyId(template.name));
        }
        if self.get(&template.id).is_some() {
            return Err(CatalogError::DuplicateId(template.id));
        }
        self.templates.push(template);
        Ok(())
    }

    /// Returns all registered templates.
    pub fn all(&self) -> Vec<&EquipmentTemplate> {
        self.templates.iter().collect()
    }

    /// Returns templates in a specific category.
    pub fn in_category(&self, category: EquipmentCategory) -> Vec<&EquipmentTemplate> {
        self.templates
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// Get a template by ID.
    pub fn get(&self, id: &str) -> Option<&EquipmentTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates whose name or ID contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&EquipmentTemplate> {
        self.templates.iter().filter(|t| t.matches(query)).collect()
    }

    /// Create a node description from a template ID.
    ///
    /// Returns `None` if the ID is not found.
    pub fn instantiate(&self, id: &str) -> Option<NewNode> {
        self.get(id).map(EquipmentTemplate::to_new_node)
    }

    /// Returns the number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
