//! Editor settings stored as TOML in the user config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use patchbay_core::NewNode;
use patchbay_registry::EquipmentRegistry;

use crate::error::ConfigError;
use crate::paths;

/// Default number of recent diagrams remembered.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Editor settings.
///
/// # TOML Format
///
/// ```toml
/// recent_limit = 20
/// catalog_path = "/home/me/catalog.json"
/// diagrams_dir = "/home/me/racks"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Number of recent diagrams remembered.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// External JSON catalog replacing the built-in templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,

    /// Override of the user diagrams directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagrams_dir: Option<PathBuf>,
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
            catalog_path: None,
            diagrams_dir: None,
        }
    }
}

impl EditorSettings {
    /// Load settings from a TOML file. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load settings from the default location.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(paths::settings_path())
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save settings to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
            }
        }

        std::fs::write(path, self.to_toml()?).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Directory where diagrams are saved and looked up by name.
    pub fn diagrams_dir(&self) -> PathBuf {
        self.diagrams_dir
            .clone()
            .unwrap_or_else(paths::user_diagrams_dir)
    }

    /// Find a diagram by path or by name in [`diagrams_dir`](Self::diagrams_dir).
    pub fn find_diagram(&self, name: &str) -> Result<PathBuf, ConfigError> {
        paths::find_diagram_in(name, &self.diagrams_dir())
            .ok_or_else(|| ConfigError::DiagramNotFound(name.to_string()))
    }

    /// Build the equipment registry: the external catalog if configured,
    /// otherwise the built-in one.
    pub fn load_registry(&self) -> Result<EquipmentRegistry, ConfigError> {
        let Some(path) = &self.catalog_path else {
            return Ok(EquipmentRegistry::new());
        };
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let registry = EquipmentRegistry::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            templates = registry.len(),
            "external catalog loaded"
        );
        Ok(registry)
    }
}

/// Create a node description from a template ID, failing on unknown IDs.
pub fn instantiate(
    registry: &EquipmentRegistry,
    template_id: &str,
) -> Result<NewNode, ConfigError> {
    registry
        .instantiate(template_id)
        .ok_or_else(|| ConfigError::UnknownTemplate(template_id.to_string()))
}
