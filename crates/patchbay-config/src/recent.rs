//! Most-recently-used diagram list.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConfigError;
use crate::settings::DEFAULT_RECENT_LIMIT;

/// One remembered diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntry {
    /// Diagram name.
    pub name: String,
    /// Where the diagram was last saved or opened.
    pub path: PathBuf,
    /// Seconds since the UNIX epoch.
    pub last_modified: u64,
}

/// Recently used diagrams, newest first.
///
/// Touching a name that is already listed replaces that entry and moves it to
/// the front; the list never holds more than `limit` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentDiagrams {
    entries: Vec<RecentEntry>,
    limit: usize,
}

impl Default for RecentDiagrams {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

impl RecentDiagrams {
    /// Create an empty list holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Load the list from a JSON file. A missing file yields an empty list.
    pub fn load(path: impl AsRef<Path>, limit: usize) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new(limit));
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let mut entries: Vec<RecentEntry> = serde_json::from_str(&content)?;
        entries.truncate(limit);
        Ok(Self { entries, limit })
    }

    /// Save the list as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
            }
        }

        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Record that `name` was just used, stamped with the current time.
    pub fn touch(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        self.touch_at(name, path, now);
    }

    /// Record that `name` was used at `last_modified`.
    pub fn touch_at(
        &mut self,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        last_modified: u64,
    ) {
        let name = name.into();
        self.entries.retain(|e| e.name != name);
        self.entries.insert(
            0,
            RecentEntry {
                name,
                path: path.into(),
                last_modified,
            },
        );
        self.entries.truncate(self.limit);
    }

    /// Forget `name`. Returns `true` if it was listed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        self.entries.len() != before
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&RecentEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Names, newest first.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[RecentEntry] {
        &self.entries
    }

    /// Maximum number of entries kept.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
