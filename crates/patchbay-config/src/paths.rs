//! Platform-specific paths for diagrams and configuration.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/patchbay/` (Linux),
//!   `~/Library/Application Support/patchbay/` (macOS), `%APPDATA%\patchbay\` (Windows)
//! - **User diagrams**: `<user config>/diagrams/`
//! - **Settings**: `<user config>/settings.toml`
//! - **Recent list**: `<user config>/recent.json`
//!
//! # Example
//!
//! ```rust,no_run
//! use patchbay_config::paths;
//!
//! let diagrams_dir = paths::user_diagrams_dir();
//! println!("User diagrams: {:?}", diagrams_dir);
//!
//! // Direct path first, then <name>.json in the diagrams directory
//! if let Some(path) = paths::find_diagram("living_room") {
//!     println!("Found diagram at: {:?}", path);
//! }
//! ```

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "patchbay";

/// Subdirectory name for diagrams.
const DIAGRAMS_SUBDIR: &str = "diagrams";

/// Diagram file extension.
pub const DIAGRAM_EXTENSION: &str = "json";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific diagrams directory.
pub fn user_diagrams_dir() -> PathBuf {
    user_config_dir().join(DIAGRAMS_SUBDIR)
}

/// Path of the editor settings file.
pub fn settings_path() -> PathBuf {
    user_config_dir().join("settings.toml")
}

/// Path of the recently used diagrams list.
pub fn recent_path() -> PathBuf {
    user_config_dir().join("recent.json")
}

/// Find a diagram file by name in the user diagrams directory.
///
/// The name can be a path to an existing file, or a diagram name with or
/// without the `.json` extension.
pub fn find_diagram(name: &str) -> Option<PathBuf> {
    find_diagram_in(name, &user_diagrams_dir())
}

/// Find a diagram file by name, searching `dir` after the direct path.
pub fn find_diagram_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let candidate = dir.join(diagram_file_name(name));
    candidate.is_file().then_some(candidate)
}

/// File name for a diagram called `name` (adds `.json` if missing).
pub fn diagram_file_name(name: &str) -> String {
    if has_diagram_extension(Path::new(name)) {
        name.to_string()
    } else {
        format!("{name}.{DIAGRAM_EXTENSION}")
    }
}

/// Ensure the user config directory exists.
pub fn ensure_user_config_dir() -> Result<PathBuf, crate::ConfigError> {
    ensure_dir(user_config_dir())
}

/// Ensure the user diagrams directory exists.
pub fn ensure_user_diagrams_dir() -> Result<PathBuf, crate::ConfigError> {
    ensure_dir(user_diagrams_dir())
}

fn ensure_dir(dir: PathBuf) -> Result<PathBuf, crate::ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// List all diagram files in the user diagrams directory.
pub fn list_user_diagrams() -> Vec<PathBuf> {
    list_diagrams_in_dir(&user_diagrams_dir())
}

/// List diagram files in `dir`, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_diagrams_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut diagrams: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_diagram_extension(path))
        .collect();
    diagrams.sort();
    diagrams
}

fn has_diagram_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DIAGRAM_EXTENSION))
}

/// Get the diagram name from a file path (the file stem).
///
/// ```rust
/// use patchbay_config::paths::diagram_name_from_path;
/// use std::path::Path;
///
/// let name = diagram_name_from_path(Path::new("/path/to/den.json"));
/// assert_eq!(name, Some("den".to_string()));
/// ```
pub fn diagram_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_user_dirs() {
        assert!(user_config_dir().to_string_lossy().contains("patchbay"));
        assert!(user_diagrams_dir().ends_with("diagrams"));
        assert!(settings_path().ends_with("settings.toml"));
        assert!(recent_path().ends_with("recent.json"));
    }

    #[test]
    fn test_diagram_file_name() {
        assert_eq!(diagram_file_name("den"), "den.json");
        assert_eq!(diagram_file_name("den.json"), "den.json");
        assert_eq!(diagram_file_name("den.JSON"), "den.JSON");
    }

    #[test]
    fn test_find_diagram_by_path_and_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("den.json");
        fs::write(&path, "{}").unwrap();

        let direct = find_diagram_in(path.to_str().unwrap(), Path::new("/nowhere"));
        assert_eq!(direct, Some(path.clone()));
        assert_eq!(find_diagram_in("den", temp_dir.path()), Some(path.clone()));
        assert_eq!(find_diagram_in("den.json", temp_dir.path()), Some(path));
        assert!(find_diagram_in("attic", temp_dir.path()).is_none());
    }

    #[test]
    fn test_find_diagram_not_found() {
        assert!(find_diagram("nonexistent_diagram_12345").is_none());
    }

    #[test]
    fn test_list_diagrams_in_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.json"), "").unwrap();
        fs::write(temp_dir.path().join("a.json"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join("dir.json")).unwrap();

        let diagrams = list_diagrams_in_dir(temp_dir.path());
        let names: Vec<_> = diagrams
            .iter()
            .filter_map(|p| diagram_name_from_path(p))
            .collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_list_diagrams_nonexistent_dir() {
        assert!(list_diagrams_in_dir(Path::new("/nonexistent/path/12345")).is_empty());
    }

    #[test]
    fn test_diagram_name_from_path() {
        assert_eq!(
            diagram_name_from_path(Path::new("simple.json")),
            Some("simple".to_string())
        );
    }
}
