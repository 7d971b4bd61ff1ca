//! Configuration file discovery and loading.

use crate::config::schema::BootstrapConfig;
use crate::error::{BootstrapError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional config file at the project root.
pub const CONFIG_FILE_NAME: &str = ".kmz-bootstrap.yml";

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. A `.kmz-bootstrap.yml` file (primary indicator)
/// 2. A `.git` directory (fallback)
///
/// # Returns
///
/// The path to the project root, or None if not found.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<BootstrapConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BootstrapError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BootstrapError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a config. Empty content yields the defaults.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<BootstrapConfig> {
    if content.trim().is_empty() {
        return Ok(BootstrapConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| BootstrapError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the project config, falling back to defaults when there is none.
pub fn load_config(project_root: &Path) -> Result<BootstrapConfig> {
    let path = project_root.join(CONFIG_FILE_NAME);
    match load_config_file(&path) {
        Err(BootstrapError::ConfigNotFound { .. }) => {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, project_root.display());
            Ok(BootstrapConfig::default())
        }
        other => other,
    }
}
