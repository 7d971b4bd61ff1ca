//! Configuration loading and parsing.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use kmz_bootstrap::config::{load_config, CONFIG_FILE_NAME};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(CONFIG_FILE_NAME), "blender:\n  verify_exporter: true\n").unwrap();
//!
//! let config = load_config(temp.path()).unwrap();
//! assert!(config.blender.verify_exporter);
//! assert_eq!(config.tiles_tools.package, "3d-tiles-tools");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_project_root, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{BlenderConfig, BootstrapConfig, OutputSetting, PythonConfig, TilesToolsConfig};
