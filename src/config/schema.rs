//! Configuration schema for `.kmz-bootstrap.yml`.
//!
//! Every field is optional; an empty or absent file yields the defaults.
//! Unknown keys are rejected so that typos surface as parse errors.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Output verbosity: verbose, normal, quiet, silent
    pub output: OutputSetting,

    /// Python virtual environment settings
    pub python: PythonConfig,

    /// 3D Tiles tools settings
    pub tiles_tools: TilesToolsConfig,

    /// Blender settings
    pub blender: BlenderConfig,
}

/// Output verbosity as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSetting {
    Verbose,
    #[default]
    Normal,
    Quiet,
    Silent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PythonConfig {
    /// Virtual environment directory, relative to the project root
    pub venv: PathBuf,

    /// Requirements file, relative to the project root
    pub requirements: PathBuf,
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            venv: PathBuf::from(".venv"),
            requirements: PathBuf::from("requirements.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TilesToolsConfig {
    /// npm package spec installed globally
    pub package: String,
}

impl Default for TilesToolsConfig {
    fn default() -> Self {
        Self {
            package: "3d-tiles-tools".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlenderConfig {
    /// Homebrew cask candidates, tried in order
    pub casks: Vec<String>,

    /// apt package name
    pub apt_package: String,

    /// Ask Blender whether the Collada exporter is available
    pub verify_exporter: bool,
}

impl Default for BlenderConfig {
    fn default() -> Self {
        Self {
            casks: vec![
                "blender@4.5".to_string(),
                "blender@4.2".to_string(),
                "blender@3.6".to_string(),
            ],
            apt_package: "blender".to_string(),
            verify_exporter: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config: BootstrapConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, BootstrapConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = "blender:\n  verify_exporter: true\n";
        let config: BootstrapConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.blender.verify_exporter);
        assert_eq!(config.blender.casks.len(), 3);
        assert_eq!(config.python, PythonConfig::default());
    }

    #[test]
    fn full_document_parses() {
        let yaml = r#"
output: verbose
python:
  venv: env
  requirements: deps/requirements.txt
tiles_tools:
  package: 3d-tiles-tools@0.4.4
blender:
  casks: [blender@4.2]
  apt_package: blender
  verify_exporter: true
"#;
        let config: BootstrapConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.output, OutputSetting::Verbose);
        assert_eq!(config.python.venv, PathBuf::from("env"));
        assert_eq!(config.tiles_tools.package, "3d-tiles-tools@0.4.4");
        assert_eq!(config.blender.casks, vec!["blender@4.2"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<BootstrapConfig, _> = serde_yaml::from_str("blendr: {}\n");
        assert!(result.is_err());
        let result: Result<BootstrapConfig, _> =
            serde_yaml::from_str("blender:\n  cask: blender\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_output_mode_is_rejected() {
        let result: Result<BootstrapConfig, _> = serde_yaml::from_str("output: loud\n");
        assert!(result.is_err());
    }
}
