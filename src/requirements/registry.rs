//! The toolchain definition.
//!
//! Defines which tools the converter needs, how to check each one, and
//! how to install (and for Blender, remove) them. The list is built once
//! from configuration and never changes during a run.

use std::path::{Path, PathBuf};

use crate::config::BootstrapConfig;
use crate::providers::{BackendKind, ProviderAttempt};

use super::constraint::VersionRule;
use super::version::VersionProbe;

/// Isolated Python environment to create after the runtime is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSetup {
    /// Environment directory.
    pub venv: PathBuf,
    /// Flat requirements file installed into the environment.
    pub requirements: PathBuf,
}

/// One external tool the converter needs.
#[derive(Debug, Clone)]
pub struct Dependency {
    /// Human-facing name (e.g., "Blender").
    pub name: String,
    /// Executable probed on the search path.
    pub command: String,
    /// How to read the tool's version, if it is read at all.
    pub version_probe: Option<VersionProbe>,
    /// Acceptance rule; only the constrained dependency has one.
    pub rule: Option<VersionRule>,
    /// Install fallback chain, tried in order.
    pub attempts: Vec<ProviderAttempt>,
    /// Removal targets used when an incompatible version is installed.
    pub removals: Vec<ProviderAttempt>,
    /// One-line manual install suggestion.
    pub hint: String,
    pub setup: Option<EnvironmentSetup>,
    /// Run the Collada exporter check after the version gate.
    pub verify_exporter: bool,
}

impl Dependency {
    /// Whether the dependency is subject to a version rule.
    pub fn is_constrained(&self) -> bool {
        self.rule.is_some()
    }
}

/// Build the toolchain in resolution order: Python, 3D Tiles tools, Blender.
///
/// Relative paths in the configuration are resolved against `project_root`.
pub fn toolchain(config: &BootstrapConfig, project_root: &Path) -> Vec<Dependency> {
    vec![
        python(config, project_root),
        tiles_tools(config),
        blender(config),
    ]
}

fn python(config: &BootstrapConfig, project_root: &Path) -> Dependency {
    Dependency {
        name: "Python 3".to_string(),
        command: "python3".to_string(),
        version_probe: Some(VersionProbe::standard()),
        rule: None,
        attempts: vec![
            ProviderAttempt::single(BackendKind::HomebrewFormula, "python"),
            ProviderAttempt::single(BackendKind::Apt, "python3"),
        ],
        removals: Vec::new(),
        hint: "Install Python 3 from https://www.python.org/downloads/ \
               (or `brew install python` / `sudo apt-get install python3 python3-venv`)"
            .to_string(),
        setup: Some(EnvironmentSetup {
            venv: project_root.join(&config.python.venv),
            requirements: project_root.join(&config.python.requirements),
        }),
        verify_exporter: false,
    }
}

fn tiles_tools(config: &BootstrapConfig) -> Dependency {
    let package = &config.tiles_tools.package;
    Dependency {
        name: "3D Tiles tools".to_string(),
        command: "3d-tiles-tools".to_string(),
        version_probe: None,
        rule: None,
        attempts: vec![ProviderAttempt::single(BackendKind::Npm, package)],
        removals: Vec::new(),
        hint: format!(
            "Install Node.js from https://nodejs.org/, then run `npm install -g {}`",
            package
        ),
        setup: None,
        verify_exporter: false,
    }
}

fn blender(config: &BootstrapConfig) -> Dependency {
    let blender = &config.blender;

    // Removal covers the unversioned cask too, since that is what a plain
    // `brew install --cask blender` leaves behind.
    let mut cask_removals = vec!["blender".to_string()];
    for cask in &blender.casks {
        if !cask_removals.contains(cask) {
            cask_removals.push(cask.clone());
        }
    }

    Dependency {
        name: "Blender".to_string(),
        command: "blender".to_string(),
        version_probe: Some(VersionProbe::standard()),
        rule: Some(VersionRule::blender()),
        attempts: vec![
            ProviderAttempt::new(BackendKind::HomebrewCask, blender.casks.clone()),
            ProviderAttempt::single(BackendKind::Apt, &blender.apt_package),
        ],
        removals: vec![
            ProviderAttempt::new(BackendKind::HomebrewCask, cask_removals),
            ProviderAttempt::single(BackendKind::Apt, &blender.apt_package),
        ],
        hint: "Install Blender 3.6 LTS or 4.x from https://www.blender.org/download/ \
               (5.x dropped the Collada exporter)"
            .to_string(),
        setup: None,
        verify_exporter: blender.verify_exporter,
    }
}
