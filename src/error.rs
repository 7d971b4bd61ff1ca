//! Error types for bootstrap operations.
//!
//! This module defines [`BootstrapError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Provider-level failures never surface as errors; the orchestrator
//!   records them as notes and falls through to the next backend
//! - Dependency-level failures use a `BootstrapError` variant and halt the run
//! - Use `anyhow::Error` (via `BootstrapError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for bootstrap operations.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// No provider was available, or every provider failed to install the tool.
    #[error("Missing executable '{executable}' for {dependency}: {hint}")]
    MissingExecutable {
        dependency: String,
        executable: String,
        hint: String,
    },

    /// The tool is present but its version output could not be parsed.
    #[error("Could not determine the installed version of {dependency}; {hint}")]
    UnparsableVersion { dependency: String, hint: String },

    /// An installed version is known to be incompatible.
    #[error("{dependency} {found} is incompatible: {reason}")]
    IncompatibleVersionDetected {
        dependency: String,
        found: String,
        reason: String,
    },

    /// Removal of an incompatible version did not take effect.
    #[error(
        "{dependency} {found} is still installed after removal attempts. \
         Remove it manually, then re-run kmz-bootstrap."
    )]
    RemovalFailed { dependency: String, found: String },

    /// The final version gate rejected the installed tool.
    #[error("{dependency} {found} does not satisfy {rule}. {hint}")]
    ConstraintNotSatisfiedPostInstall {
        dependency: String,
        found: String,
        rule: String,
        hint: String,
    },

    /// Creating the isolated environment or installing its packages failed.
    #[error("Environment setup for {dependency} failed: {message}")]
    EnvironmentSetupFailed { dependency: String, message: String },

    /// The Blender build lacks the Collada exporter.
    #[error("{dependency} cannot export Collada: {message}")]
    ExporterUnavailable { dependency: String, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// External command could not be spawned or exited abnormally.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BootstrapError {
    /// Name of the dependency this error belongs to, if any.
    pub fn dependency(&self) -> Option<&str> {
        match self {
            Self::MissingExecutable { dependency, .. }
            | Self::UnparsableVersion { dependency, .. }
            | Self::IncompatibleVersionDetected { dependency, .. }
            | Self::RemovalFailed { dependency, .. }
            | Self::ConstraintNotSatisfiedPostInstall { dependency, .. }
            | Self::EnvironmentSetupFailed { dependency, .. }
            | Self::ExporterUnavailable { dependency, .. } => Some(dependency),
            _ => None,
        }
    }

    /// The manual fix for a dependency failure, shown as a hint.
    ///
    /// `MissingExecutable` returns `None`: its hint is printed when the
    /// tool is first found missing.
    pub fn manual_step(&self) -> Option<String> {
        match self {
            Self::RemovalFailed { dependency, found } => Some(format!(
                "Remove {} {} manually (for example `brew uninstall --cask blender` \
                 or `sudo apt-get remove blender`), then re-run `kmz-bootstrap`.",
                dependency, found
            )),
            Self::UnparsableVersion { hint, .. }
            | Self::ConstraintNotSatisfiedPostInstall { hint, .. } => Some(hint.clone()),
            Self::IncompatibleVersionDetected { dependency, .. } => {
                Some(format!("Remove {} manually, then re-run `kmz-bootstrap`.", dependency))
            }
            Self::EnvironmentSetupFailed { message, .. } => Some(message.clone()),
            Self::ExporterUnavailable { dependency, .. } => Some(format!(
                "Install a {} release from 3.6 up to 4.x that ships the Collada exporter.",
                dependency
            )),
            _ => None,
        }
    }
}

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;
