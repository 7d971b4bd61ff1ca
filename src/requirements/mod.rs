//! Requirement detection and version gating.
//!
//! This module answers "is the tool there, and is it the right one?"
//! for each dependency of the converter toolchain.
//!
//! # Modules
//!
//! - [`version`] - Version extraction from tool banners
//! - [`constraint`] - Three-tier version acceptance rule
//! - [`probe`] - Executable discovery on the search path
//! - [`registry`] - The fixed toolchain definition
//! - [`remediator`] - Removal of incompatible installs
//! - [`status`] - Probe and outcome types

pub mod constraint;
pub mod probe;
pub mod registry;
pub mod remediator;
pub mod status;
pub mod version;

pub use constraint::{Verdict, VersionRule};
pub use registry::{toolchain, Dependency, EnvironmentSetup};
pub use remediator::{Remediation, RemediationState, Remediator};
pub use status::{DependencyResult, ProbeStatus, RunOutcome};
pub use version::{parse_version_output, probe_version, Version, VersionProbe};
