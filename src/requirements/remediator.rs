//! Removal of incompatible installs.
//!
//! When the constrained dependency is installed at a version from the
//! rejected newer line, upgrading or downgrading in place is not reliable
//! across package managers. The remediator instead uninstalls it through
//! every available backend and re-probes, so the normal install flow can
//! put a compatible version in its place.

use crate::error::{BootstrapError, Result};
use crate::host::Host;
use crate::providers::ProviderSet;
use crate::ui::UserInterface;

use super::probe::probe_command;
use super::registry::Dependency;
use super::status::ProbeStatus;
use super::version::Version;

/// Where the constrained dependency stands before normal flow.
///
/// A failed removal is not a state here: [`Remediator::remediate`] returns
/// [`BootstrapError::RemovalFailed`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationState {
    NotInstalled,
    /// Installed and not in the rejected line. The version may still be
    /// unknown or too old; the final gate decides those.
    InstalledCompatible(Option<Version>),
    InstalledIncompatible(Version),
}

/// Outcome of a remediation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remediation {
    /// State after any removal.
    pub state: RemediationState,
    /// Whether an incompatible install was removed.
    pub removed: bool,
}

/// Detects and removes incompatible installs of a constrained dependency.
pub struct Remediator<'a> {
    host: &'a dyn Host,
    providers: &'a ProviderSet,
}

impl<'a> Remediator<'a> {
    pub fn new(host: &'a dyn Host, providers: &'a ProviderSet) -> Self {
        Self { host, providers }
    }

    /// Classify the current install without changing anything.
    pub fn assess(&self, dependency: &Dependency) -> RemediationState {
        let version = match probe_command(self.host, dependency) {
            ProbeStatus::Missing => return RemediationState::NotInstalled,
            ProbeStatus::Present { version, .. } => version,
        };

        match (dependency.rule, version) {
            (Some(rule), Some(v)) if rule.is_too_new(v) => {
                RemediationState::InstalledIncompatible(v)
            }
            _ => RemediationState::InstalledCompatible(version),
        }
    }

    /// Remove an incompatible install if there is one.
    ///
    /// Every removal target whose backend is available is tried; individual
    /// failures are logged and skipped. If the re-probe still shows the
    /// rejected line, the result is [`BootstrapError::RemovalFailed`].
    pub fn remediate(
        &self,
        dependency: &Dependency,
        ui: &mut dyn UserInterface,
    ) -> Result<Remediation> {
        let found = match self.assess(dependency) {
            RemediationState::InstalledIncompatible(v) => v,
            state => {
                return Ok(Remediation {
                    state,
                    removed: false,
                })
            }
        };

        let detected = BootstrapError::IncompatibleVersionDetected {
            dependency: dependency.name.clone(),
            found: found.to_string(),
            reason: dependency
                .rule
                .map(|rule| format!("supported range is {}", rule))
                .unwrap_or_default(),
        };
        ui.warning(&detected.to_string());

        self.remove_everywhere(dependency, ui);

        match self.assess(dependency) {
            RemediationState::InstalledIncompatible(still) => {
                Err(BootstrapError::RemovalFailed {
                    dependency: dependency.name.clone(),
                    found: still.to_string(),
                })
            }
            state => {
                ui.success(&format!("Removed {} {}", dependency.name, found));
                Ok(Remediation {
                    state,
                    removed: true,
                })
            }
        }
    }

    fn remove_everywhere(&self, dependency: &Dependency, ui: &mut dyn UserInterface) {
        for target in &dependency.removals {
            let Some(provider) = self.providers.get(target.backend) else {
                tracing::debug!("No provider registered for {:?}", target.backend);
                continue;
            };
            if !provider.is_available(self.host) {
                tracing::debug!("{} not available, skipping removal", target.backend);
                continue;
            }

            for package in &target.packages {
                let mut spinner =
                    ui.start_spinner(&format!("Removing {} via {}", package, target.backend));
                match provider.uninstall(self.host, package) {
                    Ok(()) => spinner.finish_success(&format!("Removed {}", package)),
                    Err(e) => {
                        tracing::warn!("Removing {} via {} failed: {}", package, target.backend, e);
                        spinner.finish_skipped(&format!("{} not removed", package));
                    }
                }
            }
        }
    }
}
