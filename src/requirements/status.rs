//! Probe and outcome types.
//!
//! A probe produces a [`ProbeStatus`]; resolving a dependency end to end
//! produces a [`DependencyResult`] carrying its [`RunOutcome`].

use std::fmt;
use std::path::PathBuf;

use super::version::Version;

/// What a probe found for one executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The executable resolves. `version` is `None` when unknown or not asked for.
    Present {
        path: PathBuf,
        version: Option<Version>,
    },
    /// The executable is not on the search path.
    Missing,
}

impl ProbeStatus {
    pub fn is_present(&self) -> bool {
        matches!(self, ProbeStatus::Present { .. })
    }

    /// Detected version, if present and known.
    pub fn version(&self) -> Option<Version> {
        match self {
            ProbeStatus::Present { version, .. } => *version,
            ProbeStatus::Missing => None,
        }
    }
}

/// How a dependency ended up in its final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Already present and acceptable; nothing was installed.
    AlreadySatisfied,
    /// An incompatible install was removed and a compatible one installed.
    RemediatedAndInstalled,
    /// Was missing and got installed.
    InstalledFresh,
    /// Could not be brought into an acceptable state.
    Failed,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, RunOutcome::Failed)
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RunOutcome::AlreadySatisfied => "already installed",
            RunOutcome::RemediatedAndInstalled => "replaced incompatible install",
            RunOutcome::InstalledFresh => "installed",
            RunOutcome::Failed => "failed",
        };
        f.write_str(text)
    }
}

/// Final record for one dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyResult {
    /// Display name of the dependency.
    pub dependency: String,
    pub outcome: RunOutcome,
    /// Version confirmed at the end, when one was read.
    pub version: Option<Version>,
    /// Package that satisfied the install, when one ran.
    pub installed_package: Option<String>,
}

impl DependencyResult {
    pub fn failed(dependency: &str) -> Self {
        Self {
            dependency: dependency.to_string(),
            outcome: RunOutcome::Failed,
            version: None,
            installed_package: None,
        }
    }

    /// One-line description for the user.
    pub fn describe(&self) -> String {
        let mut line = format!("{}: {}", self.dependency, self.outcome);
        if let Some(pkg) = &self.installed_package {
            line.push_str(&format!(" via {}", pkg));
        }
        if let Some(v) = self.version {
            line.push_str(&format!(" ({})", v));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_status_version() {
        let present = ProbeStatus::Present {
            path: PathBuf::from("/usr/bin/blender"),
            version: Some(Version::new(4, 2)),
        };
        assert!(present.is_present());
        assert_eq!(present.version(), Some(Version::new(4, 2)));
        assert!(!ProbeStatus::Missing.is_present());
        assert_eq!(ProbeStatus::Missing.version(), None);
    }

    #[test]
    fn only_failed_is_unsuccessful() {
        assert!(RunOutcome::AlreadySatisfied.is_success());
        assert!(RunOutcome::RemediatedAndInstalled.is_success());
        assert!(RunOutcome::InstalledFresh.is_success());
        assert!(!RunOutcome::Failed.is_success());
    }

    #[test]
    fn describe_includes_package_and_version() {
        let result = DependencyResult {
            dependency: "Blender".to_string(),
            outcome: RunOutcome::InstalledFresh,
            version: Some(Version::new(4, 5)),
            installed_package: Some("blender@4.5".to_string()),
        };
        assert_eq!(result.describe(), "Blender: installed via blender@4.5 (4.5)");
    }

    #[test]
    fn describe_failed() {
        assert_eq!(DependencyResult::failed("Python 3").describe(), "Python 3: failed");
    }
}
