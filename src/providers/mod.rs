//! Package manager backends.
//!
//! Each backend wraps one package manager behind the [`Provider`] trait.
//! A dependency lists [`ProviderAttempt`]s in priority order; the
//! orchestrator looks each backend up in the [`ProviderSet`] and stops at
//! the first attempt that installs something.
//!
//! # Modules
//!
//! - [`homebrew`] - Homebrew formulae and casks
//! - [`apt`] - Debian/Ubuntu apt-get
//! - [`npm`] - npm global installs

pub mod apt;
pub mod homebrew;
pub mod npm;

pub use apt::Apt;
pub use homebrew::Homebrew;
pub use npm::Npm;

use std::fmt;

use crate::error::Result;
use crate::host::Host;
use crate::shell::CommandOptions;

/// Identifies a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    HomebrewFormula,
    HomebrewCask,
    Apt,
    Npm,
}

impl BackendKind {
    /// Binary that must be on the search path for the backend to be usable.
    pub fn manager(&self) -> &'static str {
        match self {
            BackendKind::HomebrewFormula | BackendKind::HomebrewCask => "brew",
            BackendKind::Apt => "apt-get",
            BackendKind::Npm => "npm",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BackendKind::HomebrewFormula => "Homebrew",
            BackendKind::HomebrewCask => "Homebrew cask",
            BackendKind::Apt => "apt",
            BackendKind::Npm => "npm",
        };
        f.write_str(label)
    }
}

/// One step of a fallback chain: a backend and the packages to try on it.
///
/// For casks `packages` is an ordered candidate list; other backends get
/// a single package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAttempt {
    pub backend: BackendKind,
    pub packages: Vec<String>,
}

impl ProviderAttempt {
    pub fn new(backend: BackendKind, packages: Vec<String>) -> Self {
        Self { backend, packages }
    }

    pub fn single(backend: BackendKind, package: impl Into<String>) -> Self {
        Self::new(backend, vec![package.into()])
    }
}

/// A package manager the bootstrap can drive.
pub trait Provider {
    fn kind(&self) -> BackendKind;

    /// Whether the manager binary is on the search path.
    fn is_available(&self, host: &dyn Host) -> bool {
        host.resolve(self.kind().manager()).is_some()
    }

    /// Whether the package exists in the manager's catalog.
    ///
    /// Backends without a cheap catalog query report every package as existing
    /// and let the install itself fail.
    fn exists(&self, _host: &dyn Host, _package: &str) -> bool {
        true
    }

    fn install(&self, host: &dyn Host, package: &str) -> Result<()>;

    fn uninstall(&self, host: &dyn Host, package: &str) -> Result<()>;
}

/// Result of running one [`ProviderAttempt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    /// The named package installed.
    Installed(String),
    /// The manager binary is not on the search path.
    Unavailable,
    /// Every package was skipped or failed; notes say why.
    Exhausted(Vec<String>),
}

/// Try the attempt's packages in order, skipping those the catalog does not
/// know, and stop at the first that installs.
pub fn run_attempt(
    provider: &dyn Provider,
    host: &dyn Host,
    attempt: &ProviderAttempt,
) -> AttemptResult {
    if !provider.is_available(host) {
        tracing::debug!("{} not found, skipping", attempt.backend.manager());
        return AttemptResult::Unavailable;
    }

    let mut notes = Vec::new();
    for package in &attempt.packages {
        if !provider.exists(host, package) {
            tracing::debug!("{} has no package {}", attempt.backend, package);
            notes.push(format!("{}: {} not in catalog", attempt.backend, package));
            continue;
        }

        match provider.install(host, package) {
            Ok(()) => return AttemptResult::Installed(package.clone()),
            Err(e) => {
                tracing::warn!("{} install of {} failed: {}", attempt.backend, package, e);
                notes.push(format!("{}: installing {} failed ({})", attempt.backend, package, e));
            }
        }
    }
    AttemptResult::Exhausted(notes)
}

/// The fixed set of backends, looked up by kind.
pub struct ProviderSet {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderSet {
    /// Homebrew (formula and cask), apt and npm.
    ///
    /// With `capture` false, installer output streams to the terminal.
    pub fn standard(capture: bool) -> Self {
        let options = CommandOptions {
            capture,
            ..CommandOptions::default()
        };
        Self::from_providers(vec![
            Box::new(Homebrew::formula(options.clone())),
            Box::new(Homebrew::cask(options.clone())),
            Box::new(Apt::new(options.clone())),
            Box::new(Npm::new(options)),
        ])
    }

    pub fn from_providers(providers: Vec<Box<dyn Provider>>) -> Self {
        Self { providers }
    }

    pub fn get(&self, kind: BackendKind) -> Option<&dyn Provider> {
        self.providers
            .iter()
            .find(|p| p.kind() == kind)
            .map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
