//! Homebrew backend.
//!
//! Formulae install with `brew install <formula>`. Casks are checked with
//! `brew info --cask` first so that versioned candidates missing from the
//! tap are skipped without attempting an install.

use crate::error::Result;
use crate::host::{run_checked, Host};
use crate::shell::{CommandOptions, CommandSpec};

use super::{BackendKind, Provider};

/// Homebrew, in formula or cask mode.
#[derive(Debug, Clone)]
pub struct Homebrew {
    cask: bool,
    options: CommandOptions,
}

impl Homebrew {
    pub fn formula(options: CommandOptions) -> Self {
        Self {
            cask: false,
            options,
        }
    }

    pub fn cask(options: CommandOptions) -> Self {
        Self {
            cask: true,
            options,
        }
    }

    fn command(&self, verb: &str, package: &str) -> CommandSpec {
        let spec = CommandSpec::new("brew").arg(verb);
        let spec = if self.cask { spec.arg("--cask") } else { spec };
        spec.arg(package)
    }
}

impl Provider for Homebrew {
    fn kind(&self) -> BackendKind {
        if self.cask {
            BackendKind::HomebrewCask
        } else {
            BackendKind::HomebrewFormula
        }
    }

    fn exists(&self, host: &dyn Host, package: &str) -> bool {
        if !self.cask {
            return true;
        }
        let spec = self.command("info", package);
        match host.run(&spec, &CommandOptions::captured()) {
            Ok(result) => result.success,
            Err(e) => {
                tracing::debug!("{} could not run: {}", spec, e);
                false
            }
        }
    }

    fn install(&self, host: &dyn Host, package: &str) -> Result<()> {
        run_checked(host, &self.command("install", package), &self.options)?;
        Ok(())
    }

    fn uninstall(&self, host: &dyn Host, package: &str) -> Result<()> {
        run_checked(host, &self.command("uninstall", package), &self.options)?;
        Ok(())
    }
}
