//! npm global installs.

use crate::error::Result;
use crate::host::{run_checked, Host};
use crate::shell::{CommandOptions, CommandSpec};

use super::{BackendKind, Provider};

#[derive(Debug, Clone)]
pub struct Npm {
    options: CommandOptions,
}

impl Npm {
    pub fn new(options: CommandOptions) -> Self {
        Self { options }
    }
}

impl Provider for Npm {
    fn kind(&self) -> BackendKind {
        BackendKind::Npm
    }

    fn install(&self, host: &dyn Host, package: &str) -> Result<()> {
        let spec = CommandSpec::new("npm").args(["install", "-g", package]);
        run_checked(host, &spec, &self.options)?;
        Ok(())
    }

    fn uninstall(&self, host: &dyn Host, package: &str) -> Result<()> {
        let spec = CommandSpec::new("npm").args(["uninstall", "-g", package]);
        run_checked(host, &spec, &self.options)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MockHost, MockResponse};

    #[test]
    fn installs_globally() {
        let host = MockHost::new().with_program("npm", None).on(
            "npm install -g 3d-tiles-tools",
            MockResponse::success().installs("3d-tiles-tools", None),
        );

        Npm::new(CommandOptions::captured())
            .install(&host, "3d-tiles-tools")
            .unwrap();
        assert!(host.resolve("3d-tiles-tools").is_some());
    }

    #[test]
    fn unavailable_without_node() {
        assert!(!Npm::new(CommandOptions::captured()).is_available(&MockHost::new()));
    }
}
