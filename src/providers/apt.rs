//! apt backend for Debian-family systems.
//!
//! Every apt-get call is elevated; `sudo` is prepended unless the process
//! already runs as root. The package index is refreshed before each install.

use crate::error::Result;
use crate::host::{run_checked, Host};
use crate::shell::{CommandOptions, CommandSpec};

use super::{BackendKind, Provider};

#[derive(Debug, Clone)]
pub struct Apt {
    options: CommandOptions,
}

impl Apt {
    pub fn new(options: CommandOptions) -> Self {
        Self { options }
    }
}

impl Provider for Apt {
    fn kind(&self) -> BackendKind {
        BackendKind::Apt
    }

    fn install(&self, host: &dyn Host, package: &str) -> Result<()> {
        let update = CommandSpec::new("apt-get").arg("update").elevated();
        run_checked(host, &update, &self.options)?;

        let install = CommandSpec::new("apt-get")
            .args(["install", "-y", package])
            .elevated();
        run_checked(host, &install, &self.options)?;
        Ok(())
    }

    fn uninstall(&self, host: &dyn Host, package: &str) -> Result<()> {
        let remove = CommandSpec::new("apt-get")
            .args(["remove", "-y", package])
            .elevated();
        run_checked(host, &remove, &self.options)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MockHost, MockResponse};

    #[test]
    fn install_refreshes_index_first() {
        let host = MockHost::new()
            .with_program("apt-get", None)
            .on("apt-get update", MockResponse::success())
            .on(
                "apt-get install -y blender",
                MockResponse::success().installs("blender", Some("Blender 4.0.2")),
            );

        Apt::new(CommandOptions::captured())
            .install(&host, "blender")
            .unwrap();
        assert_eq!(
            host.calls(),
            vec![
                "apt-get update".to_string(),
                "apt-get install -y blender".to_string()
            ]
        );
    }

    #[test]
    fn failed_update_stops_install() {
        let host = MockHost::new()
            .with_program("apt-get", None)
            .on("apt-get update", MockResponse::failure(100));

        assert!(Apt::new(CommandOptions::captured())
            .install(&host, "python3")
            .is_err());
        assert_eq!(host.calls(), vec!["apt-get update".to_string()]);
    }

    #[test]
    fn availability_follows_apt_get() {
        let apt = Apt::new(CommandOptions::captured());
        assert!(!apt.is_available(&MockHost::new()));
        assert!(apt.is_available(&MockHost::new().with_program("apt-get", None)));
    }
}
