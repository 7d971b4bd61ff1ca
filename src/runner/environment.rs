//! Python virtual environment setup.
//!
//! Runs after `python3` is confirmed. Creates the environment if its
//! interpreter is missing, then installs the requirements file into it.
//! A stamp file inside the environment records the last successful
//! install; pip is skipped while the stamp is newer than the requirements
//! file and the environment was not just created.

use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result};
use crate::host::{run_checked, Host};
use crate::requirements::{Dependency, EnvironmentSetup};
use crate::shell::{CommandOptions, CommandSpec, Platform};
use crate::ui::UserInterface;

/// Written into the environment after a successful `pip install`.
pub const REQUIREMENTS_STAMP: &str = ".kmz-bootstrap-requirements";

/// Interpreter inside a virtual environment for the current platform.
pub fn venv_python(venv: &Path) -> PathBuf {
    let platform = Platform::current();
    venv.join(platform.venv_bin_dir()).join(platform.venv_python())
}

/// Make sure the environment exists and its requirements are installed.
pub fn ensure_environment(
    host: &dyn Host,
    dependency: &Dependency,
    setup: &EnvironmentSetup,
    options: &CommandOptions,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let python = venv_python(&setup.venv);

    let created = if host.path_exists(&python) {
        tracing::debug!("Virtual environment present at {}", setup.venv.display());
        false
    } else {
        create_venv(host, dependency, setup, &python, options, ui)?;
        true
    };

    if !host.path_exists(&setup.requirements) {
        ui.warning(&format!(
            "No requirements file at {}; skipping package install",
            setup.requirements.display()
        ));
        return Ok(());
    }

    let stamp = setup.venv.join(REQUIREMENTS_STAMP);
    if !created && requirements_installed(host, &stamp, &setup.requirements) {
        tracing::debug!(
            "{} unchanged since last install, skipping pip",
            setup.requirements.display()
        );
        return Ok(());
    }

    let install = CommandSpec::new(python.display().to_string())
        .args(["-m", "pip", "install", "-r"])
        .arg(setup.requirements.display().to_string());
    let mut spinner = ui.start_spinner("Installing Python packages");
    match run_checked(host, &install, options) {
        Ok(_) => {
            spinner.finish_success("Python packages installed");
            if let Err(e) = host.write_file(&stamp, &setup.requirements.display().to_string()) {
                tracing::warn!("Could not write {}: {}", stamp.display(), e);
            }
            Ok(())
        }
        Err(e) => {
            spinner.finish_error("Package install failed");
            Err(BootstrapError::EnvironmentSetupFailed {
                dependency: dependency.name.clone(),
                message: format!("{}. Check {} and retry.", e, setup.requirements.display()),
            })
        }
    }
}

/// True when the stamp exists and is at least as new as the requirements file.
fn requirements_installed(host: &dyn Host, stamp: &Path, requirements: &Path) -> bool {
    match (host.modified(stamp), host.modified(requirements)) {
        (Some(installed), Some(changed)) => installed >= changed,
        _ => false,
    }
}

fn create_venv(
    host: &dyn Host,
    dependency: &Dependency,
    setup: &EnvironmentSetup,
    python: &Path,
    options: &CommandOptions,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let create = CommandSpec::new(dependency.command.as_str())
        .args(["-m", "venv"])
        .arg(setup.venv.display().to_string());

    let mut spinner = ui.start_spinner(&format!(
        "Creating virtual environment at {}",
        setup.venv.display()
    ));
    if let Err(e) = run_checked(host, &create, options) {
        spinner.finish_error("Could not create virtual environment");
        return Err(BootstrapError::EnvironmentSetupFailed {
            dependency: dependency.name.clone(),
            message: format!(
                "{}. On Debian/Ubuntu install the python3-venv package first.",
                e
            ),
        });
    }

    if !host.path_exists(python) {
        spinner.finish_error("Virtual environment incomplete");
        return Err(BootstrapError::EnvironmentSetupFailed {
            dependency: dependency.name.clone(),
            message: format!("{} was not created", python.display()),
        });
    }

    spinner.finish_success("Virtual environment created");
    Ok(())
}
