//! kmz-bootstrap CLI entry point.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use kmz_bootstrap::cli::Cli;
use kmz_bootstrap::config::{find_project_root, load_config, BootstrapConfig};
use kmz_bootstrap::host::SystemHost;
use kmz_bootstrap::runner::Bootstrap;
use kmz_bootstrap::shell::is_ci;
use kmz_bootstrap::ui::{create_ui, OutputMode};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// `RUST_LOG` overrides the default level of INFO.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kmz_bootstrap=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Locate the project root and load its configuration.
fn load_project() -> anyhow::Result<(PathBuf, BootstrapConfig)> {
    let cwd = std::env::current_dir().context("Cannot determine the current directory")?;
    let project_root = find_project_root(&cwd).unwrap_or(cwd);
    let config = load_config(&project_root)?;
    Ok((project_root, config))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    tracing::debug!("kmz-bootstrap starting with args: {:?}", cli);

    let (project_root, config) = match load_project() {
        Ok(loaded) => loaded,
        Err(e) => {
            let mut ui = create_ui(!is_ci(), OutputMode::Normal);
            ui.error(&format!("Error: {:#}", e));
            return ExitCode::from(1);
        }
    };

    let output_mode = OutputMode::from(config.output);
    let mut ui = create_ui(!is_ci(), output_mode);

    let host = SystemHost::in_dir(&project_root);
    let bootstrap = Bootstrap::from_config(&host, &config, &project_root, output_mode);
    let report = bootstrap.run(ui.as_mut());
    if let Some(dependency) = report.failed_dependency() {
        tracing::debug!("Run halted at {}", dependency);
    }

    ExitCode::from(report.exit_code() as u8)
}
