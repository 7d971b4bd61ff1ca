//! Toolchain bootstrap orchestration.
//!
//! Resolves each dependency in order: remediate (constrained only), probe,
//! install through the fallback chain if missing, gate on the version rule,
//! then run environment setup and the exporter check where configured.
//! The first failed dependency halts the run; later ones are not probed.

use std::path::Path;

use crate::config::BootstrapConfig;
use crate::error::{BootstrapError, Result};
use crate::host::Host;
use crate::providers::{run_attempt, AttemptResult, ProviderSet};
use crate::requirements::probe::{probe_command, report_missing};
use crate::requirements::{
    probe_version, toolchain, Dependency, DependencyResult, ProbeStatus, Remediator, RunOutcome,
    Verdict, Version,
};
use crate::shell::CommandOptions;
use crate::ui::{hints, OutputMode, UserInterface};

use super::environment::ensure_environment;
use super::exporter::verify_exporter;
use super::report::RunReport;

/// Drives one bootstrap run against a host.
pub struct Bootstrap<'a> {
    host: &'a dyn Host,
    providers: ProviderSet,
    dependencies: Vec<Dependency>,
    options: CommandOptions,
}

impl<'a> Bootstrap<'a> {
    pub fn new(host: &'a dyn Host, providers: ProviderSet, dependencies: Vec<Dependency>) -> Self {
        Self {
            host,
            providers,
            dependencies,
            options: CommandOptions::captured(),
        }
    }

    /// Build the standard toolchain and backends from configuration.
    ///
    /// In verbose mode installer output streams to the terminal.
    pub fn from_config(
        host: &'a dyn Host,
        config: &BootstrapConfig,
        project_root: &Path,
        mode: OutputMode,
    ) -> Self {
        let capture = !mode.shows_command_output();
        let mut bootstrap = Self::new(
            host,
            ProviderSet::standard(capture),
            toolchain(config, project_root),
        );
        bootstrap.options.capture = capture;
        bootstrap
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Resolve every dependency, stopping at the first failure.
    pub fn run(&self, ui: &mut dyn UserInterface) -> RunReport {
        let mut report = RunReport::default();
        let total = self.dependencies.len();

        ui.show_header("Bootstrapping the 3D Tiles to KMZ toolchain");

        for (index, dependency) in self.dependencies.iter().enumerate() {
            ui.show_progress(index + 1, total);
            tracing::debug!("Resolving {}", dependency.name);

            match self.resolve(dependency, ui) {
                Ok(result) => {
                    ui.success(&result.describe());
                    report.results.push(result);
                }
                Err(e) => {
                    tracing::debug!("{} failed: {}", dependency.name, e);
                    ui.error(&e.to_string());
                    if let Some(step) = e.manual_step() {
                        ui.show_hint(&step);
                    }
                    ui.show_hint(hints::after_failure());
                    report.results.push(DependencyResult::failed(&dependency.name));
                    report.failure = Some(e);
                    return report;
                }
            }
        }

        ui.success("Toolchain ready");
        ui.show_hint(hints::after_success());
        report
    }

    /// Bring one dependency into an acceptable state.
    pub fn resolve(
        &self,
        dependency: &Dependency,
        ui: &mut dyn UserInterface,
    ) -> Result<DependencyResult> {
        let remediated = if dependency.is_constrained() {
            Remediator::new(self.host, &self.providers)
                .remediate(dependency, ui)?
                .removed
        } else {
            false
        };

        // A compatible install left behind by the removal counts as already
        // satisfied; RemediatedAndInstalled means a replacement was installed.
        let (outcome, installed_package) = match probe_command(self.host, dependency) {
            ProbeStatus::Present { .. } => (RunOutcome::AlreadySatisfied, None),
            ProbeStatus::Missing => {
                report_missing(ui, dependency);
                let package = self.install(dependency, ui)?;
                let outcome = if remediated {
                    RunOutcome::RemediatedAndInstalled
                } else {
                    RunOutcome::InstalledFresh
                };
                (outcome, Some(package))
            }
        };

        let version = self.gate(dependency)?;

        if let Some(setup) = &dependency.setup {
            ensure_environment(self.host, dependency, setup, &self.options, ui)?;
        }

        if dependency.verify_exporter {
            verify_exporter(self.host, dependency)?;
        }

        self.check_user_path(dependency, ui);

        Ok(DependencyResult {
            dependency: dependency.name.clone(),
            outcome,
            version,
            installed_package,
        })
    }

    /// Warn when the tool was only found in a Homebrew prefix missing from
    /// `PATH`; the converter invokes it by bare name.
    fn check_user_path(&self, dependency: &Dependency, ui: &mut dyn UserInterface) {
        if self.host.on_user_path(&dependency.command) {
            return;
        }
        let Some(path) = self.host.resolve(&dependency.command) else {
            return;
        };
        let dir = path
            .parent()
            .map(|d| d.display().to_string())
            .unwrap_or_default();
        ui.warning(&format!(
            "`{}` is at {} but not on PATH",
            dependency.command,
            path.display()
        ));
        ui.show_hint(&format!(
            "Add {} to PATH (e.g. `eval \"$(brew shellenv)\"`) before converting.",
            dir
        ));
    }

    /// Walk the fallback chain until an attempt installs the tool.
    ///
    /// Returns the installed package name. When every attempt is unavailable
    /// or exhausted, the accumulated notes are shown and the dependency fails.
    fn install(&self, dependency: &Dependency, ui: &mut dyn UserInterface) -> Result<String> {
        let mut notes = Vec::new();

        for attempt in &dependency.attempts {
            let Some(provider) = self.providers.get(attempt.backend) else {
                notes.push(format!("{}: backend not registered", attempt.backend));
                continue;
            };

            let mut spinner = ui.start_spinner(&format!(
                "Installing {} via {}",
                dependency.name, attempt.backend
            ));
            match run_attempt(provider, self.host, attempt) {
                AttemptResult::Installed(package) => {
                    if self.host.resolve(&dependency.command).is_some() {
                        spinner.finish_success(&format!("Installed {}", package));
                        return Ok(package);
                    }
                    spinner.finish_error(&format!("{} installed but not on PATH", package));
                    notes.push(format!(
                        "{}: {} installed but `{}` is still not on PATH; open a new shell and re-run",
                        attempt.backend, package, dependency.command
                    ));
                }
                AttemptResult::Unavailable => {
                    spinner.finish_skipped(&format!("{} not available", attempt.backend.manager()));
                    notes.push(format!(
                        "{}: `{}` not found",
                        attempt.backend,
                        attempt.backend.manager()
                    ));
                }
                AttemptResult::Exhausted(attempt_notes) => {
                    spinner.finish_error(&format!("{} could not install it", attempt.backend));
                    notes.extend(attempt_notes);
                }
            }
        }

        for note in &notes {
            ui.show_hint(note);
        }
        Err(BootstrapError::MissingExecutable {
            dependency: dependency.name.clone(),
            executable: dependency.command.clone(),
            hint: dependency.hint.clone(),
        })
    }

    /// Re-read the version and apply the dependency's rule, if it has one.
    fn gate(&self, dependency: &Dependency) -> Result<Option<Version>> {
        let version = dependency
            .version_probe
            .as_ref()
            .and_then(|probe| probe_version(self.host, &dependency.command, probe));

        let Some(rule) = dependency.rule else {
            return Ok(version);
        };

        match rule.evaluate(version) {
            Verdict::Accepted => Ok(version),
            Verdict::Unknown => Err(BootstrapError::UnparsableVersion {
                dependency: dependency.name.clone(),
                hint: dependency.hint.clone(),
            }),
            Verdict::TooNew | Verdict::TooOld => {
                Err(BootstrapError::ConstraintNotSatisfiedPostInstall {
                    dependency: dependency.name.clone(),
                    found: version.map(|v| v.to_string()).unwrap_or_default(),
                    rule: rule.to_string(),
                    hint: dependency.hint.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MockHost, MockResponse};
    use crate::ui::MockUI;

    fn bootstrap(host: &MockHost) -> Bootstrap<'_> {
        Bootstrap::from_config(
            host,
            &BootstrapConfig::default(),
            Path::new("/p"),
            OutputMode::Normal,
        )
    }

    fn blender(b: &Bootstrap<'_>) -> Dependency {
        b.dependencies()[2].clone()
    }

    #[test]
    fn present_tool_is_already_satisfied() {
        let host = MockHost::new().with_program("3d-tiles-tools", None);
        let b = bootstrap(&host);
        let mut ui = MockUI::new();

        let result = b.resolve(&b.dependencies()[1].clone(), &mut ui).unwrap();
        assert_eq!(result.outcome, RunOutcome::AlreadySatisfied);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn missing_tool_installed_fresh() {
        let host = MockHost::new().with_program("npm", None).on(
            "npm install -g 3d-tiles-tools",
            MockResponse::success().installs("3d-tiles-tools", None),
        );
        let b = bootstrap(&host);
        let mut ui = MockUI::new();

        let result = b.resolve(&b.dependencies()[1].clone(), &mut ui).unwrap();
        assert_eq!(result.outcome, RunOutcome::InstalledFresh);
        assert_eq!(result.installed_package.as_deref(), Some("3d-tiles-tools"));
        assert!(ui.has_hint("npm install -g 3d-tiles-tools"));
    }

    #[test]
    fn no_backend_is_missing_executable() {
        let host = MockHost::new();
        let b = bootstrap(&host);
        let mut ui = MockUI::new();

        let err = b.resolve(&blender(&b), &mut ui).unwrap_err();
        assert!(matches!(err, BootstrapError::MissingExecutable { .. }));
        assert!(ui.has_hint("`brew` not found"));
        assert!(ui.has_hint("`apt-get` not found"));
    }

    #[test]
    fn install_that_lands_too_old_fails_gate() {
        let host = MockHost::new()
            .with_program("apt-get", None)
            .on("apt-get update", MockResponse::success())
            .on(
                "apt-get install -y blender",
                MockResponse::success().installs("blender", Some("Blender 3.4.1")),
            );
        let b = bootstrap(&host);
        let mut ui = MockUI::new();

        let err = b.resolve(&blender(&b), &mut ui).unwrap_err();
        match err {
            BootstrapError::ConstraintNotSatisfiedPostInstall { found, rule, .. } => {
                assert_eq!(found, "3.4");
                assert_eq!(rule, ">=3.6, <5");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_version_fails_gate() {
        let host = MockHost::new().with_program("blender", None);
        let b = bootstrap(&host);
        let mut ui = MockUI::new();

        let err = b.resolve(&blender(&b), &mut ui).unwrap_err();
        assert!(matches!(err, BootstrapError::UnparsableVersion { .. }));
    }

    #[test]
    fn install_without_path_entry_falls_through() {
        let host = MockHost::new()
            .with_program("brew", None)
            .with_program("apt-get", None)
            .on("brew info --cask blender@4.5", MockResponse::success())
            .on("brew install --cask blender@4.5", MockResponse::success())
            .on("apt-get update", MockResponse::success())
            .on(
                "apt-get install -y blender",
                MockResponse::success().installs("blender", Some("Blender 4.0.2")),
            );
        let b = bootstrap(&host);
        let mut ui = MockUI::new();

        let result = b.resolve(&blender(&b), &mut ui).unwrap();
        assert_eq!(result.installed_package.as_deref(), Some("blender"));
        assert_eq!(result.version, Some(Version::new(4, 0)));
    }

    #[test]
    fn removal_leaving_supported_install_is_already_satisfied() {
        // The cask copy is removed; an older apt copy is still on PATH.
        let host = MockHost::new()
            .with_program("brew", None)
            .with_program("blender", Some("Blender 5.0.1"))
            .on(
                "brew uninstall --cask blender",
                MockResponse::success().installs("blender", Some("Blender 4.1.1")),
            );
        let b = bootstrap(&host);
        let mut ui = MockUI::new();

        let result = b.resolve(&blender(&b), &mut ui).unwrap();
        assert_eq!(result.outcome, RunOutcome::AlreadySatisfied);
        assert_eq!(result.installed_package, None);
        assert_eq!(result.version, Some(Version::new(4, 1)));
        assert!(ui.has_success("Removed Blender 5.0"));
        assert!(host.calls_starting_with("brew install").is_empty());
    }

    #[test]
    fn tool_outside_path_gets_a_path_hint() {
        let host = MockHost::new().with_program_off_path("3d-tiles-tools", None);
        let b = bootstrap(&host);
        let mut ui = MockUI::new();

        let result = b.resolve(&b.dependencies()[1].clone(), &mut ui).unwrap();
        assert_eq!(result.outcome, RunOutcome::AlreadySatisfied);
        assert!(ui.has_warning("not on PATH"));
        assert!(ui.has_hint("Add /mock/bin to PATH"));
    }

    #[test]
    fn run_halts_at_first_failure() {
        let host = MockHost::new();
        let b = bootstrap(&host);
        let mut ui = MockUI::new();

        let report = b.run(&mut ui);
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.outcome_for("Python 3"), Some(RunOutcome::Failed));
        assert!(!host.calls().iter().any(|c| c.contains("3d-tiles-tools")));
    }
}
