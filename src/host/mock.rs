//! Scripted host for testing.
//!
//! `MockHost` implements [`Host`] entirely in memory. Programs are
//! "installed" with an optional version banner, commands are answered
//! from a script keyed by their display form, and scripted responses can
//! install or remove programs so that re-probing observes the change.
//!
//! # Example
//!
//! ```
//! use kmz_bootstrap::host::{Host, MockHost, MockResponse};
//! use kmz_bootstrap::shell::{CommandOptions, CommandSpec};
//!
//! let host = MockHost::new()
//!     .with_program("npm", None)
//!     .on(
//!         "npm install -g 3d-tiles-tools",
//!         MockResponse::success().installs("3d-tiles-tools", None),
//!     );
//!
//! assert!(host.resolve("3d-tiles-tools").is_none());
//! let spec = CommandSpec::new("npm").args(["install", "-g", "3d-tiles-tools"]);
//! host.run(&spec, &CommandOptions::captured()).unwrap();
//! assert!(host.resolve("3d-tiles-tools").is_some());
//! assert_eq!(host.calls(), vec!["npm install -g 3d-tiles-tools".to_string()]);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::{BootstrapError, Result};
use crate::shell::{CommandOptions, CommandResult, CommandSpec};

use super::Host;

/// Directory mock programs appear to live in.
const MOCK_BIN_DIR: &str = "/mock/bin";

/// Side effect applied when a scripted command succeeds.
#[derive(Debug, Clone)]
enum Effect {
    Install {
        program: String,
        version_output: Option<String>,
    },
    Remove {
        program: String,
    },
    Create {
        path: PathBuf,
    },
}

/// Scripted answer to a command.
#[derive(Debug, Clone)]
pub struct MockResponse {
    exit_code: i32,
    stdout: String,
    stderr: String,
    effects: Vec<Effect>,
}

impl MockResponse {
    /// A command that exits 0.
    pub fn success() -> Self {
        Self {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
            effects: Vec::new(),
        }
    }

    /// A command that exits with `code`.
    pub fn failure(code: i32) -> Self {
        Self {
            exit_code: code,
            ..Self::success()
        }
    }

    /// Set standard output.
    pub fn stdout(mut self, text: &str) -> Self {
        self.stdout = text.to_string();
        self
    }

    /// Set standard error.
    pub fn stderr(mut self, text: &str) -> Self {
        self.stderr = text.to_string();
        self
    }

    /// On success, make `program` resolvable with the given `--version` banner.
    pub fn installs(mut self, program: &str, version_output: Option<&str>) -> Self {
        self.effects.push(Effect::Install {
            program: program.to_string(),
            version_output: version_output.map(str::to_string),
        });
        self
    }

    /// On success, make `program` unresolvable.
    pub fn removes(mut self, program: &str) -> Self {
        self.effects.push(Effect::Remove {
            program: program.to_string(),
        });
        self
    }

    /// On success, make `path` exist.
    pub fn creates(mut self, path: impl Into<PathBuf>) -> Self {
        self.effects.push(Effect::Create { path: path.into() });
        self
    }
}

/// In-memory host with scripted command responses.
#[derive(Debug, Default)]
pub struct MockHost {
    programs: RefCell<HashMap<String, Option<String>>>,
    off_path: RefCell<HashSet<String>>,
    paths: RefCell<HashMap<PathBuf, SystemTime>>,
    clock: RefCell<u64>,
    responses: HashMap<String, MockResponse>,
    calls: RefCell<Vec<String>>,
}

impl MockHost {
    /// Create an empty host: nothing installed, nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a program, optionally with the banner `<program> --version` prints.
    pub fn with_program(self, program: &str, version_output: Option<&str>) -> Self {
        self.install_program(program, version_output);
        self
    }

    /// Install a program that only resolves through the extra search
    /// directories, not through the user's own `PATH`.
    pub fn with_program_off_path(self, program: &str, version_output: Option<&str>) -> Self {
        self.off_path.borrow_mut().insert(program.to_string());
        self.with_program(program, version_output)
    }

    /// Make a path exist.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        self.touch(path);
        self
    }

    /// Create `path`, or bump its modification time if it exists.
    ///
    /// Times come from a counter, so every touch is strictly later than the
    /// one before.
    pub fn touch(&self, path: impl Into<PathBuf>) {
        let mut clock = self.clock.borrow_mut();
        *clock += 1;
        let time = UNIX_EPOCH + Duration::from_secs(*clock);
        self.paths.borrow_mut().insert(path.into(), time);
    }

    /// Script the response to a command, matched on its display form.
    pub fn on(mut self, command: &str, response: MockResponse) -> Self {
        self.responses.insert(command.to_string(), response);
        self
    }

    /// Install a program after construction.
    pub fn install_program(&self, program: &str, version_output: Option<&str>) {
        self.programs
            .borrow_mut()
            .insert(program.to_string(), version_output.map(str::to_string));
    }

    /// Remove a program after construction.
    pub fn remove_program(&self, program: &str) {
        self.programs.borrow_mut().remove(program);
    }

    /// Every command run so far, in order, in display form.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Commands run so far that start with `prefix`.
    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn is_runnable(&self, program: &str) -> bool {
        self.programs.borrow().contains_key(program)
            || self.paths.borrow().contains_key(Path::new(program))
    }

    fn apply(&self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::Install {
                    program,
                    version_output,
                } => self.install_program(program, version_output.as_deref()),
                Effect::Remove { program } => self.remove_program(program),
                Effect::Create { path } => self.touch(path.clone()),
            }
        }
    }
}

impl Host for MockHost {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        if self.programs.borrow().contains_key(program) {
            Some(Path::new(MOCK_BIN_DIR).join(program))
        } else {
            None
        }
    }

    fn on_user_path(&self, program: &str) -> bool {
        self.resolve(program).is_some() && !self.off_path.borrow().contains(program)
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.paths.borrow().contains_key(path)
    }

    fn modified(&self, path: &Path) -> Option<SystemTime> {
        self.paths.borrow().get(path).copied()
    }

    fn write_file(&self, path: &Path, _contents: &str) -> Result<()> {
        self.touch(path);
        Ok(())
    }

    fn run(&self, command: &CommandSpec, _options: &CommandOptions) -> Result<CommandResult> {
        let line = command.to_string();
        self.calls.borrow_mut().push(line.clone());

        if !self.is_runnable(&command.program) {
            return Err(BootstrapError::CommandFailed {
                command: line,
                code: None,
            });
        }

        if let Some(response) = self.responses.get(&line) {
            if response.exit_code == 0 {
                self.apply(&response.effects);
                return Ok(CommandResult::success(
                    response.stdout.clone(),
                    response.stderr.clone(),
                    Duration::ZERO,
                ));
            }
            return Ok(CommandResult::failure(
                Some(response.exit_code),
                response.stdout.clone(),
                response.stderr.clone(),
                Duration::ZERO,
            ));
        }

        if command.args == ["--version"] {
            let banner = self
                .programs
                .borrow()
                .get(&command.program)
                .cloned()
                .flatten();
            if let Some(banner) = banner {
                return Ok(CommandResult::success(banner, String::new(), Duration::ZERO));
            }
        }

        Ok(CommandResult::failure(
            Some(1),
            String::new(),
            format!("mock: no response scripted for `{}`", line),
            Duration::ZERO,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(host: &MockHost, spec: CommandSpec) -> Result<CommandResult> {
        host.run(&spec, &CommandOptions::captured())
    }

    #[test]
    fn unknown_program_cannot_run() {
        let host = MockHost::new();
        let err = run(&host, CommandSpec::new("brew").arg("--version")).unwrap_err();
        assert!(matches!(err, BootstrapError::CommandFailed { .. }));
        assert_eq!(host.calls(), vec!["brew --version".to_string()]);
    }

    #[test]
    fn version_banner_answers_version_flag() {
        let host = MockHost::new().with_program("blender", Some("Blender 4.2.1 LTS\n"));
        let result = run(&host, CommandSpec::new("blender").arg("--version")).unwrap();
        assert!(result.success);
        assert!(result.stdout.starts_with("Blender 4.2.1"));
    }

    #[test]
    fn unscripted_command_fails() {
        let host = MockHost::new().with_program("brew", None);
        let result = run(&host, CommandSpec::new("brew").args(["info", "--cask", "x"])).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(1));
    }

    #[test]
    fn effects_apply_only_on_success() {
        let host = MockHost::new()
            .with_program("blender", Some("Blender 5.0.0"))
            .with_program("brew", None)
            .on(
                "brew uninstall --cask blender",
                MockResponse::failure(1).removes("blender"),
            );

        run(
            &host,
            CommandSpec::new("brew").args(["uninstall", "--cask", "blender"]),
        )
        .unwrap();
        assert!(host.resolve("blender").is_some());
    }

    #[test]
    fn removes_effect_unresolves_program() {
        let host = MockHost::new()
            .with_program("blender", Some("Blender 5.0.0"))
            .with_program("apt-get", None)
            .on(
                "apt-get remove -y blender",
                MockResponse::success().removes("blender"),
            );

        run(
            &host,
            CommandSpec::new("apt-get")
                .args(["remove", "-y", "blender"])
                .elevated(),
        )
        .unwrap();
        assert!(host.resolve("blender").is_none());
    }

    #[test]
    fn created_paths_are_runnable() {
        let host = MockHost::new()
            .with_program("python3", Some("Python 3.12.1"))
            .on(
                "python3 -m venv /p/.venv",
                MockResponse::success().creates("/p/.venv/bin/python"),
            );

        run(&host, CommandSpec::new("python3").args(["-m", "venv", "/p/.venv"])).unwrap();
        assert!(host.path_exists(Path::new("/p/.venv/bin/python")));

        let pip = CommandSpec::new("/p/.venv/bin/python").args(["-m", "pip", "--version"]);
        assert!(run(&host, pip).is_ok());
    }

    #[test]
    fn touch_moves_modification_time_forward() {
        let host = MockHost::new().with_path("/p/requirements.txt");
        let before = host.modified(Path::new("/p/requirements.txt")).unwrap();
        host.write_file(Path::new("/p/.venv/stamp"), "").unwrap();
        host.touch("/p/requirements.txt");
        let after = host.modified(Path::new("/p/requirements.txt")).unwrap();

        assert!(after > before);
        assert!(host.modified(Path::new("/p/.venv/stamp")).unwrap() < after);
    }

    #[test]
    fn off_path_program_resolves_but_is_flagged() {
        let host = MockHost::new()
            .with_program_off_path("blender", Some("Blender 4.2.1"))
            .with_program("brew", None);
        assert!(host.resolve("blender").is_some());
        assert!(!host.on_user_path("blender"));
        assert!(host.on_user_path("brew"));
        assert!(!host.on_user_path("npm"));
    }

    #[test]
    fn calls_starting_with_filters() {
        let host = MockHost::new().with_program("brew", None);
        let _ = run(&host, CommandSpec::new("brew").args(["info", "--cask", "a"]));
        let _ = run(&host, CommandSpec::new("brew").args(["install", "--cask", "a"]));
        assert_eq!(
            host.calls_starting_with("brew info"),
            vec!["brew info --cask a".to_string()]
        );
        host.clear_calls();
        assert!(host.calls().is_empty());
    }
}
