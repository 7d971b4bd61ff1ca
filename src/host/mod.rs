//! The host environment as a queryable service.
//!
//! Everything the bootstrap knows about the machine (which executables
//! resolve, which files exist, what a command prints) comes from a
//! [`Host`]. Nothing is cached: every question is asked again, so a run
//! always reflects the effects of the installs and removals it performed.
//!
//! - [`SystemHost`] talks to the real machine
//! - [`MockHost`] is a scripted in-memory host for tests

pub mod mock;

pub use mock::{MockHost, MockResponse};

use crate::error::{BootstrapError, Result};
use crate::requirements::probe::{parse_system_path, resolve_tool_path, search_path};
use crate::shell::{execute, CommandOptions, CommandResult, CommandSpec};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Access to the machine being bootstrapped.
pub trait Host {
    /// Resolve an executable on the search path.
    fn resolve(&self, program: &str) -> Option<PathBuf>;

    /// Whether `program` is reachable through the user's own `PATH`, as
    /// opposed to only through the extra directories [`Host::resolve`] adds.
    fn on_user_path(&self, program: &str) -> bool;

    /// Whether a file or directory exists.
    fn path_exists(&self, path: &Path) -> bool;

    /// Last modification time of a file, if it exists.
    fn modified(&self, path: &Path) -> Option<SystemTime>;

    /// Create or overwrite a file.
    fn write_file(&self, path: &Path, contents: &str) -> Result<()>;

    /// Run a command to completion.
    ///
    /// `Err` means the command could not be started at all.
    fn run(&self, command: &CommandSpec, options: &CommandOptions) -> Result<CommandResult>;
}

/// The real machine.
///
/// Executables are resolved on the search path (`PATH` plus Homebrew
/// prefixes) and spawned children get that same search path as their
/// `PATH`, so anything `resolve` finds can also be run by name.
#[derive(Debug, Default)]
pub struct SystemHost {
    cwd: Option<PathBuf>,
    search: Option<Vec<PathBuf>>,
}

impl SystemHost {
    /// Create a host that runs commands in the current directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host that runs commands in `dir` unless told otherwise.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            cwd: Some(dir.to_path_buf()),
            ..Self::default()
        }
    }

    /// Use a fixed list of directories instead of reading the search path.
    pub fn with_search_path(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search = Some(dirs);
        self
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        self.search.clone().unwrap_or_else(search_path)
    }
}

impl Host for SystemHost {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        resolve_tool_path(program, &self.search_dirs())
    }

    fn on_user_path(&self, program: &str) -> bool {
        resolve_tool_path(program, &parse_system_path()).is_some()
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn modified(&self, path: &Path) -> Option<SystemTime> {
        fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<()> {
        fs::write(path, contents)?;
        Ok(())
    }

    fn run(&self, command: &CommandSpec, options: &CommandOptions) -> Result<CommandResult> {
        let options = CommandOptions {
            cwd: options.cwd.clone().or_else(|| self.cwd.clone()),
            capture: options.capture,
            search_path: options
                .search_path
                .clone()
                .or_else(|| Some(self.search_dirs())),
        };
        execute(command, &options)
    }
}

/// Run a command and turn a non-zero exit into [`BootstrapError::CommandFailed`].
pub fn run_checked(
    host: &dyn Host,
    spec: &CommandSpec,
    options: &CommandOptions,
) -> Result<CommandResult> {
    let result = host.run(spec, options)?;
    if result.success {
        return Ok(result);
    }
    if let Some(line) = result.summary() {
        tracing::debug!("{}: {}", spec, line);
    }
    Err(BootstrapError::CommandFailed {
        command: spec.to_string(),
        code: result.exit_code,
    })
}
