//! External command execution.
//!
//! Commands are spawned directly (program + argument vector), never
//! through a shell, so package names cannot be reinterpreted. Every call
//! blocks until the child exits; there is no timeout.

use crate::error::{BootstrapError, Result};
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use super::platform::is_elevated;

/// A command to run on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path.
    pub program: String,

    /// Arguments passed verbatim.
    pub args: Vec<String>,

    /// Run with elevated privilege (`sudo`) unless already root.
    pub elevated: bool,
}

impl CommandSpec {
    /// Create a new command.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            elevated: false,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Mark the command as requiring elevated privilege.
    pub fn elevated(mut self) -> Self {
        self.elevated = true;
        self
    }

    /// The argv actually spawned, with `sudo` prepended when needed.
    pub fn argv(&self, already_elevated: bool) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        if self.elevated && !already_elevated {
            argv.push("sudo".to_string());
        }
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// First non-empty line of stderr, falling back to stdout.
    pub fn summary(&self) -> Option<&str> {
        self.stderr
            .lines()
            .chain(self.stdout.lines())
            .map(str::trim)
            .find(|l| !l.is_empty())
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Capture stdout and stderr (if false, both are inherited).
    pub capture: bool,

    /// Directories exported as the child's `PATH`; the program itself is
    /// looked up there too. `None` inherits the parent's `PATH`.
    pub search_path: Option<Vec<PathBuf>>,
}

impl CommandOptions {
    /// Capture all output.
    pub fn captured() -> Self {
        Self {
            capture: true,
            ..Default::default()
        }
    }
}

/// Execute a command and wait for it to finish.
///
/// Returns `Err(CommandFailed)` only when the process cannot be spawned;
/// a non-zero exit is reported through [`CommandResult::success`].
pub fn execute(spec: &CommandSpec, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let argv = spec.argv(is_elevated());

    let mut cmd = Command::new(&argv[0]);
    cmd.args(&argv[1..]);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    if let Some(dirs) = &options.search_path {
        match std::env::join_paths(dirs) {
            Ok(path) => {
                cmd.env("PATH", path);
            }
            Err(e) => tracing::debug!("Keeping inherited PATH: {}", e),
        }
    }

    if options.capture {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    }

    tracing::debug!("Running: {}", argv.join(" "));

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn {}: {}", argv[0], e);
        BootstrapError::CommandFailed {
            command: spec.to_string(),
            code: None,
        }
    })?;

    let duration = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        tracing::debug!(
            "{} exited with {:?} after {:?}",
            spec,
            output.status.code(),
            duration
        );
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}
