//! Version extraction from self-reported version text.
//!
//! Tools print banners like `Blender 4.2.1 LTS` or `Python 3.11.4`. The
//! parser takes the first line, picks a whitespace-delimited field, and
//! reads a `(major, minor)` pair out of the dotted token. Anything it
//! cannot read is `None` ("unknown"), which callers treat as a first-class
//! state rather than an error.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::host::Host;
use crate::shell::{CommandOptions, CommandSpec};

/// A `(major, minor)` version pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// How to ask a tool for its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionProbe {
    /// Arguments that make the tool print its version.
    pub args: Vec<String>,
    /// Zero-based whitespace field of the first line holding the version.
    pub field: usize,
}

impl VersionProbe {
    /// Create a probe from explicit arguments and field position.
    pub fn new(args: &[&str], field: usize) -> Self {
        Self {
            args: args.iter().map(|a| a.to_string()).collect(),
            field,
        }
    }

    /// `<tool> --version`, version in the second field (`Name X.Y.Z ...`).
    pub fn standard() -> Self {
        Self::new(&["--version"], 1)
    }
}

fn leading_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+").expect("static pattern"))
}

fn leading_number(text: &str) -> Option<u32> {
    leading_digits()
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Parse a dotted version token such as `4.2.1` or `3.6`.
///
/// Major is the text before the first dot, minor the text between the first
/// and second dot (or the whole remainder when there is no second dot).
/// A token without any dot has minor 0. Only leading digits of each part
/// count, so `4.2-rc1` reads as 4.2.
pub fn parse_version_token(token: &str) -> Option<Version> {
    let token = token.trim().trim_start_matches('v');
    if token.is_empty() {
        return None;
    }

    let (major_text, rest) = match token.split_once('.') {
        Some((major, rest)) => (major, Some(rest)),
        None => (token, None),
    };

    let major = leading_number(major_text)?;
    let minor = rest
        .map(|rest| rest.split('.').next().unwrap_or(rest))
        .and_then(leading_number)
        .unwrap_or(0);

    Some(Version { major, minor })
}

/// Parse the version out of raw version-command output.
pub fn parse_version_output(output: &str, field: usize) -> Option<Version> {
    let first_line = output.lines().next()?;
    let token = first_line.split_whitespace().nth(field)?;
    parse_version_token(token)
}

/// Run a tool's version command on the host and parse the result.
///
/// Returns `None` if the tool is not on the search path, cannot be run,
/// exits non-zero, or prints nothing parsable.
pub fn probe_version(host: &dyn Host, program: &str, probe: &VersionProbe) -> Option<Version> {
    host.resolve(program)?;

    let spec = CommandSpec::new(program).args(probe.args.iter().cloned());
    let result = match host.run(&spec, &CommandOptions::captured()) {
        Ok(result) if result.success => result,
        Ok(result) => {
            tracing::debug!("{} exited with {:?}", spec, result.exit_code);
            return None;
        }
        Err(e) => {
            tracing::debug!("Could not run {}: {}", spec, e);
            return None;
        }
    };

    let version = parse_version_output(&result.stdout, probe.field);
    tracing::debug!("{} reports version {:?}", program, version);
    version
}
