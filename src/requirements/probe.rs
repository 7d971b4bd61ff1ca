//! Executable discovery.
//!
//! Tools are located by walking the search path directly rather than
//! shelling out to `which`, whose behavior varies across systems and is
//! sometimes a shell builtin. The search path is the process `PATH` plus the
//! Homebrew prefix directories, which are often missing from non-login
//! shells right after Homebrew itself was installed.
//!
//! # Example
//!
//! ```no_run
//! use kmz_bootstrap::requirements::probe::{resolve_tool_path, search_path};
//!
//! if let Some(path) = resolve_tool_path("blender", &search_path()) {
//!     println!("blender at {}", path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::host::Host;
use crate::ui::UserInterface;

use super::registry::Dependency;
use super::status::ProbeStatus;
use super::version::probe_version;

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over search path entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Default Homebrew prefix paths for this platform.
pub fn homebrew_default_prefixes() -> Vec<PathBuf> {
    let mut prefixes = Vec::new();
    if cfg!(target_os = "macos") {
        if cfg!(target_arch = "aarch64") {
            prefixes.push(PathBuf::from("/opt/homebrew"));
        } else {
            prefixes.push(PathBuf::from("/usr/local"));
        }
    } else if cfg!(target_os = "linux") {
        prefixes.push(PathBuf::from("/home/linuxbrew/.linuxbrew"));
    }
    prefixes
}

/// Append Homebrew `bin`/`sbin` directories for every prefix that holds a
/// `brew` binary, skipping directories already present.
pub fn with_homebrew_dirs(mut entries: Vec<PathBuf>, prefixes: &[PathBuf]) -> Vec<PathBuf> {
    for prefix in prefixes {
        let brew = prefix.join("bin/brew");
        if !(brew.is_file() && is_executable(&brew)) {
            continue;
        }
        for dir in [prefix.join("bin"), prefix.join("sbin")] {
            if dir.is_dir() && !entries.contains(&dir) {
                entries.push(dir);
            }
        }
    }
    entries
}

/// The directories searched for executables, read fresh on every call.
pub fn search_path() -> Vec<PathBuf> {
    with_homebrew_dirs(parse_system_path(), &homebrew_default_prefixes())
}

/// Check whether a dependency's executable resolves, reading its version
/// when the dependency declares a version probe.
pub fn probe_command(host: &dyn Host, dependency: &Dependency) -> ProbeStatus {
    let Some(path) = host.resolve(&dependency.command) else {
        tracing::debug!("{} not found on search path", dependency.command);
        return ProbeStatus::Missing;
    };

    let version = dependency
        .version_probe
        .as_ref()
        .and_then(|probe| probe_version(host, &dependency.command, probe));

    tracing::debug!("{} found at {}", dependency.command, path.display());
    ProbeStatus::Present { path, version }
}

/// Tell the user a dependency is missing and how to get it by hand.
pub fn report_missing(ui: &mut dyn UserInterface, dependency: &Dependency) {
    ui.warning(&format!(
        "{} not found (`{}` is not on PATH)",
        dependency.name, dependency.command
    ));
    ui.show_hint(&dependency.hint);
}
