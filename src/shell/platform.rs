//! Platform and privilege detection.

/// Host platform, used to pick platform-specific paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Subdirectory of a virtual environment holding its executables.
    pub fn venv_bin_dir(&self) -> &'static str {
        match self {
            Platform::Windows => "Scripts",
            Platform::MacOS | Platform::Linux => "bin",
        }
    }

    /// File name of the interpreter inside a virtual environment.
    pub fn venv_python(&self) -> &'static str {
        match self {
            Platform::Windows => "python.exe",
            Platform::MacOS | Platform::Linux => "python",
        }
    }
}

/// Check if running in a CI environment.
///
/// Used to force the non-interactive UI in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root/admin.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        std::env::var("ADMIN").is_ok()
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_current_returns_valid() {
        let platform = Platform::current();
        assert!(matches!(
            platform,
            Platform::MacOS | Platform::Linux | Platform::Windows
        ));
    }

    #[test]
    fn venv_layout_per_platform() {
        assert_eq!(Platform::Linux.venv_bin_dir(), "bin");
        assert_eq!(Platform::MacOS.venv_python(), "python");
        assert_eq!(Platform::Windows.venv_bin_dir(), "Scripts");
        assert_eq!(Platform::Windows.venv_python(), "python.exe");
    }

    #[test]
    fn is_ci_detects_environment() {
        // Just ensure function doesn't panic
        let _ = is_ci();
    }

    #[test]
    fn is_elevated_does_not_panic() {
        let _ = is_elevated();
    }
}
