//! kmz-bootstrap - Toolchain bootstrap for the 3D Tiles to KMZ converter.
//!
//! Ensures Python 3 (with a project virtual environment), the 3D Tiles
//! tools, and a Collada-capable Blender are present before a conversion
//! is attempted. Missing tools are installed through Homebrew, apt or npm;
//! a Blender release that dropped the Collada exporter is removed and
//! replaced with a supported one.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional `.kmz-bootstrap.yml` loading
//! - [`error`] - Error types and result aliases
//! - [`host`] - Host abstraction over PATH lookup and process spawning
//! - [`providers`] - Package manager backends
//! - [`requirements`] - Dependency table, probing, version rules and remediation
//! - [`runner`] - Run orchestration and environment setup
//! - [`shell`] - Shell command execution and platform detection
//! - [`ui`] - Spinners, themed output and hints
//!
//! # Example
//!
//! ```
//! use kmz_bootstrap::requirements::{parse_version_output, Verdict, VersionRule};
//!
//! let version = parse_version_output("Blender 4.2.3 LTS", 1).unwrap();
//! assert_eq!(VersionRule::blender().evaluate(Some(version)), Verdict::Accepted);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod providers;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{BootstrapError, Result};
