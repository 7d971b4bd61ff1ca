//! CLI argument definitions.
//!
//! The bootstrapper takes no behavior flags; everything it needs comes
//! from the project's `.kmz-bootstrap.yml` or built-in defaults.

use clap::Parser;

/// kmz-bootstrap - Prepare the 3D Tiles to KMZ conversion toolchain.
#[derive(Debug, Parser)]
#[command(name = "kmz-bootstrap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_without_arguments() {
        assert!(Cli::try_parse_from(["kmz-bootstrap"]).is_ok());
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["kmz-bootstrap", "--force"]).is_err());
    }
}
