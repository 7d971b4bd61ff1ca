//! Visual theme and styling.

use console::Style;

/// Terminal styles for bootstrap output.
#[derive(Debug, Clone)]
pub struct BootstrapTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for remediation hints (cyan).
    pub hint: Style,
}

impl Default for BootstrapTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            hint: Style::new().cyan(),
        }
    }

    /// Create a theme without colors (for non-TTY or `NO_COLOR`).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            hint: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    pub fn format_hint(&self, msg: &str) -> String {
        format!("{}", self.hint.apply_to(format!("→ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("◆"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = BootstrapTheme::plain().format_success("Blender ready");
        assert_eq!(msg, "✓ Blender ready");
    }

    #[test]
    fn theme_formats_warning() {
        let msg = BootstrapTheme::plain().format_warning("Blender 5.0 is incompatible");
        assert!(msg.starts_with("⚠"));
    }

    #[test]
    fn theme_formats_error() {
        let msg = BootstrapTheme::plain().format_error("Failed");
        assert!(msg.contains("✗"));
        assert!(msg.contains("Failed"));
    }

    #[test]
    fn theme_formats_skipped() {
        let msg = BootstrapTheme::plain().format_skipped("brew not available");
        assert!(msg.contains("○"));
    }

    #[test]
    fn theme_formats_hint() {
        let msg = BootstrapTheme::plain().format_hint("npm install -g 3d-tiles-tools");
        assert_eq!(msg, "→ npm install -g 3d-tiles-tools");
    }

    #[test]
    fn theme_formats_header() {
        let msg = BootstrapTheme::plain().format_header("Toolchain");
        assert!(msg.contains("Toolchain"));
        assert!(msg.contains("◆"));
    }
}
