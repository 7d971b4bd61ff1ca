//! Output verbosity.

use crate::config::schema::OutputSetting;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show all output including installer output.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show spinners and results, without headers or progress counters.
    Quiet,
    /// Show nothing except errors and remediation hints.
    Silent,
}

impl From<OutputSetting> for OutputMode {
    fn from(setting: OutputSetting) -> Self {
        match setting {
            OutputSetting::Verbose => Self::Verbose,
            OutputSetting::Normal => Self::Normal,
            OutputSetting::Quiet => Self::Quiet,
            OutputSetting::Silent => Self::Silent,
        }
    }
}

impl OutputMode {
    /// Check if this mode streams installer output.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal | Self::Quiet)
    }

    /// Check if this mode shows headers and `[n/total]` counters.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
