//! Collada exporter capability check.
//!
//! The converter drives `bpy.ops.wm.collada_export`. Some Blender builds
//! ship without it even inside the accepted version range, so this check
//! asks a headless Blender whether the operator is registered.

use crate::error::{BootstrapError, Result};
use crate::host::Host;
use crate::requirements::Dependency;
use crate::shell::{CommandOptions, CommandSpec};

/// Python run inside Blender; raises when the exporter operator is missing.
const COLLADA_CHECK: &str = "import bpy, addon_utils\n\
try:\n    addon_utils.enable('io_scene_dae', default_set=True)\n\
except Exception:\n    pass\n\
if 'collada_export' not in dir(bpy.ops.wm):\n    \
raise RuntimeError('collada exporter unavailable')\n";

/// Command that runs the check.
pub fn exporter_check_command(dependency: &Dependency) -> CommandSpec {
    CommandSpec::new(dependency.command.as_str())
        .args([
            "--background",
            "--factory-startup",
            "--python-exit-code",
            "1",
            "--python-expr",
        ])
        .arg(COLLADA_CHECK)
}

/// Confirm the installed Blender can export Collada.
pub fn verify_exporter(host: &dyn Host, dependency: &Dependency) -> Result<()> {
    let spec = exporter_check_command(dependency);
    let unavailable = |message: String| BootstrapError::ExporterUnavailable {
        dependency: dependency.name.clone(),
        message,
    };

    let result = host
        .run(&spec, &CommandOptions::captured())
        .map_err(|e| unavailable(e.to_string()))?;

    if result.success {
        tracing::debug!("Collada exporter available");
        return Ok(());
    }

    let detail = result
        .summary()
        .map(|line| format!(" ({})", line))
        .unwrap_or_default();
    Err(unavailable(format!(
        "bpy.ops.wm.collada_export is not registered{}. Install a Blender 3.6 or 4.x build with Collada support.",
        detail
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BootstrapConfig;
    use crate::host::{MockHost, MockResponse};
    use crate::requirements::toolchain;
    use std::path::Path;

    fn blender() -> Dependency {
        toolchain(&BootstrapConfig::default(), Path::new("/p"))
            .pop()
            .unwrap()
    }

    #[test]
    fn check_runs_headless_with_exit_code() {
        let argv = exporter_check_command(&blender()).argv(true);
        assert_eq!(argv[0], "blender");
        assert!(argv.contains(&"--background".to_string()));
        assert!(argv.contains(&"--python-exit-code".to_string()));
        assert!(argv.last().unwrap().contains("collada_export"));
    }

    #[test]
    fn successful_check_passes() {
        let dep = blender();
        let line = exporter_check_command(&dep).to_string();
        let host = MockHost::new()
            .with_program("blender", Some("Blender 4.2.1"))
            .on(&line, MockResponse::success());
        verify_exporter(&host, &dep).unwrap();
    }

    #[test]
    fn failing_check_is_exporter_unavailable() {
        let dep = blender();
        let line = exporter_check_command(&dep).to_string();
        let host = MockHost::new()
            .with_program("blender", Some("Blender 4.2.1"))
            .on(
                &line,
                MockResponse::failure(1).stderr("RuntimeError: collada exporter unavailable"),
            );

        let err = verify_exporter(&host, &dep).unwrap_err();
        assert!(matches!(err, BootstrapError::ExporterUnavailable { .. }));
        assert!(err.to_string().contains("collada exporter unavailable"));
    }
}
