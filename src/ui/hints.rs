//! Next-step hints shown at the end of a run.

/// Hint after the toolchain is ready.
pub fn after_success() -> &'static str {
    "Activate the virtual environment, then convert with \
     `python 3dtiles2kmz.py --input <tileset dir> --output <file.kmz>`."
}

/// Hint after a failed run.
pub fn after_failure() -> &'static str {
    "Fix the problem above, then re-run `kmz-bootstrap`."
}
