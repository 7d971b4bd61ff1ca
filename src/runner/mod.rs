//! Bootstrap orchestration.
//!
//! - [`orchestrator`] - Per-dependency sequencing and halting
//! - [`environment`] - Python virtual environment setup
//! - [`exporter`] - Collada exporter capability check
//! - [`report`] - Run report and exit status

pub mod environment;
pub mod exporter;
pub mod orchestrator;
pub mod report;

pub use orchestrator::Bootstrap;
pub use report::RunReport;
