//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands load a snapshot, generate the report for their view and write
//! the result to a file, the terminal or the network.

pub mod dot;
pub mod flame;
pub mod serve;
pub mod top;

use crate::parser::LoadedProfile;
use crate::report::{generate_report, Report, ReportRequest};
use anyhow::Result;

// Re-export main command functions
pub use dot::{execute_dot, validate_dot_args, DotArgs};
pub use flame::{execute_flame, FlameArgs};
pub use serve::{execute_serve, ServeArgs};
pub use top::{execute_top, validate_top_args, TopArgs};

/// Generate a report, folding every diagnostic into one error
///
/// **Private (crate)** - shared by the file-producing commands
pub(crate) fn report_for(profile: &LoadedProfile, request: ReportRequest) -> Result<Report> {
    generate_report(&profile.graph, &profile.options, request)
        .map_err(|errors| anyhow::anyhow!("error generating report: {}", errors.join(";")))
}
