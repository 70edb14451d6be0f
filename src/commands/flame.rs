//! Flame command implementation.
//!
//! Builds the flame graph tree from the untrimmed call tree and writes it
//! as JSON, to a file or stdout.

use super::report_for;
use crate::flamegraph::build_flame_tree;
use crate::output::{to_json_string, write_json};
use crate::report::ReportRequest;
use crate::source::load_profile;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for the flame command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct FlameArgs {
    /// Snapshot path or URL
    pub input: String,

    /// Output path for the tree JSON (stdout when absent)
    pub output: Option<PathBuf>,
}

/// Execute the flame command
///
/// **Public** - main entry point called from main.rs
pub fn execute_flame(args: FlameArgs) -> Result<()> {
    let profile = load_profile(&args.input)
        .with_context(|| format!("Failed to load snapshot {}", args.input))?;

    let report = report_for(&profile, ReportRequest::flamegraph())?;
    let forest = report
        .forest()
        .context("Report was not generated in call tree mode")?;
    let tree = build_flame_tree(forest, report.total, &report.formatter());
    info!("Flame graph has {} nodes", tree.node_count());

    match &args.output {
        Some(path) => {
            write_json(&tree, path).context("Failed to write flame graph JSON")?;
            info!("✓ Flame graph written to: {}", path.display());
        }
        None => println!("{}", to_json_string(&tree)?),
    }

    Ok(())
}
