//! Top command implementation.
//!
//! Prints the ranked flat list as a table, or writes it as JSON.

use super::report_for;
use crate::output::{render_top_table, write_json};
use crate::report::{text_items, ReportRequest, SortOrder};
use crate::source::load_profile;
use crate::utils::config::{DEFAULT_TOP_NODE_COUNT, DEFAULT_TOP_ROWS};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Arguments for the top command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TopArgs {
    /// Snapshot path or URL
    pub input: String,

    /// Nodes kept after trimming
    pub node_count: usize,

    /// Ranking order
    pub sort: SortOrder,

    /// Rows to print
    pub rows: usize,

    /// Write rows as JSON here instead of printing a table
    pub json: Option<PathBuf>,
}

impl Default for TopArgs {
    fn default() -> Self {
        Self {
            input: String::new(),
            node_count: DEFAULT_TOP_NODE_COUNT,
            sort: SortOrder::Flat,
            rows: DEFAULT_TOP_ROWS,
            json: None,
        }
    }
}

/// Execute the top command
///
/// **Public** - main entry point called from main.rs
pub fn execute_top(args: TopArgs) -> Result<()> {
    let profile = load_profile(&args.input)
        .with_context(|| format!("Failed to load snapshot {}", args.input))?;

    let request = ReportRequest::top()
        .with_node_limit(args.node_count)
        .with_sort(args.sort);
    let report = report_for(&profile, request)?;
    let items = text_items(&report);
    debug!("Ranked {} nodes by {}", items.len(), args.sort);

    match &args.json {
        Some(path) => {
            write_json(&items, path).context("Failed to write top table JSON")?;
            info!("✓ Top table written to: {}", path.display());
        }
        None => {
            for line in report.legend() {
                println!("{}", line);
            }
            println!("{}", render_top_table(&items, report.total, args.rows));
        }
    }

    Ok(())
}

/// Validate top arguments
///
/// **Public** - can be called before execute_top for early validation
pub fn validate_top_args(args: &TopArgs) -> Result<()> {
    if args.input.is_empty() {
        anyhow::bail!("Input snapshot cannot be empty");
    }
    if args.node_count == 0 {
        anyhow::bail!("nodecount must be greater than 0");
    }
    if args.rows == 0 {
        anyhow::bail!("rows must be greater than 0");
    }
    Ok(())
}
