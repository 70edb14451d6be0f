//! Dot command implementation.
//!
//! Writes the trimmed call graph as DOT, or as SVG rendered by the layout
//! program when the output path ends in `.svg`.

use super::report_for;
use crate::graph::compose_dot;
use crate::output::write_bytes;
use crate::render::{strip_prolog, DotRenderer, Renderer};
use crate::report::ReportRequest;
use crate::source::load_profile;
use crate::utils::config::{DEFAULT_GRAPH_NODE_COUNT, DEFAULT_RENDER_TIMEOUT};
use crate::web::RENDERER_UNAVAILABLE_MESSAGE;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Arguments for the dot command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct DotArgs {
    /// Snapshot path or URL
    pub input: String,

    /// `.dot`/`.gv` for the description, `.svg` for a rendered image
    pub output: PathBuf,

    /// Nodes kept after trimming
    pub node_count: usize,

    /// Upper bound on the layout program run
    pub timeout: Duration,
}

impl Default for DotArgs {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: PathBuf::from("graph.svg"),
            node_count: DEFAULT_GRAPH_NODE_COUNT,
            timeout: DEFAULT_RENDER_TIMEOUT,
        }
    }
}

/// Execute the dot command
///
/// **Public** - main entry point called from main.rs
pub fn execute_dot(args: DotArgs) -> Result<()> {
    let profile = load_profile(&args.input)
        .with_context(|| format!("Failed to load snapshot {}", args.input))?;

    let report = report_for(
        &profile,
        ReportRequest::graph().with_node_limit(args.node_count),
    )?;
    let dot = compose_dot(&report.graph, &report.dot_config());
    debug!("DOT description is {} bytes", dot.len());

    let content = if wants_svg(&args.output) {
        render_svg(dot.as_bytes(), args.timeout)?
    } else {
        dot.into_bytes()
    };

    write_bytes(&content, &args.output).context("Failed to write call graph")?;
    info!("✓ Call graph written to: {}", args.output.display());

    Ok(())
}

fn render_svg(description: &[u8], timeout: Duration) -> Result<Vec<u8>> {
    let renderer = DotRenderer::new().with_timeout(timeout);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    match runtime.block_on(renderer.render(description)) {
        Ok(svg) => Ok(strip_prolog(&svg)),
        Err(e) if e.is_unavailable() => {
            Err(anyhow::Error::new(e).context(RENDERER_UNAVAILABLE_MESSAGE))
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to render call graph")),
    }
}

fn wants_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

/// Validate dot arguments
///
/// **Public** - can be called before execute_dot for early validation
pub fn validate_dot_args(args: &DotArgs) -> Result<()> {
    if args.input.is_empty() {
        anyhow::bail!("Input snapshot cannot be empty");
    }
    if args.node_count == 0 {
        anyhow::bail!("nodecount must be greater than 0");
    }
    if args.timeout.is_zero() {
        anyhow::bail!("Render timeout must be greater than 0");
    }

    let ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("dot") | Some("gv") | Some("svg") => Ok(()),
        _ => anyhow::bail!(
            "Output must end in .dot, .gv or .svg: {}",
            args.output.display()
        ),
    }
}
