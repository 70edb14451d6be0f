//! Serve command implementation.
//!
//! Loads the snapshot once, then answers the web views from memory until
//! interrupted.

use crate::render::DotRenderer;
use crate::source::load_profile;
use crate::utils::config::{DEFAULT_LISTEN_ADDR, DEFAULT_RENDER_TIMEOUT};
use crate::web::{self, AppState};
use anyhow::{Context, Result};
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Arguments for the serve command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ServeArgs {
    /// Snapshot path or URL
    pub input: String,

    /// Address to listen on
    pub addr: SocketAddr,

    /// Upper bound on one layout program run
    pub render_timeout: Duration,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            input: String::new(),
            addr: DEFAULT_LISTEN_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080))),
            render_timeout: DEFAULT_RENDER_TIMEOUT,
        }
    }
}

/// Execute the serve command
///
/// **Public** - main entry point called from main.rs
pub fn execute_serve(args: ServeArgs) -> Result<()> {
    // Remote snapshots use a blocking client; fetch before the runtime starts.
    let profile = load_profile(&args.input)
        .with_context(|| format!("Failed to load snapshot {}", args.input))?;

    let renderer = DotRenderer::new().with_timeout(args.render_timeout);
    info!(
        "Rendering with {} (timeout {}s)",
        renderer.program(),
        args.render_timeout.as_secs()
    );
    let state = AppState::new(profile, Arc::new(renderer));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(web::serve(args.addr, state))
        .with_context(|| format!("Server on {} failed", args.addr))
}
