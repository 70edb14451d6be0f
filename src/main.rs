//! flameview CLI
//!
//! Turns aggregated call graph snapshots into flame graph trees, ranked
//! top tables and rendered call graphs, on the command line or over HTTP.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use flameview::commands::{
    execute_dot, execute_flame, execute_serve, execute_top, validate_dot_args,
    validate_top_args, DotArgs, FlameArgs, ServeArgs, TopArgs,
};
use flameview::report::SortOrder;
use flameview::utils::config::{
    DEFAULT_GRAPH_NODE_COUNT, DEFAULT_LISTEN_ADDR, DEFAULT_TOP_NODE_COUNT, DEFAULT_TOP_ROWS,
};

/// flameview - flame graphs and top tables from call graph snapshots
#[derive(Parser, Debug)]
#[command(name = "flameview")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the top, flame graph and call graph views over HTTP
    Serve {
        /// Snapshot path or http(s) URL
        input: String,

        /// Address to listen on
        #[arg(short, long, env = "FLAMEVIEW_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
        addr: SocketAddr,

        /// Seconds allowed for one graphviz run
        #[arg(long, default_value = "30")]
        dot_timeout: u64,
    },

    /// Print the ranked flat list
    Top {
        /// Snapshot path or http(s) URL
        input: String,

        /// Nodes kept after trimming
        #[arg(short, long, default_value_t = DEFAULT_TOP_NODE_COUNT)]
        nodecount: usize,

        /// Rank by `flat` or `cum`
        #[arg(short, long, default_value = "flat")]
        sort: SortOrder,

        /// Rows to print
        #[arg(short, long, default_value_t = DEFAULT_TOP_ROWS)]
        rows: usize,

        /// Write rows as JSON instead of printing a table
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Write the flame graph tree as JSON
    Flame {
        /// Snapshot path or http(s) URL
        input: String,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the call graph as DOT, or as SVG via graphviz
    Dot {
        /// Snapshot path or http(s) URL
        input: String,

        /// Output path ending in .dot, .gv or .svg
        #[arg(short, long, default_value = "graph.svg")]
        output: PathBuf,

        /// Nodes kept after trimming
        #[arg(short, long, default_value_t = DEFAULT_GRAPH_NODE_COUNT)]
        nodecount: usize,

        /// Seconds allowed for the graphviz run
        #[arg(long, default_value = "30")]
        dot_timeout: u64,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Serve {
            input,
            addr,
            dot_timeout,
        } => {
            execute_serve(ServeArgs {
                input,
                addr,
                render_timeout: Duration::from_secs(dot_timeout),
            })?;
        }

        Commands::Top {
            input,
            nodecount,
            sort,
            rows,
            json,
        } => {
            let args = TopArgs {
                input,
                node_count: nodecount,
                sort,
                rows,
                json,
            };
            validate_top_args(&args)?;
            execute_top(args)?;
        }

        Commands::Flame { input, output } => {
            execute_flame(FlameArgs { input, output })?;
        }

        Commands::Dot {
            input,
            output,
            nodecount,
            dot_timeout,
        } => {
            let args = DotArgs {
                input,
                output,
                node_count: nodecount,
                timeout: Duration::from_secs(dot_timeout),
            };
            validate_dot_args(&args)?;
            execute_dot(args)?;
        }
    }

    Ok(())
}
