//! Configuration and constants for the CLI and web views.

use std::time::Duration;

/// Node limit for the top table
pub const DEFAULT_TOP_NODE_COUNT: usize = 500;

/// Node limit for the rendered call graph
pub const DEFAULT_GRAPH_NODE_COUNT: usize = 80;

/// Rows printed by the `top` command
pub const DEFAULT_TOP_ROWS: usize = 20;

/// Default listen address for `serve`
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Graph layout program and its output format
pub const DEFAULT_RENDERER_PROGRAM: &str = "dot";
pub const DEFAULT_RENDERER_FORMAT: &str = "svg";

/// Upper bound on a single renderer invocation
pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for fetching a remote snapshot
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Name of the synthetic flame graph root
pub const ROOT_NODE_NAME: &str = "root";

// Content types returned by the web views
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_SVG: &str = "image/svg+xml";
pub const CONTENT_TYPE_DOT: &str = "text/vnd.graphviz";
