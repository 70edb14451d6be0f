//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while assembling or validating a call graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("edge references unknown node {0}")]
    UnknownNode(usize),

    #[error("node {name} has {count} callers; call tree mode allows at most one")]
    MultipleCallers { name: String, count: usize },

    #[error("node {0} is part of a cycle")]
    Cycle(String),
}

/// Errors that can occur while loading a graph snapshot
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid snapshot format: {0}")]
    InvalidFormat(String),

    #[error("Invalid graph: {0}")]
    InvalidGraph(#[from] GraphError),
}

/// Errors that can occur while fetching a snapshot from a file or URL
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    BadStatus { url: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that can occur while invoking the external graph renderer
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{program} not found; may need to install graphviz")]
    Unavailable { program: String },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("{program} did not finish within {seconds}s")]
    TimedOut { program: String, seconds: u64 },

    #[error("IO error talking to {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// True when the renderer binary itself is missing
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RenderError::Unavailable { .. })
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
