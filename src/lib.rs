//! flameview
//!
//! Views over an aggregated profiling call graph:
//!
//! - a flame graph tree under a synthetic `root` (`flamegraph`)
//! - a ranked flat "top" list (`report`)
//! - a DOT call graph, optionally rendered to SVG by graphviz (`graph`, `render`)
//!
//! The `web` module serves all three over HTTP; the `flameview` binary
//! exposes them on the command line.
//!
//! ## Getting Started
//!
//! ```bash
//! flameview serve cpu.json
//! flameview top cpu.json --sort cum
//! ```

pub mod commands;
pub mod flamegraph;
pub mod graph;
pub mod measurement;
pub mod output;
pub mod parser;
pub mod render;
pub mod report;
pub mod source;
pub mod utils;
pub mod web;
