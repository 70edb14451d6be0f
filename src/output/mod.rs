//! Output writers for report views.
//!
//! This module handles writing data to disk and the terminal:
//! - JSON views (flame graph tree, top table)
//! - DOT descriptions and rendered SVG
//! - Text top tables

pub mod image;
pub mod json;
pub mod text;

// Re-export main functions
pub use image::write_bytes;
pub use json::{to_json_string, write_json};
pub use text::render_top_table;
