//! Flame graph data for the web client.
//!
//! This module converts a call tree report into a single nested tree,
//! with every value already formatted for display.

pub mod tree;

// Re-export main types
pub use tree::{build_flame_tree, TreeNode};
