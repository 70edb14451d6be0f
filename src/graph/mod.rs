//! Call graph model consumed by the report views.
//!
//! This module provides:
//! - The node/edge arena (`Graph`, `GraphBuilder`)
//! - Call tree validation (`Forest`)
//! - Function name shortening for display
//! - DOT composition for the layout renderer

pub mod dot;
pub mod forest;
pub mod model;
pub mod shorten;

// Re-export main types
pub use dot::{compose_dot, DotConfig};
pub use forest::Forest;
pub use model::{Edge, EdgeMap, Graph, GraphBuilder, Node, NodeId, NodeInfo};
pub use shorten::shorten_function_name;
