//! Snapshot parsing and schema definitions.
//!
//! This module handles:
//! - Defining the call graph snapshot schema
//! - Validating node ids, edge endpoints and divisors
//! - Converting snapshots into `Graph` + `ReportOptions`

pub mod schema;
pub mod snapshot;

// Re-export main types
pub use schema::{Snapshot, SnapshotEdge, SnapshotNode};
pub use snapshot::{from_snapshot, parse_snapshot, LoadedProfile};
