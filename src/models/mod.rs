//! Domain model layer
//!
//! Structure:
//! - `resource_kind.rs` - the fixed catalog of discovered kinds
//! - `graph.rs` - node/edge/graph value types for one snapshot
//! - `mod.rs` - public API re-exports

pub mod graph;
pub mod resource_kind;

pub use graph::{ClusterGraph, GraphEdge, GraphNode};
pub use resource_kind::ResourceKind;
