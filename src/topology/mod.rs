//! Cluster topology discovery
//!
//! The three phases of one snapshot, in order:
//! - `discover.rs` - parallel per-kind fetch under a shared deadline
//! - `relate.rs` - pure edge inference over the fetched sets
//! - `view.rs` - grid layout and display metadata for rendering

pub mod discover;
pub mod relate;
pub mod view;

pub use discover::{NamespaceFilter, ResourceSets, discover};
pub use relate::infer_edges;
pub use view::{GridLayout, TopologyView, render};
