//! Kubetopo Library
//!
//! This library discovers the workload topology of a Kubernetes cluster and
//! renders it as a graph. It can be used both as a binary and as a library
//! for testing.

pub mod cli;
pub mod config;
pub mod kube;
pub mod models;
pub mod topology;

// Re-export commonly used types for convenience
pub use models::{ClusterGraph, GraphEdge, GraphNode, ResourceKind};
pub use topology::{
    GridLayout, NamespaceFilter, ResourceSets, TopologyView, discover, infer_edges, render,
};
