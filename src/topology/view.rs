//! Renderable topology view
//!
//! Converts a [`ClusterGraph`] into the node/edge structure graph front ends
//! consume: every node gets a 2-D position and a display payload, every edge
//! is mirrored 1:1. The layout is a deterministic grid, not a real
//! graph-layout algorithm.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ClusterGraph;

/// Grid parameters for the placeholder layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    /// Vertical distance between consecutive nodes in one column
    #[serde(default = "default_row_step")]
    pub row_step: f64,

    /// Number of nodes per column before wrapping
    #[serde(default = "default_rows_per_column")]
    pub rows_per_column: usize,

    /// Horizontal distance between columns
    #[serde(default = "default_column_step")]
    pub column_step: f64,
}

fn default_row_step() -> f64 {
    60.0
}

fn default_rows_per_column() -> usize {
    20
}

fn default_column_step() -> f64 {
    250.0
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            row_step: default_row_step(),
            rows_per_column: default_rows_per_column(),
            column_step: default_column_step(),
        }
    }
}

/// A renderable node wrapping one graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    pub data: NodeData,
}

/// 2-D layout coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Display payload carried by each view node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    pub namespace: String,
    pub kind: String,
    pub labels: BTreeMap<String, String>,
}

/// A renderable edge, identical in id/source/target to its graph edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// The externally-consumable topology view
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TopologyView {
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
}

/// Lay the graph out on a grid and attach display metadata.
///
/// Node ids pass through unchanged so consumers can correlate view nodes
/// with graph nodes. Positions depend only on the node order and the grid
/// parameters.
pub fn render(graph: &ClusterGraph, layout: &GridLayout) -> TopologyView {
    // A zero row limit would divide by zero; clamp to one node per column.
    let rows = layout.rows_per_column.max(1);

    let nodes = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let column = index / rows;
            let row = index % rows;
            ViewNode {
                id: node.id.clone(),
                node_type: "default".to_string(),
                position: Position {
                    x: column as f64 * layout.column_step,
                    y: row as f64 * layout.row_step,
                },
                data: NodeData {
                    label: format!("{}: {}", node.kind, node.name),
                    namespace: node.namespace.clone(),
                    kind: node.kind.to_string(),
                    labels: node.labels.clone(),
                },
            }
        })
        .collect();

    let edges = graph
        .edges
        .iter()
        .map(|edge| ViewEdge {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
        })
        .collect();

    TopologyView { nodes, edges }
}
