//! Graph data structures for the cluster topology snapshot
//!
//! This module provides the domain-side node/edge/graph types produced by a
//! discovery pass. Presentation concerns (positions, display labels) live in
//! the view layer, not here.

use std::collections::{BTreeMap, HashMap};

use kube::ResourceExt;
use serde::Serialize;

use super::resource_kind::ResourceKind;

/// A node in the topology graph, one per discovered cluster object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// Unique identifier, derived from kind prefix, namespace and name
    pub id: String,
    /// Resource kind
    pub kind: ResourceKind,
    /// Resource name
    pub name: String,
    /// Resource namespace, empty for cluster-scoped kinds
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    /// Labels as read from the source object
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl GraphNode {
    /// Create a node, deriving its id from kind, namespace and name
    pub fn new(
        kind: ResourceKind,
        name: &str,
        namespace: &str,
        labels: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: kind.node_id(namespace, name),
            kind,
            name: name.to_string(),
            namespace: namespace.to_string(),
            labels,
        }
    }

    /// Create a node from one fetched Kubernetes object.
    ///
    /// The full label set is copied from the object, so a node is never
    /// emitted half-built.
    pub fn from_object<K: ResourceExt>(kind: ResourceKind, object: &K) -> Self {
        Self::new(
            kind,
            &object.name_any(),
            &object.namespace().unwrap_or_default(),
            object.labels().clone(),
        )
    }
}

/// A directed edge representing one inferred relationship
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    /// Deterministic identifier encoding the rule, namespace and both names
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
}

impl GraphEdge {
    /// Build the edge from `from` (of `source` kind) to `to` (of `target`
    /// kind) inside one namespace.
    ///
    /// Ids come out as `edge:<src-prefix>-><dst-prefix>:<ns>:<from>-><to>`,
    /// so re-running inference on unchanged input reproduces identical ids.
    pub fn link(
        source: ResourceKind,
        target: ResourceKind,
        namespace: &str,
        from: &str,
        to: &str,
    ) -> Self {
        Self {
            id: format!(
                "edge:{}->{}:{}:{}->{}",
                source.id_prefix(),
                target.id_prefix(),
                namespace,
                from,
                to
            ),
            source: source.node_id(namespace, from),
            target: target.node_id(namespace, to),
        }
    }
}

/// The full snapshot of one discovery pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClusterGraph {
    /// All nodes in the graph
    pub nodes: Vec<GraphNode>,
    /// All edges in the graph
    pub edges: Vec<GraphEdge>,
    /// Map from node id to index in the nodes vector
    #[serde(skip)]
    node_index: HashMap<String, usize>,
}

impl ClusterGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph, ignoring duplicates of an already-known id
    pub fn add_node(&mut self, node: GraphNode) {
        if self.node_index.contains_key(&node.id) {
            return;
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    /// Add an edge to the graph
    pub fn add_edge(&mut self, edge: GraphEdge) {
        self.edges.push(edge);
    }

    /// Whether a node with this id is present
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Look up a node by id
    pub fn get_node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).map(|&index| &self.nodes[index])
    }

    /// Sort nodes by catalog kind, namespace and name.
    ///
    /// Concurrent fetching makes the raw node order run-dependent; sorting
    /// here makes output and layout reproducible for a fixed cluster state.
    pub fn sort_nodes(&mut self) {
        self.nodes.sort_by(|a, b| {
            (a.kind, a.namespace.as_str(), a.name.as_str()).cmp(&(
                b.kind,
                b.namespace.as_str(),
                b.name.as_str(),
            ))
        });
        self.node_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect();
    }

    /// Whether the graph holds no nodes and no edges
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
