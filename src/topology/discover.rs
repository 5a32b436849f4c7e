//! Parallel cluster discovery
//!
//! Lists every catalog kind against the cluster API, one concurrent task per
//! kind under a single deadline, and assembles the results into a
//! [`ClusterGraph`]. Failure of any one list call only leaves that kind out
//! of the snapshot; the caller always gets a well-formed (possibly partial,
//! possibly empty) graph back.

use std::mem;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};
use kube::api::ListParams;
use kube::core::NamespaceResourceScope;
use kube::{Api, Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, warn};

use crate::models::{ClusterGraph, GraphNode, ResourceKind};

use super::relate;

/// Scope of one discovery request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NamespaceFilter {
    /// Discover across every namespace in the cluster
    #[default]
    All,
    /// Restrict namespaced kinds to a single namespace
    Named(String),
}

impl NamespaceFilter {
    /// Parse the request form: `""` and `"all"` mean cluster-wide, anything
    /// else names one namespace.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "all" => NamespaceFilter::All,
            ns => NamespaceFilter::Named(ns.to_string()),
        }
    }

    /// Namespace argument for list calls, `None` meaning all namespaces
    pub fn scope(&self) -> Option<&str> {
        match self {
            NamespaceFilter::All => None,
            NamespaceFilter::Named(ns) => Some(ns.as_str()),
        }
    }
}

/// Typed resource lists retained from the fetch phase for edge inference
#[derive(Debug, Clone, Default)]
pub struct ResourceSets {
    pub deployments: Vec<Deployment>,
    pub stateful_sets: Vec<StatefulSet>,
    pub daemon_sets: Vec<DaemonSet>,
    pub replica_sets: Vec<ReplicaSet>,
    pub pods: Vec<Pod>,
    pub services: Vec<Service>,
    pub autoscalers: Vec<HorizontalPodAutoscaler>,
}

/// Shared state the fetch tasks write into, owned by one discovery pass
#[derive(Debug, Default)]
struct Accumulator {
    graph: ClusterGraph,
    sets: ResourceSets,
}

/// Discover the cluster and build its topology graph.
///
/// One list call per catalog kind runs concurrently, all bounded by
/// `timeout`. The Namespace list acts as a gate: if it fails, no namespaced
/// kind is fetched for this pass, while physical Node discovery still runs.
/// The returned graph is sorted by kind, namespace and name so identical
/// cluster state yields identical output.
pub async fn discover(client: Client, filter: &NamespaceFilter, timeout: Duration) -> ClusterGraph {
    let deadline = Instant::now() + timeout;
    let shared = Arc::new(Mutex::new(Accumulator::default()));

    // Physical nodes are cluster-scoped and not subject to the namespace gate.
    let mut handles = vec![spawn_node_list(client.clone(), deadline, Arc::clone(&shared))];

    if list_namespaces(&client, filter, deadline, &shared).await {
        handles.extend(spawn_namespaced_lists(&client, filter, deadline, &shared));
    }

    join_all(handles).await;

    let Accumulator { mut graph, mut sets } = mem::take(&mut *shared.lock().await);
    graph.sort_nodes();
    sort_sets(&mut sets);
    for edge in relate::infer_edges(&sets) {
        graph.add_edge(edge);
    }

    debug!(
        "Topology discovery complete: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );
    graph
}

/// List namespaces and emit their nodes, honoring the filter.
///
/// Returns whether namespaced discovery may proceed.
async fn list_namespaces(
    client: &Client,
    filter: &NamespaceFilter,
    deadline: Instant,
    shared: &Arc<Mutex<Accumulator>>,
) -> bool {
    let api: Api<Namespace> = Api::all(client.clone());
    match timeout_at(deadline, api.list(&ListParams::default())).await {
        Ok(Ok(list)) => {
            let mut acc = shared.lock().await;
            for ns in &list.items {
                if let NamespaceFilter::Named(wanted) = filter {
                    if ns.name_any() != *wanted {
                        continue;
                    }
                }
                acc.graph
                    .add_node(GraphNode::from_object(ResourceKind::Namespace, ns));
            }
            true
        }
        Ok(Err(err)) => {
            warn!(
                "Failed to list namespaces, skipping namespaced discovery: {}",
                err
            );
            false
        }
        Err(_) => {
            warn!("Namespace listing timed out, skipping namespaced discovery");
            false
        }
    }
}

fn spawn_node_list(
    client: Client,
    deadline: Instant,
    shared: Arc<Mutex<Accumulator>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let api: Api<Node> = Api::all(client);
        match timeout_at(deadline, api.list(&ListParams::default())).await {
            Ok(Ok(list)) => {
                let mut acc = shared.lock().await;
                for node in &list.items {
                    acc.graph
                        .add_node(GraphNode::from_object(ResourceKind::Node, node));
                }
            }
            Ok(Err(err)) => warn!("Failed to list nodes: {}", err),
            Err(_) => warn!("Node listing timed out"),
        }
    })
}

/// Fan out one list task per namespaced catalog kind
fn spawn_namespaced_lists(
    client: &Client,
    filter: &NamespaceFilter,
    deadline: Instant,
    shared: &Arc<Mutex<Accumulator>>,
) -> Vec<JoinHandle<()>> {
    let scope = filter.scope().map(str::to_string);
    vec![
        spawn_list(
            client.clone(),
            scope.clone(),
            deadline,
            Arc::clone(shared),
            ResourceKind::Deployment,
            |acc, items: Vec<Deployment>| acc.sets.deployments = items,
        ),
        spawn_list(
            client.clone(),
            scope.clone(),
            deadline,
            Arc::clone(shared),
            ResourceKind::StatefulSet,
            |acc, items: Vec<StatefulSet>| acc.sets.stateful_sets = items,
        ),
        spawn_list(
            client.clone(),
            scope.clone(),
            deadline,
            Arc::clone(shared),
            ResourceKind::DaemonSet,
            |acc, items: Vec<DaemonSet>| acc.sets.daemon_sets = items,
        ),
        spawn_list(
            client.clone(),
            scope.clone(),
            deadline,
            Arc::clone(shared),
            ResourceKind::ReplicaSet,
            |acc, items: Vec<ReplicaSet>| acc.sets.replica_sets = items,
        ),
        spawn_list(
            client.clone(),
            scope.clone(),
            deadline,
            Arc::clone(shared),
            ResourceKind::Pod,
            |acc, items: Vec<Pod>| acc.sets.pods = items,
        ),
        spawn_list(
            client.clone(),
            scope.clone(),
            deadline,
            Arc::clone(shared),
            ResourceKind::Service,
            |acc, items: Vec<Service>| acc.sets.services = items,
        ),
        spawn_list(
            client.clone(),
            scope,
            deadline,
            Arc::clone(shared),
            ResourceKind::HorizontalPodAutoscaler,
            |acc, items: Vec<HorizontalPodAutoscaler>| acc.sets.autoscalers = items,
        ),
    ]
}

/// List one namespaced kind and record both its graph nodes and its typed
/// items. On failure the kind is logged and simply left out of the snapshot.
fn spawn_list<K, F>(
    client: Client,
    scope: Option<String>,
    deadline: Instant,
    shared: Arc<Mutex<Accumulator>>,
    kind: ResourceKind,
    store: F,
) -> JoinHandle<()>
where
    K: Resource<Scope = NamespaceResourceScope>
        + Clone
        + DeserializeOwned
        + std::fmt::Debug
        + Send
        + 'static,
    K::DynamicType: Default,
    F: FnOnce(&mut Accumulator, Vec<K>) + Send + 'static,
{
    tokio::spawn(async move {
        let api: Api<K> = match scope.as_deref() {
            Some(ns) => Api::namespaced(client, ns),
            None => Api::all(client),
        };
        match timeout_at(deadline, api.list(&ListParams::default())).await {
            Ok(Ok(list)) => {
                let mut acc = shared.lock().await;
                for item in &list.items {
                    acc.graph.add_node(GraphNode::from_object(kind, item));
                }
                store(&mut acc, list.items);
            }
            Ok(Err(err)) => warn!("Failed to list {}: {}", kind, err),
            Err(_) => warn!("Listing {} timed out", kind),
        }
    })
}

/// Sort every typed list by namespace and name so inference emits edges in a
/// reproducible order.
fn sort_sets(sets: &mut ResourceSets) {
    sort_by_ns_name(&mut sets.deployments);
    sort_by_ns_name(&mut sets.stateful_sets);
    sort_by_ns_name(&mut sets.daemon_sets);
    sort_by_ns_name(&mut sets.replica_sets);
    sort_by_ns_name(&mut sets.pods);
    sort_by_ns_name(&mut sets.services);
    sort_by_ns_name(&mut sets.autoscalers);
}

fn sort_by_ns_name<K: ResourceExt>(items: &mut [K]) {
    items.sort_by_key(|item| (item.namespace().unwrap_or_default(), item.name_any()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parse() {
        assert_eq!(NamespaceFilter::parse(""), NamespaceFilter::All);
        assert_eq!(NamespaceFilter::parse("all"), NamespaceFilter::All);
        assert_eq!(
            NamespaceFilter::parse("kube-system"),
            NamespaceFilter::Named("kube-system".to_string())
        );
    }

    #[test]
    fn test_filter_scope() {
        assert_eq!(NamespaceFilter::All.scope(), None);
        assert_eq!(
            NamespaceFilter::Named("prod".to_string()).scope(),
            Some("prod")
        );
    }

    #[test]
    fn test_default_filter_is_cluster_wide() {
        assert_eq!(NamespaceFilter::default(), NamespaceFilter::All);
    }
}
