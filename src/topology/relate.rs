//! Relationship inference over fetched cluster resources
//!
//! Pure functions only: everything here operates on in-memory resource sets
//! produced by the fetch phase, never on the live API. All rules are
//! namespace-scoped, so resources in different namespaces are never linked.

use std::collections::{BTreeMap, HashMap, HashSet};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::ResourceExt;

use crate::models::{GraphEdge, ResourceKind};

use super::discover::ResourceSets;

/// Derive every edge of the topology graph from the fetched resource sets.
///
/// Rules, in emission order:
/// - Service -> Pod, by label selector
/// - Deployment -> ReplicaSet -> Pod, two hops over owner references
/// - StatefulSet -> Pod and DaemonSet -> Pod, by owner reference
/// - HPA -> Deployment/StatefulSet, by scale-target reference
///
/// Missing kinds (a failed list call leaves the set empty) simply contribute
/// no edges. Re-running on unchanged sets yields the identical edge sequence.
pub fn infer_edges(sets: &ResourceSets) -> Vec<GraphEdge> {
    let mut edges = Vec::new();

    // Grouping once by namespace avoids all-pairs scans across the cluster.
    let pods_by_ns = group_by_namespace(&sets.pods);
    let replica_sets_by_ns = group_by_namespace(&sets.replica_sets);

    // Service -> Pod
    for service in &sets.services {
        let ns = service.namespace().unwrap_or_default();
        let Some(selector) = service.spec.as_ref().and_then(|spec| spec.selector.as_ref()) else {
            continue;
        };
        if selector.is_empty() {
            continue;
        }
        for pod in pods_by_ns.get(&ns).into_iter().flatten() {
            if selector_matches(selector, pod.labels()) {
                edges.push(GraphEdge::link(
                    ResourceKind::Service,
                    ResourceKind::Pod,
                    &ns,
                    &service.name_any(),
                    &pod.name_any(),
                ));
            }
        }
    }

    // Deployment -> ReplicaSet, remembering which ReplicaSets got linked
    let mut linked_replica_sets: Vec<(String, String)> = Vec::new();
    let mut seen_replica_sets: HashSet<(String, String)> = HashSet::new();
    for deployment in &sets.deployments {
        let ns = deployment.namespace().unwrap_or_default();
        let name = deployment.name_any();
        for rs in replica_sets_by_ns.get(&ns).into_iter().flatten() {
            if owner_ref_matches(rs.owner_references(), "Deployment", &name) {
                edges.push(GraphEdge::link(
                    ResourceKind::Deployment,
                    ResourceKind::ReplicaSet,
                    &ns,
                    &name,
                    &rs.name_any(),
                ));
                let key = (ns.clone(), rs.name_any());
                if seen_replica_sets.insert(key.clone()) {
                    linked_replica_sets.push(key);
                }
            }
        }
    }

    // ReplicaSet -> Pod, only for ReplicaSets reached through a Deployment.
    // Each linked ReplicaSet is visited once even when several Deployments
    // claim it, so pod edges are never duplicated.
    for (ns, rs_name) in &linked_replica_sets {
        for pod in pods_by_ns.get(ns).into_iter().flatten() {
            if owner_ref_matches(pod.owner_references(), "ReplicaSet", rs_name) {
                edges.push(GraphEdge::link(
                    ResourceKind::ReplicaSet,
                    ResourceKind::Pod,
                    ns,
                    rs_name,
                    &pod.name_any(),
                ));
            }
        }
    }

    // StatefulSet -> Pod
    for sts in &sets.stateful_sets {
        let ns = sts.namespace().unwrap_or_default();
        let name = sts.name_any();
        for pod in pods_by_ns.get(&ns).into_iter().flatten() {
            if owner_ref_matches(pod.owner_references(), "StatefulSet", &name) {
                edges.push(GraphEdge::link(
                    ResourceKind::StatefulSet,
                    ResourceKind::Pod,
                    &ns,
                    &name,
                    &pod.name_any(),
                ));
            }
        }
    }

    // DaemonSet -> Pod
    for ds in &sets.daemon_sets {
        let ns = ds.namespace().unwrap_or_default();
        let name = ds.name_any();
        for pod in pods_by_ns.get(&ns).into_iter().flatten() {
            if owner_ref_matches(pod.owner_references(), "DaemonSet", &name) {
                edges.push(GraphEdge::link(
                    ResourceKind::DaemonSet,
                    ResourceKind::Pod,
                    &ns,
                    &name,
                    &pod.name_any(),
                ));
            }
        }
    }

    // HPA -> scale target. The target must have been fetched in the HPA's
    // own namespace, otherwise the edge would dangle.
    let deployment_ids: HashSet<String> = sets
        .deployments
        .iter()
        .map(|d| node_id_of(ResourceKind::Deployment, d))
        .collect();
    let stateful_set_ids: HashSet<String> = sets
        .stateful_sets
        .iter()
        .map(|s| node_id_of(ResourceKind::StatefulSet, s))
        .collect();
    for hpa in &sets.autoscalers {
        let ns = hpa.namespace().unwrap_or_default();
        let Some(target) = hpa.spec.as_ref().map(|spec| &spec.scale_target_ref) else {
            continue;
        };
        match target.kind.as_str() {
            "Deployment" => {
                if deployment_ids.contains(&ResourceKind::Deployment.node_id(&ns, &target.name)) {
                    edges.push(GraphEdge::link(
                        ResourceKind::HorizontalPodAutoscaler,
                        ResourceKind::Deployment,
                        &ns,
                        &hpa.name_any(),
                        &target.name,
                    ));
                }
            }
            "StatefulSet" => {
                if stateful_set_ids.contains(&ResourceKind::StatefulSet.node_id(&ns, &target.name))
                {
                    edges.push(GraphEdge::link(
                        ResourceKind::HorizontalPodAutoscaler,
                        ResourceKind::StatefulSet,
                        &ns,
                        &hpa.name_any(),
                        &target.name,
                    ));
                }
            }
            // Any other scale-target kind is outside the catalog.
            _ => {}
        }
    }

    edges
}

/// Exact per-key equality between a selector and an object's labels.
///
/// An empty selector matches nothing; extra labels on the object are
/// irrelevant.
pub fn selector_matches(
    selector: &BTreeMap<String, String>,
    labels: &BTreeMap<String, String>,
) -> bool {
    if selector.is_empty() {
        return false;
    }
    selector
        .iter()
        .all(|(key, value)| labels.get(key) == Some(value))
}

/// Whether any owner reference names exactly this kind and name
pub fn owner_ref_matches(refs: &[OwnerReference], kind: &str, name: &str) -> bool {
    refs.iter().any(|r| r.kind == kind && r.name == name)
}

fn group_by_namespace<K: ResourceExt>(items: &[K]) -> HashMap<String, Vec<&K>> {
    let mut grouped: HashMap<String, Vec<&K>> = HashMap::new();
    for item in items {
        grouped
            .entry(item.namespace().unwrap_or_default())
            .or_default()
            .push(item);
    }
    grouped
}

fn node_id_of<K: ResourceExt>(kind: ResourceKind, object: &K) -> String {
    kind.node_id(&object.namespace().unwrap_or_default(), &object.name_any())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn owner(kind: &str, name: &str) -> OwnerReference {
        OwnerReference {
            api_version: "apps/v1".to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_selector_matches_subset() {
        let selector = map(&[("app", "web")]);
        let labels = map(&[("app", "web"), ("tier", "frontend")]);
        assert!(selector_matches(&selector, &labels));
    }

    #[test]
    fn test_selector_requires_exact_values() {
        let selector = map(&[("app", "web"), ("tier", "frontend")]);
        assert!(!selector_matches(&selector, &map(&[("app", "web")])));
        assert!(!selector_matches(
            &selector,
            &map(&[("app", "web"), ("tier", "backend")])
        ));
    }

    #[test]
    fn test_empty_selector_matches_nothing() {
        let labels = map(&[("app", "web")]);
        assert!(!selector_matches(&BTreeMap::new(), &labels));
        assert!(!selector_matches(&BTreeMap::new(), &BTreeMap::new()));
    }

    #[test]
    fn test_owner_ref_matches_any_entry() {
        let refs = vec![owner("Deployment", "api"), owner("ReplicaSet", "api-7f9c")];
        assert!(owner_ref_matches(&refs, "ReplicaSet", "api-7f9c"));
        assert!(owner_ref_matches(&refs, "Deployment", "api"));
        assert!(!owner_ref_matches(&refs, "ReplicaSet", "other"));
        assert!(!owner_ref_matches(&refs, "StatefulSet", "api"));
        assert!(!owner_ref_matches(&[], "Deployment", "api"));
    }
}
