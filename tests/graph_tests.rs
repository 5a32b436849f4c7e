//! Graph assembly tests
//!
//! Tests for node id derivation, deduplication, deterministic ordering, and
//! the serialized graph shape.

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{Deployment, ReplicaSet};
use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use serde_json::json;

use kubetopo::models::{ClusterGraph, GraphEdge, GraphNode, ResourceKind};
use kubetopo::topology::{ResourceSets, infer_edges};

fn label_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn node(kind: ResourceKind, namespace: &str, name: &str) -> GraphNode {
    GraphNode::new(kind, name, namespace, BTreeMap::new())
}

#[test]
fn test_node_id_schemes() {
    let cases = [
        (ResourceKind::Node, "", "worker-1", "node:worker-1"),
        (ResourceKind::Namespace, "", "prod", "ns:prod"),
        (ResourceKind::Deployment, "prod", "api", "deploy:prod:api"),
        (ResourceKind::StatefulSet, "prod", "db", "sts:prod:db"),
        (ResourceKind::DaemonSet, "prod", "fluentd", "ds:prod:fluentd"),
        (ResourceKind::ReplicaSet, "prod", "api-7f9c", "rs:prod:api-7f9c"),
        (ResourceKind::Pod, "prod", "api-7f9c-x1", "pod:prod:api-7f9c-x1"),
        (ResourceKind::Service, "prod", "web", "svc:prod:web"),
        (
            ResourceKind::HorizontalPodAutoscaler,
            "prod",
            "api-hpa",
            "hpa:prod:api-hpa",
        ),
    ];

    for (kind, namespace, name, expected) in cases {
        assert_eq!(node(kind, namespace, name).id, expected);
    }
}

#[test]
fn test_graph_starts_empty() {
    let graph = ClusterGraph::new();
    assert!(graph.nodes.is_empty());
    assert!(graph.edges.is_empty());
    assert!(graph.is_empty());
}

#[test]
fn test_add_node_ignores_duplicate_ids() {
    let mut graph = ClusterGraph::new();
    graph.add_node(node(ResourceKind::Pod, "default", "web-1"));
    graph.add_node(GraphNode::new(
        ResourceKind::Pod,
        "web-1",
        "default",
        label_map(&[("late", "arrival")]),
    ));

    assert_eq!(graph.nodes.len(), 1);
    // The first registration wins.
    let kept = graph.get_node("pod:default:web-1").unwrap();
    assert!(kept.labels.is_empty());
}

#[test]
fn test_sort_nodes_orders_by_kind_namespace_name() {
    let mut graph = ClusterGraph::new();
    graph.add_node(node(ResourceKind::Pod, "default", "web-1"));
    graph.add_node(node(ResourceKind::Deployment, "prod", "api"));
    graph.add_node(node(ResourceKind::Deployment, "dev", "api"));
    graph.add_node(node(ResourceKind::Namespace, "", "prod"));
    graph.add_node(node(ResourceKind::Node, "", "worker-1"));
    graph.add_node(node(ResourceKind::Deployment, "dev", "worker"));

    graph.sort_nodes();

    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        [
            "node:worker-1",
            "ns:prod",
            "deploy:dev:api",
            "deploy:dev:worker",
            "deploy:prod:api",
            "pod:default:web-1",
        ]
    );

    // The id index must survive the reorder.
    for id in ids {
        assert_eq!(graph.get_node(id).unwrap().id, id);
    }
}

#[test]
fn test_node_serialization_shape() {
    let namespaced = GraphNode::new(
        ResourceKind::Deployment,
        "api",
        "prod",
        label_map(&[("app", "api")]),
    );
    assert_eq!(
        serde_json::to_value(&namespaced).unwrap(),
        json!({
            "id": "deploy:prod:api",
            "kind": "Deployment",
            "name": "api",
            "namespace": "prod",
            "labels": {"app": "api"}
        })
    );

    // Cluster-scoped nodes omit both their empty namespace and empty labels.
    let cluster_scoped = node(ResourceKind::Node, "", "worker-1");
    assert_eq!(
        serde_json::to_value(&cluster_scoped).unwrap(),
        json!({
            "id": "node:worker-1",
            "kind": "Node",
            "name": "worker-1"
        })
    );

    let hpa = node(ResourceKind::HorizontalPodAutoscaler, "prod", "api-hpa");
    assert_eq!(serde_json::to_value(&hpa).unwrap()["kind"], json!("HPA"));
}

#[test]
fn test_node_from_typed_object() {
    let pod = Pod {
        metadata: ObjectMeta {
            name: Some("web-1".to_string()),
            namespace: Some("default".to_string()),
            labels: Some(label_map(&[("app", "web")])),
            ..Default::default()
        },
        ..Default::default()
    };

    let graph_node = GraphNode::from_object(ResourceKind::Pod, &pod);
    assert_eq!(graph_node.id, "pod:default:web-1");
    assert_eq!(graph_node.name, "web-1");
    assert_eq!(graph_node.namespace, "default");
    assert_eq!(graph_node.labels, label_map(&[("app", "web")]));
}

#[test]
fn test_edge_link_format() {
    let edge = GraphEdge::link(
        ResourceKind::Service,
        ResourceKind::Pod,
        "default",
        "web",
        "web-1",
    );

    assert_eq!(edge.id, "edge:svc->pod:default:web->web-1");
    assert_eq!(edge.source, "svc:default:web");
    assert_eq!(edge.target, "pod:default:web-1");

    // Linking the same pair again yields the identical edge.
    let again = GraphEdge::link(
        ResourceKind::Service,
        ResourceKind::Pod,
        "default",
        "web",
        "web-1",
    );
    assert_eq!(edge, again);
}

#[test]
fn test_graph_serialization_skips_internal_index() {
    let mut graph = ClusterGraph::new();
    graph.add_node(node(ResourceKind::Namespace, "", "default"));
    graph.add_edge(GraphEdge::link(
        ResourceKind::Service,
        ResourceKind::Pod,
        "default",
        "web",
        "web-1",
    ));

    let value = serde_json::to_value(&graph).unwrap();
    let fields = value.as_object().unwrap();
    assert_eq!(fields.len(), 2);
    assert!(fields.contains_key("nodes"));
    assert!(fields.contains_key("edges"));
}

#[test]
fn test_inferred_edges_never_dangle() {
    let deployment = Deployment {
        metadata: ObjectMeta {
            name: Some("api".to_string()),
            namespace: Some("default".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let replica_set = ReplicaSet {
        metadata: ObjectMeta {
            name: Some("api-7f9c".to_string()),
            namespace: Some("default".to_string()),
            owner_references: Some(vec![OwnerReference {
                api_version: "apps/v1".to_string(),
                kind: "Deployment".to_string(),
                name: "api".to_string(),
                ..Default::default()
            }]),
            ..Default::default()
        },
        ..Default::default()
    };
    let pod = Pod {
        metadata: ObjectMeta {
            name: Some("api-7f9c-x1".to_string()),
            namespace: Some("default".to_string()),
            owner_references: Some(vec![OwnerReference {
                api_version: "apps/v1".to_string(),
                kind: "ReplicaSet".to_string(),
                name: "api-7f9c".to_string(),
                ..Default::default()
            }]),
            ..Default::default()
        },
        ..Default::default()
    };

    let mut graph = ClusterGraph::new();
    graph.add_node(GraphNode::from_object(ResourceKind::Deployment, &deployment));
    graph.add_node(GraphNode::from_object(ResourceKind::ReplicaSet, &replica_set));
    graph.add_node(GraphNode::from_object(ResourceKind::Pod, &pod));

    let sets = ResourceSets {
        deployments: vec![deployment],
        replica_sets: vec![replica_set],
        pods: vec![pod],
        ..Default::default()
    };

    let edges = infer_edges(&sets);
    assert_eq!(edges.len(), 2);
    for edge in &edges {
        assert!(
            graph.contains_node(&edge.source),
            "edge {} has unknown source {}",
            edge.id,
            edge.source
        );
        assert!(
            graph.contains_node(&edge.target),
            "edge {} has unknown target {}",
            edge.id,
            edge.target
        );
    }
}

#[test]
fn test_missing_kind_leaves_partial_graph() {
    // A failed Service list leaves the set empty; every other rule still fires.
    let sets = ResourceSets {
        deployments: vec![Deployment {
            metadata: ObjectMeta {
                name: Some("api".to_string()),
                namespace: Some("default".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }],
        replica_sets: vec![ReplicaSet {
            metadata: ObjectMeta {
                name: Some("api-7f9c".to_string()),
                namespace: Some("default".to_string()),
                owner_references: Some(vec![OwnerReference {
                    api_version: "apps/v1".to_string(),
                    kind: "Deployment".to_string(),
                    name: "api".to_string(),
                    ..Default::default()
                }]),
                ..Default::default()
            },
            ..Default::default()
        }],
        pods: vec![Pod {
            metadata: ObjectMeta {
                name: Some("api-7f9c-x1".to_string()),
                namespace: Some("default".to_string()),
                labels: Some(label_map(&[("app", "api")])),
                owner_references: Some(vec![OwnerReference {
                    api_version: "apps/v1".to_string(),
                    kind: "ReplicaSet".to_string(),
                    name: "api-7f9c".to_string(),
                    ..Default::default()
                }]),
                ..Default::default()
            },
            ..Default::default()
        }],
        ..Default::default()
    };

    let ids: Vec<String> = infer_edges(&sets).into_iter().map(|e| e.id).collect();
    assert_eq!(
        ids,
        [
            "edge:deploy->rs:default:api->api-7f9c",
            "edge:rs->pod:default:api-7f9c->api-7f9c-x1",
        ]
    );
    assert!(ids.iter().all(|id| !id.starts_with("edge:svc->pod:")));
}
