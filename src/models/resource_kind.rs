//! Resource kind catalog
//!
//! This module provides a centralized enum for every resource kind the
//! discovery pass covers. This eliminates hardcoded strings throughout the
//! codebase and provides type safety for kind references and node ids.

use std::fmt;
use std::str::FromStr;

/// Enumeration of the resource kinds discovered for the topology graph.
///
/// Variant order is the catalog order and doubles as the sort rank when
/// graph nodes are ordered for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    // Cluster-scoped kinds
    Node,
    Namespace,
    // Workload kinds
    Deployment,
    StatefulSet,
    DaemonSet,
    ReplicaSet,
    Pod,
    // Networking and scaling kinds
    Service,
    HorizontalPodAutoscaler,
}

impl ResourceKind {
    /// Get the display name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Node => "Node",
            ResourceKind::Namespace => "Namespace",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::StatefulSet => "StatefulSet",
            ResourceKind::DaemonSet => "DaemonSet",
            ResourceKind::ReplicaSet => "ReplicaSet",
            ResourceKind::Pod => "Pod",
            ResourceKind::Service => "Service",
            ResourceKind::HorizontalPodAutoscaler => "HPA",
        }
    }

    /// Short prefix used when deriving node and edge ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ResourceKind::Node => "node",
            ResourceKind::Namespace => "ns",
            ResourceKind::Deployment => "deploy",
            ResourceKind::StatefulSet => "sts",
            ResourceKind::DaemonSet => "ds",
            ResourceKind::ReplicaSet => "rs",
            ResourceKind::Pod => "pod",
            ResourceKind::Service => "svc",
            ResourceKind::HorizontalPodAutoscaler => "hpa",
        }
    }

    /// Whether objects of this kind live inside a namespace
    pub fn is_namespaced(&self) -> bool {
        !matches!(self, ResourceKind::Node | ResourceKind::Namespace)
    }

    /// Deterministic node id for an object of this kind.
    ///
    /// Namespaced kinds use `<prefix>:<namespace>:<name>`, cluster-scoped
    /// kinds use `<prefix>:<name>`.
    pub fn node_id(&self, namespace: &str, name: &str) -> String {
        if self.is_namespaced() {
            format!("{}:{}:{}", self.id_prefix(), namespace, name)
        } else {
            format!("{}:{}", self.id_prefix(), name)
        }
    }

    /// Try to parse a string into a ResourceKind, returning None if invalid
    /// Use this when you want Option<Self> instead of Result<Self, String>
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Get all catalog kinds in catalog order
    pub fn all() -> &'static [Self] {
        &[
            ResourceKind::Node,
            ResourceKind::Namespace,
            ResourceKind::Deployment,
            ResourceKind::StatefulSet,
            ResourceKind::DaemonSet,
            ResourceKind::ReplicaSet,
            ResourceKind::Pod,
            ResourceKind::Service,
            ResourceKind::HorizontalPodAutoscaler,
        ]
    }

    /// Try to parse a string (case-insensitive, kubectl-style aliases) into a ResourceKind
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "node" | "nodes" | "no" => Some(ResourceKind::Node),
            "namespace" | "namespaces" | "ns" => Some(ResourceKind::Namespace),
            "deployment" | "deployments" | "deploy" => Some(ResourceKind::Deployment),
            "statefulset" | "statefulsets" | "sts" => Some(ResourceKind::StatefulSet),
            "daemonset" | "daemonsets" | "ds" => Some(ResourceKind::DaemonSet),
            "replicaset" | "replicasets" | "rs" => Some(ResourceKind::ReplicaSet),
            "pod" | "pods" | "po" => Some(ResourceKind::Pod),
            "service" | "services" | "svc" => Some(ResourceKind::Service),
            "horizontalpodautoscaler" | "horizontalpodautoscalers" | "hpa" => {
                Some(ResourceKind::HorizontalPodAutoscaler)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Node" => Ok(ResourceKind::Node),
            "Namespace" => Ok(ResourceKind::Namespace),
            "Deployment" => Ok(ResourceKind::Deployment),
            "StatefulSet" => Ok(ResourceKind::StatefulSet),
            "DaemonSet" => Ok(ResourceKind::DaemonSet),
            "ReplicaSet" => Ok(ResourceKind::ReplicaSet),
            "Pod" => Ok(ResourceKind::Pod),
            "Service" => Ok(ResourceKind::Service),
            "HPA" | "HorizontalPodAutoscaler" => Ok(ResourceKind::HorizontalPodAutoscaler),
            _ => Err(format!("Unknown resource kind: {}", s)),
        }
    }
}

impl serde::Serialize for ResourceKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(ResourceKind::Deployment.as_str(), "Deployment");
        assert_eq!(ResourceKind::ReplicaSet.as_str(), "ReplicaSet");
        assert_eq!(ResourceKind::HorizontalPodAutoscaler.as_str(), "HPA");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ResourceKind::parse_optional("Deployment"),
            Some(ResourceKind::Deployment)
        );
        assert_eq!(
            ResourceKind::parse_optional("HPA"),
            Some(ResourceKind::HorizontalPodAutoscaler)
        );
        assert_eq!(
            ResourceKind::parse_optional("HorizontalPodAutoscaler"),
            Some(ResourceKind::HorizontalPodAutoscaler)
        );
        assert_eq!(ResourceKind::parse_optional("Unknown"), None);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(
            ResourceKind::from_str_case_insensitive("deployment"),
            Some(ResourceKind::Deployment)
        );
        assert_eq!(
            ResourceKind::from_str_case_insensitive("Deployment"),
            Some(ResourceKind::Deployment)
        );
        assert_eq!(
            ResourceKind::from_str_case_insensitive("sts"),
            Some(ResourceKind::StatefulSet)
        );
        assert_eq!(
            ResourceKind::from_str_case_insensitive("hpa"),
            Some(ResourceKind::HorizontalPodAutoscaler)
        );
        assert_eq!(ResourceKind::from_str_case_insensitive("cronjob"), None);
    }

    #[test]
    fn test_node_ids() {
        assert_eq!(ResourceKind::Node.node_id("", "worker-1"), "node:worker-1");
        assert_eq!(ResourceKind::Namespace.node_id("", "default"), "ns:default");
        assert_eq!(
            ResourceKind::Deployment.node_id("default", "api"),
            "deploy:default:api"
        );
        assert_eq!(
            ResourceKind::HorizontalPodAutoscaler.node_id("prod", "api-hpa"),
            "hpa:prod:api-hpa"
        );
    }

    #[test]
    fn test_catalog_order_is_sort_rank() {
        let kinds = ResourceKind::all();
        assert_eq!(kinds.len(), 9);
        let mut sorted = kinds.to_vec();
        sorted.sort();
        assert_eq!(sorted.as_slice(), kinds);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ResourceKind::Pod), "Pod");
        assert_eq!(format!("{}", ResourceKind::HorizontalPodAutoscaler), "HPA");
    }

    #[test]
    fn test_into_string() {
        let s: String = ResourceKind::Service.into();
        assert_eq!(s, "Service");
    }
}
