//! Single-object manifest retrieval
//!
//! Typed get for one catalog object, rendered as a YAML document.

use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::autoscaling::v2::HorizontalPodAutoscaler;
use k8s_openapi::api::core::v1::{Namespace, Node, Pod, Service};
use kube::{Api, Client};

use crate::models::ResourceKind;

use super::{TopoError, TopoResult};

// One arm per scope: namespaced gets take the namespace, cluster-scoped
// gets do not.
macro_rules! get_as_yaml {
    ($type:ty, $client:expr, $ns:expr, $name:expr) => {{
        let api: Api<$type> = Api::namespaced($client.clone(), $ns);
        let mut object = api.get($name).await?;
        object.metadata.managed_fields = None;
        serde_yaml::to_string(&object)?
    }};
    ($type:ty, $client:expr, $name:expr) => {{
        let api: Api<$type> = Api::all($client.clone());
        let mut object = api.get($name).await?;
        object.metadata.managed_fields = None;
        serde_yaml::to_string(&object)?
    }};
}

/// Fetch one object and render its manifest as YAML.
///
/// `kind` is matched case-insensitively and accepts the usual kubectl
/// aliases. Managed fields are stripped before rendering; they drown out
/// the parts of the manifest anyone wants to read.
pub async fn fetch_manifest(
    client: &Client,
    kind: &str,
    namespace: &str,
    name: &str,
) -> TopoResult<String> {
    let kind = ResourceKind::from_str_case_insensitive(kind)
        .ok_or_else(|| TopoError::UnsupportedKind(kind.to_string()))?;

    let yaml = match kind {
        ResourceKind::Pod => get_as_yaml!(Pod, client, namespace, name),
        ResourceKind::Service => get_as_yaml!(Service, client, namespace, name),
        ResourceKind::Deployment => get_as_yaml!(Deployment, client, namespace, name),
        ResourceKind::StatefulSet => get_as_yaml!(StatefulSet, client, namespace, name),
        ResourceKind::DaemonSet => get_as_yaml!(DaemonSet, client, namespace, name),
        ResourceKind::ReplicaSet => get_as_yaml!(ReplicaSet, client, namespace, name),
        ResourceKind::HorizontalPodAutoscaler => {
            get_as_yaml!(HorizontalPodAutoscaler, client, namespace, name)
        }
        ResourceKind::Namespace => get_as_yaml!(Namespace, client, name),
        ResourceKind::Node => get_as_yaml!(Node, client, name),
    };

    Ok(yaml)
}
