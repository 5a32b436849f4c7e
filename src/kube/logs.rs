//! Pod log retrieval

use k8s_openapi::api::core::v1::Pod;
use kube::api::LogParams;
use kube::{Api, Client};

use super::TopoResult;

/// Fetch the most recent `tail_lines` lines of one container's log stream.
///
/// With no container given, the cluster picks the pod's only container (and
/// errors when the pod has several). A missing pod surfaces as a cluster
/// API error.
pub async fn fetch_pod_logs(
    client: &Client,
    namespace: &str,
    name: &str,
    container: Option<&str>,
    tail_lines: i64,
) -> TopoResult<Vec<String>> {
    let api: Api<Pod> = Api::namespaced(client.clone(), namespace);
    let params = LogParams {
        container: container.map(str::to_string),
        tail_lines: Some(tail_lines),
        ..LogParams::default()
    };
    let raw = api.logs(name, &params).await?;
    Ok(raw.lines().map(str::to_string).collect())
}
