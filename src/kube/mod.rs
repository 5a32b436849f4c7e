//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and provides the
//! single-object operations that sit beside graph discovery: manifest
//! retrieval and pod log tailing. Everything here is read-only.

pub mod logs;
pub mod manifest;

pub use logs::fetch_pod_logs;
pub use manifest::fetch_manifest;

use std::path::Path;

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::debug;

/// Errors from the single-object operations.
///
/// Callers need to tell an unsupported kind apart from a cluster API
/// failure; everything else stays opaque.
#[derive(Debug, thiserror::Error)]
pub enum TopoError {
    #[error("Unsupported resource kind: {0}")]
    UnsupportedKind(String),

    #[error("Cluster API request failed: {0}")]
    Api(#[from] kube::Error),

    #[error("Failed to render manifest as YAML: {0}")]
    Render(#[from] serde_yaml::Error),
}

/// Result type for single-object operations
pub type TopoResult<T> = Result<T, TopoError>;

/// Build a client from an explicit kubeconfig path, or infer one from the
/// environment.
///
/// Inference follows the default loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client(kubeconfig: Option<&Path>) -> Result<Client> {
    match kubeconfig {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig: {}", path.display()))?;
            client_from_kubeconfig(kubeconfig).await
        }
        None => {
            let config = Config::infer()
                .await
                .context("Failed to infer Kubernetes configuration")?;
            debug!("Connecting to cluster at {}", config.cluster_url);
            Client::try_from(config).context("Failed to create Kubernetes client")
        }
    }
}

/// Build a client from raw kubeconfig bytes, the form a cluster registry
/// hands over after decrypting stored credentials.
pub async fn client_from_kubeconfig_bytes(bytes: &[u8]) -> Result<Client> {
    let text = std::str::from_utf8(bytes).context("Kubeconfig is not valid UTF-8")?;
    let kubeconfig = Kubeconfig::from_yaml(text).context("Failed to parse kubeconfig")?;
    client_from_kubeconfig(kubeconfig).await
}

async fn client_from_kubeconfig(kubeconfig: Kubeconfig) -> Result<Client> {
    let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .context("Failed to build client configuration from kubeconfig")?;
    debug!("Connecting to cluster at {}", config.cluster_url);
    Client::try_from(config).context("Failed to create Kubernetes client")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
clusters:
  - name: test
    cluster:
      server: https://127.0.0.1:6443
users:
  - name: test
    user:
      token: not-a-real-token
contexts:
  - name: test
    context:
      cluster: test
      user: test
current-context: test
"#;

    #[tokio::test]
    async fn test_client_from_kubeconfig_bytes() {
        // Building a client opens no connection, so this works offline.
        let client = client_from_kubeconfig_bytes(MINIMAL_KUBECONFIG.as_bytes()).await;
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_client_from_invalid_bytes() {
        let result = client_from_kubeconfig_bytes(b"::: not a kubeconfig :::").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_client_from_non_utf8_bytes() {
        let result = client_from_kubeconfig_bytes(&[0xff, 0xfe, 0x00]).await;
        let err = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(err.contains("UTF-8"));
    }
}
