//! Kubetopo - Kubernetes cluster topology discovery
//!
//! Discovers workloads across a cluster, infers the relationships between
//! them, and prints a layout-ready graph for visualization.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    kubetopo::cli::run().await
}
