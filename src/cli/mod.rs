//! CLI command handling module
//!
//! Handles argument parsing, logging setup, and subcommand dispatch.

mod logging;

pub use logging::init_logging;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::config::{Config, ConfigLoader, paths};
use crate::kube::{create_client, fetch_manifest, fetch_pod_logs};
use crate::topology::{NamespaceFilter, discover, render};

/// Discover a Kubernetes cluster and render its workload topology as a graph
#[derive(Parser, Debug)]
#[command(name = "kubetopo", version)]
#[command(about = "Discover a Kubernetes cluster and render its workload topology as a graph", long_about = None)]
struct Args {
    /// Path to a kubeconfig file (defaults to the standard discovery chain)
    #[arg(long, global = true)]
    kubeconfig: Option<PathBuf>,

    /// Namespace to operate in ("all" or empty selects every namespace)
    #[arg(long, short = 'n', global = true)]
    namespace: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Discover the cluster and print the topology view as JSON (default)
    Topology,
    /// Print one object's manifest as YAML
    Manifest {
        /// Resource kind (e.g. "deployment", "svc", "hpa")
        kind: String,
        /// Object name
        name: String,
    },
    /// Print the tail of a pod's logs
    Logs {
        /// Pod name
        pod: String,
        /// Container name (defaults to the first container)
        #[arg(long, short = 'c')]
        container: Option<String>,
        /// Number of log lines to fetch
        #[arg(long)]
        tail: Option<i64>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
enum ConfigSubcommand {
    /// Print the resolved configuration as YAML
    Show,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Parse arguments and dispatch the selected subcommand
pub async fn run() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    match args.command.unwrap_or(Command::Topology) {
        Command::Topology => {
            let config = load_config();
            let filter = NamespaceFilter::parse(
                args.namespace
                    .as_deref()
                    .unwrap_or(&config.default_namespace),
            );

            let client = create_client(args.kubeconfig.as_deref()).await?;
            let timeout = Duration::from_secs(config.discovery.timeout_seconds);
            let graph = discover(client, &filter, timeout).await;
            let view = render(&graph, &config.layout);

            let json =
                serde_json::to_string_pretty(&view).context("Failed to serialize topology view")?;
            println!("{}", json);
        }
        Command::Manifest { kind, name } => {
            let client = create_client(args.kubeconfig.as_deref()).await?;
            let namespace = args.namespace.as_deref().unwrap_or("default");

            let yaml = fetch_manifest(&client, &kind, namespace, &name)
                .await
                .with_context(|| format!("Failed to fetch manifest for {} {}", kind, name))?;
            print!("{}", yaml);
        }
        Command::Logs {
            pod,
            container,
            tail,
        } => {
            let config = load_config();
            let client = create_client(args.kubeconfig.as_deref()).await?;
            let namespace = args.namespace.as_deref().unwrap_or("default");
            let tail = tail.unwrap_or(config.logger.tail);

            let lines = fetch_pod_logs(&client, namespace, &pod, container.as_deref(), tail)
                .await
                .with_context(|| format!("Failed to fetch logs for pod {}", pod))?;
            for line in lines {
                println!("{}", line);
            }
        }
        Command::Config { subcommand } => handle_config_command(subcommand)?,
    }

    Ok(())
}

/// Load configuration, falling back to defaults when the file is unusable
fn load_config() -> Config {
    ConfigLoader::load().unwrap_or_else(|err| {
        warn!("Failed to load configuration: {}", err);
        ConfigLoader::load_defaults()
    })
}

/// Handle configuration subcommands
fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Show => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            let config_path = paths::root_config_path();
            println!("{}", config_path.display());
        }
        ConfigSubcommand::Validate => match ConfigLoader::validate() {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
