//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for
//! serialization.

use serde::{Deserialize, Serialize};

use crate::topology::GridLayout;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace filter applied when none is given on the command line
    /// ("all" means every namespace)
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Discovery configuration
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerConfig,

    /// Grid layout applied to the rendered topology view
    #[serde(default)]
    pub layout: GridLayout,
}

/// Discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryConfig {
    /// Upper bound in seconds for one discovery pass
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Log retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Number of log lines to request from the end of the stream
    #[serde(default = "default_log_tail")]
    pub tail: i64,
}

// Default value functions
fn default_namespace() -> String {
    "all".to_string()
}

fn default_timeout_seconds() -> u64 {
    45
}

fn default_log_tail() -> i64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            discovery: DiscoveryConfig::default(),
            logger: LoggerConfig::default(),
            layout: GridLayout::default(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            tail: default_log_tail(),
        }
    }
}
