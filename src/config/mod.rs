//! Configuration system for kubetopo
//!
//! Loads a YAML config file from the platform config directory, falling
//! back to built-in defaults when the file is absent.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::Config;
#[allow(unused_imports)] // Public API exports - may be used by external code
pub use schema::{DiscoveryConfig, LoggerConfig};
