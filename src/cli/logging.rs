//! Logging initialization

use tracing_subscriber::EnvFilter;

/// Initialize logging based on the verbosity flag
///
/// Diagnostics go to stderr so stdout stays reserved for command output.
/// A `RUST_LOG` environment filter takes precedence over the flag.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbose)));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
