//! Structured logging setup.
//!
//! Events go to stderr so the RPC binary can keep stdout for protocol traffic.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable whose filter directives override the configured level.
pub const LOG_ENV: &str = "SHELFMARK_LOG";

static INIT: Once = Once::new();

/// Builds the filter: `SHELFMARK_LOG` if set and valid, else `default_level`.
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let result = tracing_subscriber::fmt()
            .with_env_filter(build_filter(default_level))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
        if let Err(e) = result {
            eprintln!("logging already initialized: {}", e);
        }
    });
}
