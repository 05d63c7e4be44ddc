//! Logging setup
//!
//! Logs go to stderr so they never interleave with hashes on stdout. The level
//! follows `-v`, and `CHECKSUM_URL_LOG` (an `EnvFilter` directive) overrides it.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::LOG_ENV;

pub fn default_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn default_directive(verbosity: u8) -> String {
    let level = default_level(verbosity).as_str().to_ascii_lowercase();
    format!("warn,checksum_url={level}")
}

fn filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

/// Installs the global subscriber; later calls are no-ops.
pub fn init(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
