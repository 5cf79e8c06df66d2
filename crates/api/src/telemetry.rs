//! Tracing setup

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize structured logging
///
/// Respects `RUST_LOG`, defaulting to `info` for this workspace's crates.
/// Safe to call once at startup; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nexuspulse=debug"));

    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
