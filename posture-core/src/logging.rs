//! Tracing initialization.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a formatted subscriber filtered by `POSTURE_LOG` (falling back to
/// `RUST_LOG`, then `warn`). Safe to call more than once; later calls are
/// no-ops.
pub fn init() {
    let filter = std::env::var("POSTURE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    let _ = fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .try_init();
}
