//! Tracing subscriber setup.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter.
pub const ENV_LOG: &str = "SLAPJACK_LOG";

static TEST_LOGGING: OnceCell<()> = OnceCell::new();

/// Build the log filter: `SLAPJACK_LOG`, then `RUST_LOG`, then `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the process-wide subscriber, writing to stderr.
///
/// stdout is left for game output. Does nothing if a subscriber is already
/// installed.
pub fn init_logging() {
    let installed = fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging initialized");
    }
}

/// Initialize logging for tests.
///
/// Idempotent; output goes through the test harness capture.
pub fn init_test_logging() {
    TEST_LOGGING.get_or_init(|| {
        fmt()
            .with_env_filter(env_filter("warn"))
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
