/*!
 * Tracing Setup
 * Structured logging initialization for the binary and tests
 */

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing
///
/// Respects `RUST_LOG` for filtering (default: info). Safe to call once per
/// process; the demo binary calls it at startup.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_names(true)
                .compact(),
        )
        .init();
}
