//! Tracing initialization. `LOG_LEVEL` controls the filter (e.g.
//! "debug" or directives like "warn,quiz_attempt=debug"). Log lines go
//! to stderr so they do not mix with the command prompt.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
