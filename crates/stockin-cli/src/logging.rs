use tracing_subscriber::{EnvFilter, prelude::*};

/// Configures a compact stderr subscriber. Verbosity follows `RUST_LOG`,
/// defaulting to warnings.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let stderr_log = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .init();
}
