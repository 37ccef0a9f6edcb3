use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `level` (from `--log-level`) wins over `RUST_LOG`; the default is `info`.
/// Logs go to stderr so they stay out of the children's stdout.
pub fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
}
