use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Builds the log filter. Directives from `RUST_LOG` win when present;
/// otherwise the app logs warnings, or everything down to debug when verbose.
pub fn log_filter(verbose: bool, env_directives: Option<&str>) -> EnvFilter {
    match env_directives {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ if verbose => EnvFilter::new("cambio=debug"),
        _ => EnvFilter::new("cambio=warn"),
    }
}

/// Installs the global subscriber. Logs go to stderr so they never mix with
/// the interactive output on stdout.
pub fn init_logging(verbose: bool) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(verbose, env_directives.as_deref());

    // Detailed output when debugging, one line per failure otherwise
    let pretty = verbose.then(|| {
        fmt::layer()
            .pretty()
            .without_time()
            .with_writer(std::io::stderr)
    });
    let compact = (!verbose).then(|| {
        fmt::layer()
            .compact()
            .without_time()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(pretty)
        .with(compact)
        .with(filter)
        .init();
}
