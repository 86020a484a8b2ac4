use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global tracing subscriber, logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise verbosity picks warn/info/debug.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
