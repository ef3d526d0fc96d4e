use tracing_subscriber::{EnvFilter, fmt};

/// Initialize JSON logging with environment-based filtering.
///
/// - Log level comes from `RUST_LOG` (defaults to "info")
/// - Events are written to stderr so command output on stdout stays parseable
/// - Event fields are flattened into the top-level object
pub fn init_normal_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .flatten_event(true)
        .init();
}

pub fn init_logging() {
    // tokio-console installs its own subscriber; the normal one must stay out
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        init_console_logging();
    } else {
        init_normal_logging();
    }
}

fn init_console_logging() {
    console_subscriber::init();
}
