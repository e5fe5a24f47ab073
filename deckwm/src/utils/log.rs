use tracing::{metadata::LevelFilter, Subscriber};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Installs the global subscriber. Logs go to stderr, stdout carries the status line.
///
/// # Panics
///
/// Panics if a global subscriber was already set.
pub fn setup_logging() {
    let subscriber = get_subscriber(env_filter(std::env::var("RUST_LOG").ok().as_deref()));
    tracing::subscriber::set_global_default(subscriber)
        .expect("Couldn't setup global subscriber (logger)");
}

/// Filter from a `RUST_LOG` style directive, `info` when absent or invalid.
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
    match directives {
        Some(directives) => builder.parse(directives).unwrap_or_else(|err| {
            eprintln!("Ignoring invalid RUST_LOG: {err}");
            EnvFilter::default().add_directive(LevelFilter::INFO.into())
        }),
        None => builder.parse_lossy(""),
    }
}

fn get_subscriber(filter: EnvFilter) -> impl Subscriber {
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry().with(filter).with(layer)
}
