use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,sdftext=debug,sdftext_core=debug";

/// Install a formatting subscriber.
///
/// `RUST_LOG` takes precedence over the built-in filter. Calling this more than
/// once is harmless; later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
