use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "match_catalog=info,match_catalog_lib=info";
const VERBOSE_FILTER: &str = "match_catalog=debug,match_catalog_lib=debug";

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
