use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives applied when `RUST_LOG` does not say otherwise.
fn default_directives(verbose: bool) -> &'static str {
    if verbose { "off,xconv=debug" } else { "off" }
}

/// Picks the filter: a parseable `RUST_LOG` wins over the `--verbose` default.
fn build_filter(verbose: bool, env_directives: Option<&str>) -> EnvFilter {
    env_directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init_logging(verbose: bool) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(build_filter(verbose, env_directives.as_deref()))
        .init();
}
