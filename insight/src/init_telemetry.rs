use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the filter depends on the `debug`
/// setting. Safe to call more than once (subsequent calls are no-ops),
/// which keeps tests that build full app states from fighting over the
/// global subscriber.
pub fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "insight=debug,insight_core=debug,tower_http=debug,info"
    } else {
        "insight=info,insight_core=info,warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
