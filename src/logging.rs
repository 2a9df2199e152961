use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is not set
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "find_org_pulls=debug,info"
    } else {
        "find_org_pulls=info,warn"
    }
}

/// Install the stderr subscriber. RUST_LOG wins over `--verbose` when set.
///
/// Stdout is left to the report so it can be piped.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
