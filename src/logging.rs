use tracing_subscriber::{fmt, EnvFilter};

/// Installs the diagnostic subscriber.
///
/// `--verbose` turns on `debug` for this workspace; otherwise only an
/// explicit `RUST_LOG` enables output. User-facing progress is printed
/// directly and does not go through here.
pub fn init(verbose: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ if verbose => EnvFilter::new("doc_scanner=debug,doc_scanner_common=debug"),
        _ => return,
    };
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init();
}
