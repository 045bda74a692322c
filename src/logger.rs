use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout stays free for program output.
/// `RUST_LOG` overrides the default level.
pub fn init_cli_logger(verbose: bool) {
    let default = if verbose { "doc_publisher=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
