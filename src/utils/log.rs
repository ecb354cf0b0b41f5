use env_logger::Env;

/// Initializes the global logger.
///
/// Logs at the info level unless `RUST_LOG` specifies otherwise.
pub fn bootstrap_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init()
}
