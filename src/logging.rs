use log::SetLoggerError;

const DEFAULT_FILTER: &str = "info";

/// Picks the `env_logger` filter: the configured one, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
pub fn resolve_filter(configured: Option<&str>, env: Option<String>) -> String {
    configured
        .map(str::to_owned)
        .or(env)
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}

/// Installs `env_logger` as the global logger.
///
/// `filter` uses the `env_logger` syntax, e.g. "skyview=debug,glium=warn".
/// Fails if a logger is already installed.
pub fn init_logging(filter: Option<&str>) -> Result<(), SetLoggerError> {
    let filter = resolve_filter(filter, std::env::var("RUST_LOG").ok());

    env_logger::Builder::new()
        .parse_filters(&filter)
        .format_timestamp_millis()
        .try_init()?;

    log::debug!("logging initialized with filter {:?}", filter);
    Ok(())
}
