//! Tracing setup for the `dashgate` binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding `EnvFilter` directives.
pub const LOG_ENV: &str = "DASHGATE_LOG";

/// Picks the filter: `DASHGATE_LOG`, then `RUST_LOG`, then the config
/// directive, then a default. `verbose` only affects the default.
pub fn filter(configured: Option<&str>, verbose: bool) -> EnvFilter {
	if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
		return filter;
	}
	if let Ok(filter) = EnvFilter::try_from_default_env() {
		return filter;
	}
	if let Some(directives) = configured
		&& let Ok(filter) = EnvFilter::try_new(directives)
	{
		return filter;
	}
	default_filter(verbose)
}

fn default_filter(verbose: bool) -> EnvFilter {
	if verbose {
		EnvFilter::new("dashgate=debug,info")
	} else {
		EnvFilter::new("warn")
	}
}

/// Installs a stderr subscriber. Later calls are ignored.
pub fn init(configured: Option<&str>, verbose: bool) {
	let installed = tracing_subscriber::fmt()
		.with_env_filter(filter(configured, verbose))
		.with_writer(std::io::stderr)
		.with_target(verbose)
		.try_init();
	if installed.is_ok() {
		tracing::debug!("tracing initialized");
	}
}
