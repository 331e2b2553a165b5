//! `dashgate.toml` configuration.
//!
//! Every section and field is optional:
//!
//! ```toml
//! [app]
//! title = "Dashboard"
//! demo_mode = false
//!
//! [routes]
//! file = "routes.toml"      # relative to this file; builtin table when unset
//!
//! [registry]
//! duplicate_policy = "warn" # or "deny"
//!
//! [loader]
//! latency_ms = 0
//!
//! [log]
//! filter = "dashgate=debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use dashgate_registry::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// TOML syntax error or a field of the wrong shape.
	#[error("invalid config{}: {message}", path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
	Parse {
		path: Option<PathBuf>,
		message: String,
	},
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashgateConfig {
	pub app: AppConfig,
	pub routes: RoutesConfig,
	pub registry: RegistryConfig,
	pub loader: LoaderConfig,
	pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
	/// Window title.
	pub title: String,
	/// Shows the demo banner.
	pub demo_mode: bool,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			title: "Dashboard".into(),
			demo_mode: false,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesConfig {
	/// External route table (TOML or JSON). The builtin dashboard table is
	/// used when unset.
	pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	pub duplicate_policy: DuplicatePolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
	/// Simulated fetch latency for the static module source.
	pub latency_ms: u64,
}

impl LoaderConfig {
	pub fn latency(&self) -> Option<Duration> {
		(self.latency_ms > 0).then(|| Duration::from_millis(self.latency_ms))
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
	/// `EnvFilter` directives, overridden by `DASHGATE_LOG`.
	pub filter: Option<String>,
}

impl DashgateConfig {
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		toml::from_str(text).map_err(|err| ConfigError::Parse {
			path: None,
			message: err.to_string(),
		})
	}

	/// Reads a config file. A relative `[routes] file` is resolved against
	/// the config file's directory.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let mut config: Self = toml::from_str(&text).map_err(|err| ConfigError::Parse {
			path: Some(path.to_path_buf()),
			message: err.to_string(),
		})?;

		if let Some(file) = config.routes.file.as_mut()
			&& file.is_relative()
			&& let Some(dir) = path.parent()
		{
			*file = dir.join(&*file);
		}
		tracing::debug!(path = %path.display(), "config.loaded");
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_config_uses_defaults() {
		let config = DashgateConfig::from_toml_str("").unwrap();
		assert_eq!(config, DashgateConfig::default());
		assert_eq!(config.app.title, "Dashboard");
		assert_eq!(config.registry.duplicate_policy, DuplicatePolicy::Warn);
		assert_eq!(config.loader.latency(), None);
		assert!(config.routes.file.is_none());
	}

	#[test]
	fn parses_every_section() {
		let config = DashgateConfig::from_toml_str(
			r#"
[app]
title = "Store"
demo_mode = true

[routes]
file = "/etc/dashgate/routes.toml"

[registry]
duplicate_policy = "deny"

[loader]
latency_ms = 25

[log]
filter = "dashgate=trace"
"#,
		)
		.unwrap();

		assert_eq!(config.app.title, "Store");
		assert!(config.app.demo_mode);
		assert_eq!(config.routes.file, Some(PathBuf::from("/etc/dashgate/routes.toml")));
		assert_eq!(config.registry.duplicate_policy, DuplicatePolicy::Deny);
		assert_eq!(config.loader.latency(), Some(Duration::from_millis(25)));
		assert_eq!(config.log.filter.as_deref(), Some("dashgate=trace"));
	}

	#[test]
	fn partial_section_keeps_other_defaults() {
		let config = DashgateConfig::from_toml_str("[app]\ndemo_mode = true\n").unwrap();
		assert_eq!(config.app.title, "Dashboard");
		assert!(config.app.demo_mode);
	}

	#[test]
	fn rejects_unknown_keys() {
		let err = DashgateConfig::from_toml_str("[app]\ncolour = \"red\"\n").unwrap_err();
		assert!(matches!(err, ConfigError::Parse { path: None, .. }), "{err}");
	}

	#[test]
	fn rejects_unknown_policy() {
		assert!(DashgateConfig::from_toml_str("[registry]\nduplicate_policy = \"ignore\"\n").is_err());
	}

	#[test]
	fn load_resolves_route_file_next_to_config() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("dashgate.toml");
		std::fs::write(&path, "[routes]\nfile = \"routes.json\"\n").unwrap();

		let config = DashgateConfig::load(&path).unwrap();
		assert_eq!(config.routes.file, Some(dir.path().join("routes.json")));
	}

	#[test]
	fn missing_file_is_io_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = DashgateConfig::load(&dir.path().join("nope.toml")).unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
		assert!(err.to_string().contains("nope.toml"));
	}
}
