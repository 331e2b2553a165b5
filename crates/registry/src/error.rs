use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a registry or loading a route table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// A path pattern is malformed.
	#[error("invalid path pattern {pattern:?}: {reason}")]
	InvalidPattern { pattern: String, reason: &'static str },
	/// A route table record cannot be turned into a descriptor.
	#[error("route #{index} ({path:?}) is invalid: {reason}")]
	InvalidRoute { index: usize, path: String, reason: String },
	/// A pattern was registered twice under [`DuplicatePolicy::Deny`](crate::DuplicatePolicy::Deny).
	#[error("duplicate route pattern {pattern} in {registry}: {existing} already registered, {rejected} rejected")]
	Duplicate {
		registry: &'static str,
		pattern: String,
		existing: String,
		rejected: String,
	},
	/// The route table text is not valid TOML or JSON.
	#[error("failed to parse route table: {0}")]
	Parse(String),
	/// The route table file cannot be read.
	#[error("failed to read route table {}: {message}", path.display())]
	Io { path: PathBuf, message: String },
}
