use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PathPattern;

/// Policy for duplicate patterns met while building a registry.
///
/// Shadowing by a broader prefix is always reported as a warning; only exact
/// duplicates are subject to this policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
	/// Keep the first registration and record a warning.
	#[default]
	Warn,
	/// Reject the duplicate with [`RegistryError::Duplicate`](crate::RegistryError::Duplicate).
	Deny,
}

/// Distinguishes how a later registration became unreachable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WarningKind {
	/// Same pattern and exactness as an earlier registration.
	Duplicate,
	/// An earlier, broader pattern accepts every path this one would.
	Shadowed,
}

impl fmt::Display for WarningKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			WarningKind::Duplicate => write!(f, "duplicate"),
			WarningKind::Shadowed => write!(f, "shadowed"),
		}
	}
}

/// Records a registration that can never win resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationWarning {
	pub kind: WarningKind,
	/// Pattern of the unreachable registration.
	pub pattern: PathPattern,
	/// Name of the unreachable registration.
	pub section: String,
	/// Pattern of the earlier registration that wins.
	pub winner_pattern: PathPattern,
	/// Name of the earlier registration that wins.
	pub winner: String,
	/// Label of the registry where this was found.
	pub registry: &'static str,
}

impl fmt::Display for ConfigurationWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}: {} route {} ({}) is unreachable behind {} ({})",
			self.registry, self.kind, self.pattern, self.section, self.winner_pattern, self.winner
		)
	}
}
