use std::fmt;

use crate::RegistryError;

/// Strips query and fragment, drops trailing slashes and maps the empty path
/// to root.
///
/// ```
/// use dashgate_registry::normalize_path;
///
/// assert_eq!(normalize_path(""), "/");
/// assert_eq!(normalize_path("/orders/?page=2"), "/orders");
/// assert_eq!(normalize_path("/orders/42#lines"), "/orders/42");
/// ```
pub fn normalize_path(path: &str) -> &str {
	let end = path.find(['?', '#']).unwrap_or(path.len());
	let trimmed = path[..end].trim_end_matches('/');
	if trimmed.is_empty() { "/" } else { trimmed }
}

/// A normalized URL path pattern such as `/orders` or `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern(Box<str>);

impl PathPattern {
	/// Parses a pattern. It must start with `/` and carry no query or fragment.
	pub fn new(raw: &str) -> Result<Self, RegistryError> {
		if !raw.starts_with('/') {
			return Err(RegistryError::InvalidPattern {
				pattern: raw.to_owned(),
				reason: "pattern must start with '/'",
			});
		}
		if raw.contains(['?', '#']) {
			return Err(RegistryError::InvalidPattern {
				pattern: raw.to_owned(),
				reason: "pattern must not contain a query or fragment",
			});
		}
		Ok(Self(normalize_path(raw).into()))
	}

	pub fn root() -> Self {
		Self("/".into())
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	#[inline]
	pub fn is_root(&self) -> bool {
		&*self.0 == "/"
	}

	/// Tests `path` against this pattern.
	///
	/// Exact patterns need equality. Prefix patterns also accept any path
	/// below them (`/orders` accepts `/orders/42` but not `/orders-archive`).
	/// Root only ever matches root; a prefix root would swallow every path.
	pub fn matches(&self, path: &str, exact: bool) -> bool {
		let path = normalize_path(path);
		if exact || self.is_root() {
			return path == self.as_str();
		}
		path.strip_prefix(self.as_str())
			.is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
	}

	/// Returns true when every path accepted by `(other, other_exact)` is also
	/// accepted by `(self, exact)`, i.e. a registration of `self` placed first
	/// makes `other` unreachable.
	pub fn covers(&self, exact: bool, other: &PathPattern, other_exact: bool) -> bool {
		if exact || self.is_root() {
			return self == other && (other_exact || other.is_root());
		}
		self.matches(other.as_str(), false)
	}
}

impl fmt::Display for PathPattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
