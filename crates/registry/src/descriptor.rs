use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use dashgate_permissions::{CapabilitySet, PermissionSet};

use crate::PathPattern;
use crate::metadata::{self, MetadataEntry};

/// Opaque handle naming a lazily loaded UI module.
///
/// Cheap to clone; equality and hashing go by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleRef(Arc<str>);

impl ModuleRef {
	pub fn new(name: impl AsRef<str>) -> Self {
		Self(Arc::from(name.as_ref()))
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ModuleRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for ModuleRef {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for ModuleRef {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for ModuleRef {
	fn from(name: String) -> Self {
		Self(Arc::from(name))
	}
}

/// Binds a path pattern to a module and the permissions needed to reach it.
///
/// Built once at startup and owned by its [`SectionRegistry`](crate::SectionRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDescriptor {
	name: String,
	pattern: PathPattern,
	exact: bool,
	permission: PermissionSet,
	module: ModuleRef,
	metadata: Vec<MetadataEntry>,
}

impl SectionDescriptor {
	/// Creates a public prefix-matched descriptor.
	pub fn new(name: impl Into<String>, pattern: PathPattern, module: impl Into<ModuleRef>) -> Self {
		Self {
			name: name.into(),
			pattern,
			exact: false,
			permission: PermissionSet::public(),
			module: module.into(),
			metadata: Vec::new(),
		}
	}

	/// Sets whether the path must match exactly.
	pub fn exact(mut self, exact: bool) -> Self {
		self.exact = exact;
		self
	}

	/// Sets the required permissions.
	pub fn permission(mut self, permission: PermissionSet) -> Self {
		self.permission = permission;
		self
	}

	/// Appends a metadata entry.
	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.metadata.push(MetadataEntry::new(key, value));
		self
	}

	/// Replaces all metadata.
	pub fn metadata_entries(mut self, entries: Vec<MetadataEntry>) -> Self {
		self.metadata = entries;
		self
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[inline]
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	#[inline]
	pub fn is_exact(&self) -> bool {
		self.exact
	}

	#[inline]
	pub fn permissions(&self) -> &PermissionSet {
		&self.permission
	}

	#[inline]
	pub fn module(&self) -> &ModuleRef {
		&self.module
	}

	#[inline]
	pub fn metadata(&self) -> &[MetadataEntry] {
		&self.metadata
	}

	/// Structural match only; permissions are not consulted.
	#[inline]
	pub fn matches(&self, path: &str) -> bool {
		self.pattern.matches(path, self.exact)
	}

	pub fn is_permitted(&self, granted: &CapabilitySet) -> bool {
		self.permission.is_satisfied_by(granted)
	}

	/// True when the section asks for the whole viewport.
	pub fn is_full_size(&self) -> bool {
		metadata::metadata_flag(&self.metadata, metadata::FULL_SIZE).unwrap_or(false)
	}

	pub fn title(&self) -> Option<&str> {
		metadata::metadata_value(&self.metadata, metadata::TITLE)
	}
}
