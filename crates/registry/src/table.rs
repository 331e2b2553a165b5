//! Declarative route tables.
//!
//! A route table is an ordered list of records loaded once at startup. TOML
//! tables use `[[routes]]` arrays; JSON accepts either `{"routes": [...]}` or
//! a bare array. Field names also accept their camelCase spelling
//! (`pathPattern`, `matchPolicy`, `moduleRef`).
//!
//! ```toml
//! [[routes]]
//! path = "/"
//! exact = true
//! module = "sections/welcome"
//!
//! [[routes]]
//! path = "/page-types"
//! permissions = ["MANAGE_PAGES", "MANAGE_PAGE_TYPES_AND_ATTRIBUTES"]
//! match_policy = "any"
//! module = "sections/page-types"
//! ```

use std::path::Path;

use dashgate_permissions::{MatchPolicy, PermissionSet};
use serde::{Deserialize, Serialize};

use crate::{
	DuplicatePolicy, MetadataEntry, PathPattern, RegistryError, SectionDescriptor, SectionRegistry,
	SectionRegistryBuilder,
};

/// One declared route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteRecord {
	#[serde(alias = "pathPattern")]
	pub path: String,
	#[serde(default)]
	pub exact: bool,
	#[serde(default)]
	pub permissions: Vec<String>,
	#[serde(default, alias = "matchPolicy")]
	pub match_policy: MatchPolicy,
	#[serde(alias = "moduleRef")]
	pub module: String,
	/// Section name; defaults to the module reference.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub metadata: Vec<MetadataEntry>,
}

impl RouteRecord {
	/// A public prefix route.
	pub fn new(path: impl Into<String>, module: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			exact: false,
			permissions: Vec::new(),
			match_policy: MatchPolicy::All,
			module: module.into(),
			name: None,
			metadata: Vec::new(),
		}
	}

	pub fn exact(mut self) -> Self {
		self.exact = true;
		self
	}

	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Requires every listed capability.
	pub fn require_all<I, T>(mut self, caps: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<String>,
	{
		self.permissions = caps.into_iter().map(Into::into).collect();
		self.match_policy = MatchPolicy::All;
		self
	}

	/// Requires at least one listed capability.
	pub fn require_any<I, T>(mut self, caps: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<String>,
	{
		self.permissions = caps.into_iter().map(Into::into).collect();
		self.match_policy = MatchPolicy::Any;
		self
	}

	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.metadata.push(MetadataEntry::new(key, value));
		self
	}

	fn into_descriptor(self, index: usize) -> Result<SectionDescriptor, RegistryError> {
		let invalid = |reason: String| RegistryError::InvalidRoute {
			index,
			path: self.path.clone(),
			reason,
		};
		let pattern = PathPattern::new(&self.path).map_err(|err| invalid(err.to_string()))?;
		if self.module.trim().is_empty() {
			return Err(invalid("module reference is empty".into()));
		}
		if let Some(cap) = self.permissions.iter().find(|cap| cap.trim().is_empty()) {
			return Err(invalid(format!("blank capability {cap:?}")));
		}

		let name = self.name.unwrap_or_else(|| self.module.clone());
		Ok(SectionDescriptor::new(name, pattern, self.module)
			.exact(self.exact)
			.permission(PermissionSet::new(self.match_policy, self.permissions))
			.metadata_entries(self.metadata))
	}
}

/// Ordered list of [`RouteRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteTable {
	#[serde(default)]
	pub routes: Vec<RouteRecord>,
}

impl RouteTable {
	pub fn new(routes: Vec<RouteRecord>) -> Self {
		Self { routes }
	}

	pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
		toml::from_str(text).map_err(|err| RegistryError::Parse(err.to_string()))
	}

	pub fn from_json_str(text: &str) -> Result<Self, RegistryError> {
		let parse_err = |err: serde_json::Error| RegistryError::Parse(err.to_string());
		if text.trim_start().starts_with('[') {
			let routes = serde_json::from_str::<Vec<RouteRecord>>(text).map_err(parse_err)?;
			return Ok(Self { routes });
		}
		serde_json::from_str(text).map_err(parse_err)
	}

	/// Reads a table from disk; `.json` files are parsed as JSON, anything else
	/// as TOML.
	pub fn load(path: &Path) -> Result<Self, RegistryError> {
		let text = std::fs::read_to_string(path).map_err(|err| RegistryError::Io {
			path: path.to_path_buf(),
			message: err.to_string(),
		})?;
		let is_json = path
			.extension()
			.is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
		if is_json {
			Self::from_json_str(&text)
		} else {
			Self::from_toml_str(&text)
		}
	}

	pub fn to_toml_string(&self) -> Result<String, RegistryError> {
		toml::to_string(self).map_err(|err| RegistryError::Parse(err.to_string()))
	}

	/// Converts the table into a registry, keeping record order.
	pub fn into_registry(self, label: &'static str, policy: DuplicatePolicy) -> Result<SectionRegistry, RegistryError> {
		let descriptors = self
			.routes
			.into_iter()
			.enumerate()
			.map(|(index, record)| record.into_descriptor(index))
			.collect::<Result<Vec<_>, _>>()?;
		SectionRegistryBuilder::new(label)
			.duplicate_policy(policy)
			.extend(descriptors)
			.build()
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use dashgate_permissions::CapabilitySet;
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::MatchResult;

	const TOML_TABLE: &str = r#"
[[routes]]
path = "/"
exact = true
module = "sections/welcome"

[[routes]]
path = "/page-types"
permissions = ["MANAGE_PAGES", "MANAGE_PAGE_TYPES_AND_ATTRIBUTES"]
match_policy = "any"
module = "sections/page-types"
name = "page-types"

[[routes]]
path = "/apps"
module = "sections/apps"
metadata = [{ key = "full-size", value = "true" }]
"#;

	#[test]
	fn parses_toml() {
		let table = RouteTable::from_toml_str(TOML_TABLE).unwrap();
		assert_eq!(table.routes.len(), 3);
		assert_eq!(table.routes[0], RouteRecord::new("/", "sections/welcome").exact());
		assert_eq!(table.routes[1].match_policy, MatchPolicy::Any);

		let registry = table.into_registry("toml", DuplicatePolicy::Warn).unwrap();
		assert_eq!(registry.len(), 3);
		assert_eq!(registry.get("sections/welcome").map(|d| d.is_exact()), Some(true));
		assert!(registry.get("sections/apps").is_some_and(|d| d.is_full_size()));

		let pages: CapabilitySet = ["MANAGE_PAGES"].into_iter().collect();
		assert!(matches!(registry.resolve("/page-types/1", &pages), MatchResult::Matched(_)));
	}

	#[test]
	fn parses_camel_case_json_array() {
		let json = r#"[
			{ "pathPattern": "/a", "exact": true, "permissions": [], "matchPolicy": "all", "moduleRef": "a" },
			{ "pathPattern": "/a/b", "exact": false, "permissions": ["X"], "matchPolicy": "any", "moduleRef": "ab" }
		]"#;
		let table = RouteTable::from_json_str(json).unwrap();
		assert_eq!(
			table.routes[1],
			RouteRecord::new("/a/b", "ab").require_any(["X"])
		);
	}

	#[test]
	fn parses_json_object() {
		let json = r#"{ "routes": [{ "path": "/orders", "module": "orders" }] }"#;
		let table = RouteTable::from_json_str(json).unwrap();
		assert_eq!(table.routes, vec![RouteRecord::new("/orders", "orders")]);
	}

	#[test]
	fn json_errors_come_from_the_matching_form() {
		let err = RouteTable::from_json_str(r#"[{ "path": "/x" }]"#).unwrap_err();
		assert!(err.to_string().contains("missing field `module`"), "{err}");

		let err = RouteTable::from_json_str(r#"{ "routes": [{ "module": "x" }] }"#).unwrap_err();
		assert!(err.to_string().contains("missing field `path`"), "{err}");
	}

	#[test]
	fn rejects_unknown_fields() {
		let err = RouteTable::from_toml_str("[[routes]]\npath = \"/\"\nmodule = \"m\"\ncolour = \"red\"\n").unwrap_err();
		assert!(matches!(err, RegistryError::Parse(_)));
	}

	#[test]
	fn invalid_records_report_their_index() {
		let table = RouteTable::new(vec![
			RouteRecord::new("/ok", "ok"),
			RouteRecord::new("relative", "bad"),
		]);
		let err = table.into_registry("test", DuplicatePolicy::Warn).unwrap_err();
		assert!(matches!(err, RegistryError::InvalidRoute { index: 1, .. }), "{err}");

		let table = RouteTable::new(vec![RouteRecord::new("/x", "  ")]);
		assert!(matches!(
			table.into_registry("test", DuplicatePolicy::Warn),
			Err(RegistryError::InvalidRoute { index: 0, .. })
		));
	}

	#[test]
	fn toml_roundtrip_keeps_order() {
		let table = RouteTable::from_toml_str(TOML_TABLE).unwrap();
		let text = table.to_toml_string().unwrap();
		assert_eq!(RouteTable::from_toml_str(&text).unwrap(), table);
	}

	#[test]
	fn load_picks_format_by_extension() {
		let dir = tempfile::tempdir().unwrap();

		let toml_path = dir.path().join("routes.toml");
		std::fs::write(&toml_path, TOML_TABLE).unwrap();
		assert_eq!(RouteTable::load(&toml_path).unwrap().routes.len(), 3);

		let json_path = dir.path().join("routes.json");
		let mut file = std::fs::File::create(&json_path).unwrap();
		file.write_all(br#"[{ "path": "/x", "module": "x" }]"#).unwrap();
		drop(file);
		assert_eq!(RouteTable::load(&json_path).unwrap().routes.len(), 1);

		let missing = dir.path().join("missing.toml");
		assert!(matches!(RouteTable::load(&missing), Err(RegistryError::Io { .. })));
	}
}
