//! Key/value metadata attached to section descriptors.
//!
//! Lookups return the first entry with a matching key.

use serde::{Deserialize, Serialize};

/// Marks a section that takes the whole viewport (embedded apps).
pub const FULL_SIZE: &str = "full-size";
/// Window title shown while the section is active.
pub const TITLE: &str = "title";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
	pub key: String,
	pub value: String,
}

impl MetadataEntry {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}
}

/// Returns the value of the first entry named `key`.
pub fn metadata_value<'a>(entries: &'a [MetadataEntry], key: &str) -> Option<&'a str> {
	entries.iter().find(|entry| entry.key == key).map(|entry| entry.value.as_str())
}

/// Reads `key` as a flag: `Some(true)` only for the literal `"true"`,
/// `Some(false)` for any other value, `None` when absent.
pub fn metadata_flag(entries: &[MetadataEntry], key: &str) -> Option<bool> {
	metadata_value(entries, key).map(|value| value == "true")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entries() -> Vec<MetadataEntry> {
		vec![
			MetadataEntry::new(TITLE, "Apps"),
			MetadataEntry::new(FULL_SIZE, "true"),
			MetadataEntry::new("beta", "yes"),
			MetadataEntry::new(TITLE, "Shadowed"),
		]
	}

	#[test]
	fn first_entry_wins() {
		assert_eq!(metadata_value(&entries(), TITLE), Some("Apps"));
	}

	#[test]
	fn missing_key() {
		assert_eq!(metadata_value(&entries(), "nope"), None);
		assert_eq!(metadata_flag(&entries(), "nope"), None);
		assert_eq!(metadata_value(&[], TITLE), None);
	}

	#[test]
	fn flags_only_accept_literal_true() {
		assert_eq!(metadata_flag(&entries(), FULL_SIZE), Some(true));
		assert_eq!(metadata_flag(&entries(), "beta"), Some(false));
	}
}
