use std::borrow::Borrow;
use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// An atomic permission granted to a user (e.g. `MANAGE_ORDERS`).
///
/// Any string is a valid capability. Values that no user is ever granted are
/// allowed and simply never match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(Box<str>);

impl Capability {
	/// Creates a capability from its name.
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self(name.into())
	}

	/// Returns the capability name.
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Capability {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for Capability {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Capability {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for Capability {
	fn from(name: String) -> Self {
		Self::new(name)
	}
}

impl From<&Capability> for Capability {
	fn from(cap: &Capability) -> Self {
		cap.clone()
	}
}

/// A set of capabilities, typically the ones granted to the acting user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
	inner: FxHashSet<Capability>,
}

impl CapabilitySet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns true if `cap` is in the set.
	#[inline]
	pub fn contains(&self, cap: &str) -> bool {
		self.inner.contains(cap)
	}

	/// Adds a capability. Returns false if it was already present.
	pub fn insert(&mut self, cap: impl Into<Capability>) -> bool {
		self.inner.insert(cap.into())
	}

	/// Removes every capability.
	pub fn clear(&mut self) {
		self.inner.clear();
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Iterates in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = &Capability> + '_ {
		self.inner.iter()
	}

	/// Returns the capabilities sorted by name, for stable output.
	pub fn sorted(&self) -> Vec<&Capability> {
		let mut caps: Vec<_> = self.inner.iter().collect();
		caps.sort();
		caps
	}
}

impl<T: Into<Capability>> FromIterator<T> for CapabilitySet {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self {
			inner: iter.into_iter().map(Into::into).collect(),
		}
	}
}

impl<T: Into<Capability>> Extend<T> for CapabilitySet {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		self.inner.extend(iter.into_iter().map(Into::into));
	}
}

impl<'a> IntoIterator for &'a CapabilitySet {
	type Item = &'a Capability;
	type IntoIter = std::collections::hash_set::Iter<'a, Capability>;

	fn into_iter(self) -> Self::IntoIter {
		self.inner.iter()
	}
}

impl fmt::Display for CapabilitySet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let names: Vec<&str> = self.sorted().into_iter().map(Capability::as_str).collect();
		write!(f, "{{{}}}", names.join(", "))
	}
}
