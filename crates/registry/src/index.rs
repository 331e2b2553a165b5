//! Ordered section index.
//!
//! Resolution scans descriptors in registration order and stops at the first
//! structural match, the way a router switch does. More specific patterns
//! must therefore be registered before broader prefixes:
//!
//! ```rust
//! use dashgate_permissions::{CapabilitySet, PermissionSet};
//! use dashgate_registry::{MatchResult, PathPattern, SectionDescriptor, SectionRegistryBuilder};
//!
//! let registry = SectionRegistryBuilder::new("dashboard")
//!     .register(SectionDescriptor::new("home", PathPattern::root(), "home").exact(true))
//!     .register(
//!         SectionDescriptor::new("orders", PathPattern::new("/orders").unwrap(), "orders")
//!             .permission(PermissionSet::all(["MANAGE_ORDERS"])),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let granted = CapabilitySet::new();
//! assert!(matches!(registry.resolve("/", &granted), MatchResult::Matched(_)));
//! assert!(matches!(registry.resolve("/orders/42", &granted), MatchResult::Forbidden(_)));
//! assert!(matches!(registry.resolve("/nowhere", &granted), MatchResult::NotFound));
//! ```

use dashgate_permissions::CapabilitySet;

use crate::{ConfigurationWarning, DuplicatePolicy, RegistryError, SectionDescriptor, WarningKind};

/// Outcome of resolving a path against a [`SectionRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult<'a> {
	/// The path matched and the caller holds the required permissions.
	Matched(&'a SectionDescriptor),
	/// The path matched but the permission check failed.
	Forbidden(&'a SectionDescriptor),
	/// No registered pattern accepts the path.
	NotFound,
}

impl<'a> MatchResult<'a> {
	/// Returns the structurally matched descriptor, permitted or not.
	pub fn descriptor(&self) -> Option<&'a SectionDescriptor> {
		match *self {
			MatchResult::Matched(d) | MatchResult::Forbidden(d) => Some(d),
			MatchResult::NotFound => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			MatchResult::Matched(_) => "matched",
			MatchResult::Forbidden(_) => "forbidden",
			MatchResult::NotFound => "not-found",
		}
	}
}

/// Ordered collection of section descriptors.
///
/// Lives for the whole process: built at startup, then only read.
#[derive(Debug, Clone)]
pub struct SectionRegistry {
	label: &'static str,
	descriptors: Vec<SectionDescriptor>,
	warnings: Vec<ConfigurationWarning>,
	policy: DuplicatePolicy,
}

impl SectionRegistry {
	/// Creates an empty registry.
	pub fn new(label: &'static str, policy: DuplicatePolicy) -> Self {
		Self {
			label,
			descriptors: Vec::new(),
			warnings: Vec::new(),
			policy,
		}
	}

	/// Appends a descriptor.
	///
	/// A descriptor that an earlier registration makes unreachable is still
	/// appended (first registration wins at resolve time) and recorded as a
	/// [`ConfigurationWarning`]. Under [`DuplicatePolicy::Deny`] an exact
	/// duplicate is rejected instead.
	pub fn register(&mut self, descriptor: SectionDescriptor) -> Result<(), RegistryError> {
		if let Some(warning) = self.unreachable_behind(&descriptor) {
			if warning.kind == WarningKind::Duplicate && self.policy == DuplicatePolicy::Deny {
				return Err(RegistryError::Duplicate {
					registry: self.label,
					pattern: warning.pattern.to_string(),
					existing: warning.winner,
					rejected: warning.section,
				});
			}
			tracing::warn!(
				registry = self.label,
				kind = %warning.kind,
				pattern = %warning.pattern,
				section = %warning.section,
				winner = %warning.winner,
				"registry.unreachable_route"
			);
			self.warnings.push(warning);
		}
		tracing::trace!(
			registry = self.label,
			pattern = %descriptor.pattern(),
			exact = descriptor.is_exact(),
			section = descriptor.name(),
			"registry.register"
		);
		self.descriptors.push(descriptor);
		Ok(())
	}

	fn unreachable_behind(&self, descriptor: &SectionDescriptor) -> Option<ConfigurationWarning> {
		let winner = self.descriptors.iter().find(|existing| {
			existing
				.pattern()
				.covers(existing.is_exact(), descriptor.pattern(), descriptor.is_exact())
		})?;
		let kind = if winner.pattern() == descriptor.pattern() && winner.is_exact() == descriptor.is_exact() {
			WarningKind::Duplicate
		} else {
			WarningKind::Shadowed
		};
		Some(ConfigurationWarning {
			kind,
			pattern: descriptor.pattern().clone(),
			section: descriptor.name().to_owned(),
			winner_pattern: winner.pattern().clone(),
			winner: winner.name().to_owned(),
			registry: self.label,
		})
	}

	/// Returns the first descriptor whose pattern accepts `path`, ignoring
	/// permissions.
	pub fn find(&self, path: &str) -> Option<&SectionDescriptor> {
		self.descriptors.iter().find(|d| d.matches(path))
	}

	/// Resolves `path` for a caller holding `granted`.
	///
	/// Only the first structural match is considered: a forbidden match is
	/// reported as [`MatchResult::Forbidden`] even if a later descriptor would
	/// have been permitted.
	pub fn resolve(&self, path: &str, granted: &CapabilitySet) -> MatchResult<'_> {
		match self.find(path) {
			None => MatchResult::NotFound,
			Some(d) if d.is_permitted(granted) => MatchResult::Matched(d),
			Some(d) => MatchResult::Forbidden(d),
		}
	}

	/// Looks up a descriptor by section name.
	pub fn get(&self, name: &str) -> Option<&SectionDescriptor> {
		self.descriptors.iter().find(|d| d.name() == name)
	}

	/// Warnings collected while registering.
	#[inline]
	pub fn warnings(&self) -> &[ConfigurationWarning] {
		&self.warnings
	}

	#[inline]
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Iterates descriptors in registration order.
	#[inline]
	pub fn iter(&self) -> impl Iterator<Item = &SectionDescriptor> + '_ {
		self.descriptors.iter()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.descriptors.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}
}

/// Builder for constructing a [`SectionRegistry`] from a static declaration
/// list.
pub struct SectionRegistryBuilder {
	label: &'static str,
	descriptors: Vec<SectionDescriptor>,
	policy: DuplicatePolicy,
}

impl SectionRegistryBuilder {
	/// Creates a new builder with the given label for diagnostics.
	pub fn new(label: &'static str) -> Self {
		Self {
			label,
			descriptors: Vec::new(),
			policy: DuplicatePolicy::default(),
		}
	}

	/// Sets the duplicate pattern handling policy.
	pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Adds a single descriptor.
	pub fn register(mut self, descriptor: SectionDescriptor) -> Self {
		self.descriptors.push(descriptor);
		self
	}

	/// Adds multiple descriptors, keeping their order.
	pub fn extend<I: IntoIterator<Item = SectionDescriptor>>(mut self, descriptors: I) -> Self {
		self.descriptors.extend(descriptors);
		self
	}

	/// Builds the registry, applying the duplicate policy in order.
	pub fn build(self) -> Result<SectionRegistry, RegistryError> {
		let mut registry = SectionRegistry::new(self.label, self.policy);
		for descriptor in self.descriptors {
			registry.register(descriptor)?;
		}
		tracing::debug!(
			registry = registry.label,
			sections = registry.len(),
			warnings = registry.warnings.len(),
			"registry.built"
		);
		Ok(registry)
	}
}
