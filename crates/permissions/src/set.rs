use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Capability, CapabilitySet};

/// How the required capabilities of a [`PermissionSet`] are matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
	/// Every required capability must be granted.
	#[default]
	All,
	/// At least one required capability must be granted.
	Any,
}

impl MatchPolicy {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::All => "all",
			Self::Any => "any",
		}
	}
}

impl fmt::Display for MatchPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Capabilities a section requires, plus the policy used to match them.
///
/// An empty requirement marks a public section and is satisfied by any grant,
/// including an empty one. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
	required: CapabilitySet,
	policy: MatchPolicy,
}

impl PermissionSet {
	pub fn new<I, T>(policy: MatchPolicy, required: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Capability>,
	{
		Self {
			required: required.into_iter().collect(),
			policy,
		}
	}

	/// A set with no requirements.
	pub fn public() -> Self {
		Self::default()
	}

	/// Requires every capability in `required`.
	pub fn all<I, T>(required: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Capability>,
	{
		Self::new(MatchPolicy::All, required)
	}

	/// Requires at least one capability in `required`.
	pub fn any<I, T>(required: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Capability>,
	{
		Self::new(MatchPolicy::Any, required)
	}

	#[inline]
	pub fn required(&self) -> &CapabilitySet {
		&self.required
	}

	#[inline]
	pub fn policy(&self) -> MatchPolicy {
		self.policy
	}

	#[inline]
	pub fn is_public(&self) -> bool {
		self.required.is_empty()
	}

	/// Returns true if `granted` satisfies this set.
	pub fn is_satisfied_by(&self, granted: &CapabilitySet) -> bool {
		if self.required.is_empty() {
			return true;
		}
		match self.policy {
			MatchPolicy::All => self.required.iter().all(|cap| granted.contains(cap.as_str())),
			MatchPolicy::Any => self.required.iter().any(|cap| granted.contains(cap.as_str())),
		}
	}

	/// Required capabilities absent from `granted`, sorted by name.
	///
	/// Empty when the set is satisfied. Under [`MatchPolicy::Any`] an
	/// unsatisfied set reports every required capability, since any one of
	/// them would do.
	pub fn missing(&self, granted: &CapabilitySet) -> Vec<Capability> {
		if self.is_satisfied_by(granted) {
			return Vec::new();
		}
		self.required
			.sorted()
			.into_iter()
			.filter(|cap| !granted.contains(cap.as_str()))
			.cloned()
			.collect()
	}
}

impl fmt::Display for PermissionSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_public() {
			return f.write_str("public");
		}
		write!(f, "{}{}", self.policy, self.required)
	}
}

/// Evaluates `required` against the capabilities in `granted`.
///
/// Pure and total; see [`PermissionSet::is_satisfied_by`].
#[inline]
pub fn evaluate(required: &PermissionSet, granted: &CapabilitySet) -> bool {
	required.is_satisfied_by(granted)
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;

	fn grants(caps: &[&str]) -> CapabilitySet {
		caps.iter().copied().collect()
	}

	#[rstest]
	#[case::all_partial(MatchPolicy::All, &["a"], false)]
	#[case::all_full(MatchPolicy::All, &["a", "b"], true)]
	#[case::all_superset(MatchPolicy::All, &["a", "b", "c"], true)]
	#[case::all_none(MatchPolicy::All, &[], false)]
	#[case::any_one(MatchPolicy::Any, &["a"], true)]
	#[case::any_other(MatchPolicy::Any, &["b"], true)]
	#[case::any_none(MatchPolicy::Any, &[], false)]
	#[case::any_unrelated(MatchPolicy::Any, &["z"], false)]
	fn two_capability_requirements(#[case] policy: MatchPolicy, #[case] granted: &[&str], #[case] expected: bool) {
		let required = PermissionSet::new(policy, ["a", "b"]);
		assert_eq!(evaluate(&required, &grants(granted)), expected);
	}

	#[test]
	fn unknown_capability_is_not_granted() {
		let required = PermissionSet::all(["NOT_A_REAL_PERMISSION"]);
		assert!(!required.is_satisfied_by(&grants(&["MANAGE_ORDERS"])));
	}

	#[test]
	fn missing_lists_absent_capabilities() {
		let required = PermissionSet::all(["b", "a", "c"]);
		let missing = required.missing(&grants(&["b"]));
		let names: Vec<_> = missing.iter().map(Capability::as_str).collect();
		assert_eq!(names, ["a", "c"]);
		assert!(required.missing(&grants(&["a", "b", "c"])).is_empty());
	}

	#[test]
	fn missing_is_empty_when_any_is_satisfied() {
		let required = PermissionSet::any(["a", "b"]);
		assert!(required.missing(&grants(&["b"])).is_empty());
		assert_eq!(required.missing(&grants(&[])).len(), 2);
	}

	#[test]
	fn display() {
		assert_eq!(PermissionSet::public().to_string(), "public");
		assert_eq!(PermissionSet::any(["b", "a"]).to_string(), "any{a, b}");
	}

	#[test]
	fn policy_serde_is_lowercase() {
		let policy: MatchPolicy = serde_json::from_str(r#""any""#).unwrap();
		assert_eq!(policy, MatchPolicy::Any);
		assert_eq!(serde_json::to_string(&MatchPolicy::All).unwrap(), r#""all""#);
	}

	fn arb_caps() -> impl Strategy<Value = Vec<String>> {
		prop::collection::vec("[A-Z_]{1,12}", 0..8)
	}

	proptest! {
		#[test]
		fn prop_public_always_matches(granted in arb_caps(), use_any in any::<bool>()) {
			let policy = if use_any { MatchPolicy::Any } else { MatchPolicy::All };
			let required = PermissionSet::new(policy, Vec::<String>::new());
			prop_assert!(evaluate(&required, &granted.into_iter().collect()));
		}

		#[test]
		fn prop_all_matches_iff_subset(required in arb_caps(), granted in arb_caps()) {
			let set = PermissionSet::all(required.clone());
			let granted: CapabilitySet = granted.into_iter().collect();
			let subset = required.iter().all(|cap| granted.contains(cap));
			prop_assert_eq!(set.is_satisfied_by(&granted), subset);
		}

		#[test]
		fn prop_any_matches_iff_intersects(required in arb_caps(), granted in arb_caps()) {
			let set = PermissionSet::any(required.clone());
			let granted: CapabilitySet = granted.into_iter().collect();
			let expected = required.is_empty() || required.iter().any(|cap| granted.contains(cap));
			prop_assert_eq!(set.is_satisfied_by(&granted), expected);
		}
	}
}
