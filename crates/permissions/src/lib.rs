//! Permission primitives for gated dashboard sections.
//!
//! - [`Capability`]: one atomic permission granted to a user
//! - [`CapabilitySet`]: the capabilities granted to the acting user
//! - [`MatchPolicy`]: whether a section needs all or any of its capabilities
//! - [`PermissionSet`]: required capabilities plus a match policy
//!
//! Evaluation is total: a capability nobody knows about is simply not granted.

mod capability;
pub mod known;
mod set;

pub use capability::{Capability, CapabilitySet};
pub use set::{MatchPolicy, PermissionSet, evaluate};
