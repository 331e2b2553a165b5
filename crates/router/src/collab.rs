//! Collaborators the router depends on but does not implement.

use dashgate_permissions::CapabilitySet;

use crate::{RenderError, RenderFailure, SectionView};

/// What the authentication layer knows about the acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
	/// Authentication is still resolving.
	Pending,
	/// Nobody is signed in.
	Anonymous,
	/// Signed in with these grants. Grants may change between navigations.
	Authenticated(CapabilitySet),
}

/// Source of the acting user's grants.
pub trait SessionSource: Send + Sync {
	fn current_grants(&self) -> SessionState;
}

/// Puts a loaded section on screen.
pub trait Renderer<M>: Send + Sync {
	fn render(&self, section: &SectionView<M>) -> Result<(), RenderFailure>;
}

/// Out-of-band error reporting. Fire-and-forget.
pub trait Diagnostics: Send + Sync {
	fn capture(&self, error_id: &str, error: &RenderError);
}
