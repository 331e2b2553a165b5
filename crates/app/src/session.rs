use dashgate_permissions::CapabilitySet;
use dashgate_router::{SessionSource, SessionState};
use parking_lot::RwLock;

/// Session whose state is set by the host rather than an auth backend.
#[derive(Debug)]
pub struct FixedSession {
	state: RwLock<SessionState>,
}

impl FixedSession {
	pub fn new(state: SessionState) -> Self {
		Self {
			state: RwLock::new(state),
		}
	}

	pub fn authenticated(grants: CapabilitySet) -> Self {
		Self::new(SessionState::Authenticated(grants))
	}

	pub fn anonymous() -> Self {
		Self::new(SessionState::Anonymous)
	}

	/// Replaces the session; the router sees it on its next read.
	pub fn set(&self, state: SessionState) {
		*self.state.write() = state;
	}
}

impl Default for FixedSession {
	fn default() -> Self {
		Self::new(SessionState::Pending)
	}
}

impl SessionSource for FixedSession {
	fn current_grants(&self) -> SessionState {
		self.state.read().clone()
	}
}
