use dashgate_router::{Diagnostics, RenderError};
use parking_lot::Mutex;

/// Reports render failures through `tracing` and keeps their IDs.
#[derive(Debug, Default)]
pub struct TracingDiagnostics {
	captured: Mutex<Vec<String>>,
}

impl TracingDiagnostics {
	/// Error IDs captured so far, oldest first.
	pub fn captured(&self) -> Vec<String> {
		self.captured.lock().clone()
	}
}

impl Diagnostics for TracingDiagnostics {
	fn capture(&self, error_id: &str, error: &RenderError) {
		tracing::error!(
			error_id,
			path = %error.path,
			section = %error.section,
			reason = %error.source,
			"diagnostics.capture"
		);
		self.captured.lock().push(error_id.to_owned());
	}
}
