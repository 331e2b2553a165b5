use thiserror::Error;

/// Raised by a [`Renderer`](crate::Renderer) when a section module fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RenderFailure {
	message: String,
}

impl RenderFailure {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

/// A render failure tied to the navigation that caused it, as handed to
/// [`Diagnostics`](crate::Diagnostics).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("section {section} failed to render at {path}: {source}")]
pub struct RenderError {
	pub path: String,
	pub section: String,
	#[source]
	pub source: RenderFailure,
}
