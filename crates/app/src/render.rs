use dashgate_router::{RenderFailure, Renderer, SectionView};
use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::SectionModule;

/// Logs each presented section in place of drawing it.
///
/// Sections listed with [`fail_on`](Self::fail_on) fail to render, which
/// exercises the router's error screen from the command line.
#[derive(Debug, Default)]
pub struct TracingRenderer {
	failing: Mutex<FxHashSet<String>>,
	rendered: Mutex<Vec<String>>,
}

impl TracingRenderer {
	pub fn fail_on(&self, section: impl Into<String>) {
		self.failing.lock().insert(section.into());
	}

	pub fn clear_failures(&self) {
		self.failing.lock().clear();
	}

	/// Section names rendered so far, including failed attempts.
	pub fn rendered(&self) -> Vec<String> {
		self.rendered.lock().clone()
	}
}

impl Renderer<SectionModule> for TracingRenderer {
	fn render(&self, section: &SectionView<SectionModule>) -> Result<(), RenderFailure> {
		self.rendered.lock().push(section.section.clone());
		if self.failing.lock().contains(&section.section) {
			return Err(RenderFailure::new(format!("bundle {} threw while rendering", section.module.name)));
		}
		tracing::info!(
			path = %section.path,
			section = %section.section,
			bundle = %section.module.name,
			full_size = section.full_size,
			"render"
		);
		Ok(())
	}
}
