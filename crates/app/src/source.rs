use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashgate_loader::{FetchError, ModuleSource};
use dashgate_registry::{ModuleRef, SectionRegistry};
use rustc_hash::FxHashSet;

/// Placeholder for a section's UI bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionModule {
	pub module: ModuleRef,
	/// Bundle name, the last segment of the module reference.
	pub name: String,
}

/// Serves every module a registry refers to, optionally after a delay.
#[derive(Debug, Clone, Default)]
pub struct StaticModuleSource {
	known: Arc<FxHashSet<ModuleRef>>,
	latency: Option<Duration>,
}

impl StaticModuleSource {
	pub fn new(modules: impl IntoIterator<Item = ModuleRef>) -> Self {
		Self {
			known: Arc::new(modules.into_iter().collect()),
			latency: None,
		}
	}

	pub fn for_registry(registry: &SectionRegistry) -> Self {
		Self::new(registry.iter().map(|d| d.module().clone()))
	}

	pub fn with_latency(mut self, latency: Option<Duration>) -> Self {
		self.latency = latency;
		self
	}

	pub fn len(&self) -> usize {
		self.known.len()
	}

	pub fn is_empty(&self) -> bool {
		self.known.is_empty()
	}
}

#[async_trait]
impl ModuleSource for StaticModuleSource {
	type Module = SectionModule;

	async fn fetch(&self, module: &ModuleRef) -> Result<SectionModule, FetchError> {
		if let Some(latency) = self.latency {
			tokio::time::sleep(latency).await;
		}
		if !self.known.contains(module) {
			return Err(FetchError::Unknown(module.clone()));
		}
		let name = module.as_str().rsplit('/').next().unwrap_or(module.as_str());
		Ok(SectionModule {
			module: module.clone(),
			name: name.to_owned(),
		})
	}
}
