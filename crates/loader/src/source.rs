use async_trait::async_trait;
use dashgate_registry::ModuleRef;

use crate::FetchError;

/// Collaborator that produces a module's code on demand.
///
/// Timeouts and transport concerns belong to the implementation; the loader
/// only sees the final result.
#[async_trait]
pub trait ModuleSource: Send + Sync {
	type Module: Send + Sync + 'static;

	async fn fetch(&self, module: &ModuleRef) -> Result<Self::Module, FetchError>;
}
