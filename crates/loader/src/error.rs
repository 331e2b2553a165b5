use dashgate_registry::ModuleRef;
use thiserror::Error;

/// Failure reported by a [`ModuleSource`](crate::ModuleSource).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
	/// The source has no module under this reference.
	#[error("unknown module {0}")]
	Unknown(ModuleRef),
	/// The source knows the module but could not deliver it.
	#[error("{0}")]
	Failed(String),
}

/// Failure delivered to every caller waiting on the same fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
	#[error("failed to load module {module}: {source}")]
	Fetch {
		module: ModuleRef,
		#[source]
		source: FetchError,
	},
	/// The fetch task ended without producing a result (panic or runtime
	/// shutdown).
	#[error("fetch of module {0} was aborted")]
	Aborted(ModuleRef),
}

impl LoadError {
	pub fn module(&self) -> &ModuleRef {
		match self {
			LoadError::Fetch { module, .. } | LoadError::Aborted(module) => module,
		}
	}
}
