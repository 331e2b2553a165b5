//! Lazy loading of section modules.
//!
//! [`LazyModuleLoader`] wraps a [`ModuleSource`] and fetches each module on
//! first use. Results are cached for the lifetime of the loader, concurrent
//! requests for the same module share one in-flight fetch, and failures are
//! never cached so the next request retries.

mod error;
mod loader;
mod source;

pub use error::{FetchError, LoadError};
pub use loader::LazyModuleLoader;
pub use source::ModuleSource;
