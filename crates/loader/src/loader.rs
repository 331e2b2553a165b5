use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use dashgate_registry::ModuleRef;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::{LoadError, ModuleSource};

type SharedFetch<M> = Shared<BoxFuture<'static, Result<Arc<M>, LoadError>>>;
type Slots<M> = Arc<Mutex<FxHashMap<ModuleRef, Slot<M>>>>;

enum Slot<M> {
	/// Write-once: never replaced or evicted.
	Ready(Arc<M>),
	Pending { fetch_id: u64, fetch: SharedFetch<M> },
}

/// Fetches section modules on first use and caches them for its lifetime.
///
/// Clones share the same cache and in-flight table.
pub struct LazyModuleLoader<M> {
	source: Arc<dyn ModuleSource<Module = M>>,
	slots: Slots<M>,
	next_fetch_id: Arc<AtomicU64>,
	fetches: Arc<AtomicUsize>,
}

impl<M> Clone for LazyModuleLoader<M> {
	fn clone(&self) -> Self {
		Self {
			source: Arc::clone(&self.source),
			slots: Arc::clone(&self.slots),
			next_fetch_id: Arc::clone(&self.next_fetch_id),
			fetches: Arc::clone(&self.fetches),
		}
	}
}

impl<M> fmt::Debug for LazyModuleLoader<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let slots = self.slots.lock();
		let ready = slots.values().filter(|slot| matches!(slot, Slot::Ready(_))).count();
		f.debug_struct("LazyModuleLoader")
			.field("ready", &ready)
			.field("in_flight", &(slots.len() - ready))
			.field("fetches", &self.fetches.load(Ordering::Relaxed))
			.finish()
	}
}

impl<M: Send + Sync + 'static> LazyModuleLoader<M> {
	pub fn new(source: Arc<dyn ModuleSource<Module = M>>) -> Self {
		Self {
			source,
			slots: Arc::default(),
			next_fetch_id: Arc::default(),
			fetches: Arc::default(),
		}
	}

	pub fn from_source<S>(source: S) -> Self
	where
		S: ModuleSource<Module = M> + 'static,
	{
		Self::new(Arc::new(source))
	}

	/// Returns the module, fetching it if this is the first request.
	///
	/// Callers arriving while a fetch is in flight wait on that same fetch.
	/// The fetch runs as its own task: dropping the returned future does not
	/// cancel it, and a late success still lands in the cache.
	pub async fn load(&self, module: &ModuleRef) -> Result<Arc<M>, LoadError> {
		let fetch = {
			let mut slots = self.slots.lock();
			match slots.get(module) {
				Some(Slot::Ready(loaded)) => {
					tracing::trace!(module = %module, "loader.cache_hit");
					return Ok(Arc::clone(loaded));
				}
				Some(Slot::Pending { fetch, .. }) => {
					tracing::trace!(module = %module, "loader.join_in_flight");
					fetch.clone()
				}
				None => {
					let fetch_id = self.next_fetch_id.fetch_add(1, Ordering::Relaxed);
					let fetch = self.spawn_fetch(module.clone(), fetch_id);
					slots.insert(
						module.clone(),
						Slot::Pending {
							fetch_id,
							fetch: fetch.clone(),
						},
					);
					fetch
				}
			}
		};
		fetch.await
	}

	/// Loads every module concurrently, returning the failures.
	pub async fn preload<'a, I>(&self, modules: I) -> Vec<LoadError>
	where
		I: IntoIterator<Item = &'a ModuleRef>,
	{
		let loads = modules.into_iter().map(|module| self.load(module));
		futures::future::join_all(loads)
			.await
			.into_iter()
			.filter_map(Result::err)
			.collect()
	}

	fn spawn_fetch(&self, module: ModuleRef, fetch_id: u64) -> SharedFetch<M> {
		self.fetches.fetch_add(1, Ordering::Relaxed);
		tracing::debug!(module = %module, fetch_id, "loader.fetch_start");

		let source = Arc::clone(&self.source);
		let slots = Arc::clone(&self.slots);
		let task_module = module.clone();
		let task = tokio::spawn(async move {
			let result = source.fetch(&task_module).await;
			let mut slots = slots.lock();
			match result {
				Ok(loaded) => {
					let loaded = Arc::new(loaded);
					slots.insert(task_module.clone(), Slot::Ready(Arc::clone(&loaded)));
					tracing::debug!(module = %task_module, fetch_id, "loader.fetch_done");
					Ok(loaded)
				}
				Err(err) => {
					clear_pending(&mut slots, &task_module, fetch_id);
					tracing::warn!(module = %task_module, fetch_id, error = %err, "loader.fetch_failed");
					Err(LoadError::Fetch {
						module: task_module,
						source: err,
					})
				}
			}
		});

		let slots = Arc::clone(&self.slots);
		async move {
			match task.await {
				Ok(result) => result,
				Err(err) => {
					clear_pending(&mut slots.lock(), &module, fetch_id);
					tracing::error!(module = %module, fetch_id, error = %err, "loader.fetch_aborted");
					Err(LoadError::Aborted(module))
				}
			}
		}
		.boxed()
		.shared()
	}

	/// Returns the cached module without fetching.
	pub fn cached(&self, module: &ModuleRef) -> Option<Arc<M>> {
		match self.slots.lock().get(module) {
			Some(Slot::Ready(loaded)) => Some(Arc::clone(loaded)),
			_ => None,
		}
	}

	pub fn is_cached(&self, module: &ModuleRef) -> bool {
		self.cached(module).is_some()
	}

	pub fn cached_count(&self) -> usize {
		self.slots
			.lock()
			.values()
			.filter(|slot| matches!(slot, Slot::Ready(_)))
			.count()
	}

	pub fn in_flight_count(&self) -> usize {
		self.slots
			.lock()
			.values()
			.filter(|slot| matches!(slot, Slot::Pending { .. }))
			.count()
	}

	/// Total fetches started over the loader's lifetime.
	pub fn fetch_count(&self) -> usize {
		self.fetches.load(Ordering::Relaxed)
	}
}

/// Drops the pending slot of a failed fetch so the next `load` retries.
///
/// Only the slot owned by `fetch_id` is removed.
fn clear_pending<M>(slots: &mut FxHashMap<ModuleRef, Slot<M>>, module: &ModuleRef, fetch_id: u64) {
	if matches!(slots.get(module), Some(Slot::Pending { fetch_id: pending, .. }) if *pending == fetch_id) {
		slots.remove(module);
	}
}

#[cfg(test)]
mod tests;
