use std::sync::atomic::AtomicUsize;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use super::*;
use crate::FetchError;

#[derive(Debug, PartialEq, Eq)]
struct TestModule {
	name: String,
}

/// Module source with optional per-module gates and scripted failures.
#[derive(Default)]
struct TestSource {
	gated: bool,
	fetches: AtomicUsize,
	failures: AtomicUsize,
	panics: AtomicUsize,
	gates: Mutex<FxHashMap<String, Arc<Semaphore>>>,
}

impl TestSource {
	fn gated() -> Arc<Self> {
		Arc::new(Self {
			gated: true,
			..Self::default()
		})
	}

	fn immediate() -> Arc<Self> {
		Arc::new(Self::default())
	}

	fn fail_next(&self, times: usize) {
		self.failures.store(times, Ordering::SeqCst);
	}

	fn panic_next(&self) {
		self.panics.store(1, Ordering::SeqCst);
	}

	fn gate(&self, name: &str) -> Arc<Semaphore> {
		Arc::clone(
			self.gates
				.lock()
				.entry(name.to_owned())
				.or_insert_with(|| Arc::new(Semaphore::new(0))),
		)
	}

	fn release(&self, name: &str) {
		self.gate(name).add_permits(1);
	}

	fn fetches(&self) -> usize {
		self.fetches.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl ModuleSource for TestSource {
	type Module = TestModule;

	async fn fetch(&self, module: &ModuleRef) -> Result<TestModule, FetchError> {
		self.fetches.fetch_add(1, Ordering::SeqCst);
		if self.gated {
			let gate = self.gate(module.as_str());
			let _permit = gate
				.acquire()
				.await
				.map_err(|_| FetchError::Failed("gate closed".into()))?;
		}
		if self
			.panics
			.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
			.is_ok()
		{
			panic!("module source exploded");
		}
		if self
			.failures
			.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
			.is_ok()
		{
			return Err(FetchError::Failed("network down".into()));
		}
		Ok(TestModule {
			name: module.to_string(),
		})
	}
}

fn loader_for(source: &Arc<TestSource>) -> LazyModuleLoader<TestModule> {
	LazyModuleLoader::new(Arc::clone(source) as Arc<dyn ModuleSource<Module = TestModule>>)
}

#[tokio::test]
async fn repeat_loads_return_the_cached_instance() {
	let source = TestSource::immediate();
	let loader = loader_for(&source);
	let orders = ModuleRef::new("orders");

	let first = loader.load(&orders).await.unwrap();
	let second = loader.load(&orders).await.unwrap();
	let third = loader.load(&orders).await.unwrap();

	assert_eq!(first.name, "orders");
	assert!(Arc::ptr_eq(&first, &second));
	assert!(Arc::ptr_eq(&second, &third));
	assert_eq!(source.fetches(), 1);
	assert_eq!(loader.fetch_count(), 1);
	assert!(loader.is_cached(&orders));
}

#[tokio::test]
async fn concurrent_loads_share_one_fetch() {
	let source = TestSource::gated();
	let loader = loader_for(&source);
	let orders = ModuleRef::new("orders");

	let (first, second) = tokio::join!(loader.load(&orders), async {
		tokio::task::yield_now().await;
		assert_eq!(loader.in_flight_count(), 1);
		source.release("orders");
		loader.load(&orders).await
	});

	let (first, second) = (first.unwrap(), second.unwrap());
	assert!(Arc::ptr_eq(&first, &second));
	assert_eq!(source.fetches(), 1);
	assert_eq!(loader.in_flight_count(), 0);
}

#[tokio::test]
async fn failure_reaches_every_waiter_and_is_not_cached() {
	let source = TestSource::gated();
	source.fail_next(1);
	let loader = loader_for(&source);
	let plugins = ModuleRef::new("plugins");

	let (first, second) = tokio::join!(loader.load(&plugins), async {
		tokio::task::yield_now().await;
		source.release("plugins");
		loader.load(&plugins).await
	});

	let expected = LoadError::Fetch {
		module: plugins.clone(),
		source: FetchError::Failed("network down".into()),
	};
	assert_eq!(first.unwrap_err(), expected);
	assert_eq!(second.unwrap_err(), expected);
	assert_eq!(source.fetches(), 1);
	assert!(!loader.is_cached(&plugins));
	assert_eq!(loader.in_flight_count(), 0);

	source.release("plugins");
	let retried = loader.load(&plugins).await.unwrap();
	assert_eq!(retried.name, "plugins");
	assert_eq!(source.fetches(), 2);
	assert!(loader.is_cached(&plugins));
}

#[tokio::test]
async fn modules_are_fetched_independently() {
	let source = TestSource::immediate();
	let loader = loader_for(&source);

	let orders = loader.load(&ModuleRef::new("orders")).await.unwrap();
	let taxes = loader.load(&ModuleRef::new("taxes")).await.unwrap();

	assert!(!Arc::ptr_eq(&orders, &taxes));
	assert_eq!(loader.cached_count(), 2);
	assert_eq!(source.fetches(), 2);
}

#[tokio::test]
async fn abandoned_load_still_populates_the_cache() {
	let source = TestSource::gated();
	let loader = loader_for(&source);
	let apps = ModuleRef::new("apps");

	let abandoned = tokio::time::timeout(Duration::from_millis(10), loader.load(&apps)).await;
	assert!(abandoned.is_err(), "gate is closed, load must still be pending");

	source.release("apps");
	for _ in 0..100 {
		if loader.is_cached(&apps) {
			break;
		}
		tokio::task::yield_now().await;
	}

	assert!(loader.is_cached(&apps));
	loader.load(&apps).await.unwrap();
	assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn aborted_fetch_is_reported_and_retried() {
	let source = TestSource::immediate();
	source.panic_next();
	let loader = loader_for(&source);
	let staff = ModuleRef::new("staff");

	let err = loader.load(&staff).await.unwrap_err();
	assert_eq!(err, LoadError::Aborted(staff.clone()));
	assert_eq!(err.module(), &staff);
	assert_eq!(loader.in_flight_count(), 0);

	assert!(loader.load(&staff).await.is_ok());
	assert_eq!(source.fetches(), 2);
}

#[tokio::test]
async fn preload_reports_failures() {
	let source = TestSource::immediate();
	source.fail_next(1);
	let loader = loader_for(&source);
	let modules = [ModuleRef::new("a")];

	let failures = loader.preload(&modules).await;
	assert_eq!(failures.len(), 1);
	assert_eq!(failures[0].module(), &modules[0]);

	assert!(loader.preload(&modules).await.is_empty());
	assert!(loader.is_cached(&modules[0]));
}
