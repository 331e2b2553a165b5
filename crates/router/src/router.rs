use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use dashgate_loader::LazyModuleLoader;
use dashgate_permissions::CapabilitySet;
use dashgate_registry::{MatchResult, SectionRegistry};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::generation::NavigationClock;
use crate::{
	Diagnostics, Navigation, RenderError, RenderFailure, Renderer, RouterState, SectionView, SessionSource, SessionState, View,
};

struct RouterInner<M> {
	state: RouterState,
	grants: CapabilitySet,
	anonymous: bool,
	/// Generation of the newest navigation; older ones must not present.
	latest: u64,
	current_path: Option<String>,
	view: View<M>,
}

impl<M> RouterInner<M> {
	fn apply_session(&mut self, session: SessionState) {
		match session {
			SessionState::Pending => {
				self.anonymous = false;
				self.enter_loading();
			}
			SessionState::Anonymous => {
				self.anonymous = true;
				self.grants.clear();
				self.enter_loading();
			}
			SessionState::Authenticated(grants) => {
				self.anonymous = false;
				if grants != self.grants {
					tracing::debug!(grants = %grants, "router.grants_changed");
					self.grants = grants;
				}
				if self.state == RouterState::Loading {
					tracing::debug!("router.ready");
					self.state = RouterState::Ready;
				}
			}
		}
	}

	fn enter_loading(&mut self) {
		if self.state != RouterState::Loading {
			tracing::debug!(from = self.state.as_str(), "router.loading");
			self.state = RouterState::Loading;
		}
	}

	/// Leaves the error state. Returns whether there was one.
	fn reset(&mut self) -> bool {
		match &self.state {
			RouterState::Error { error_id } => {
				tracing::debug!(error_id = %error_id, "router.reset");
				self.state = RouterState::Ready;
				true
			}
			_ => false,
		}
	}

	fn waiting_view(&self) -> View<M> {
		if self.anonymous { View::SignIn } else { View::Loading }
	}
}

/// Resolves navigations into views, gating each section on the session's
/// grants.
///
/// Navigations may overlap. Only the most recently started one presents its
/// result; earlier ones finish as [`Navigation::Superseded`].
///
/// Overlapping navigations are expected to be driven from one task or a
/// current-thread runtime. The staleness check and the render call are not
/// atomic, so navigations racing on separate threads may render a section that
/// is then discarded instead of presented.
///
/// A panicking [`Renderer`] is treated as a render failure.
pub struct GatedRouter<M> {
	registry: Arc<SectionRegistry>,
	loader: LazyModuleLoader<M>,
	session: Arc<dyn SessionSource>,
	renderer: Arc<dyn Renderer<M>>,
	diagnostics: Arc<dyn Diagnostics>,
	clock: NavigationClock,
	inner: Mutex<RouterInner<M>>,
}

impl<M> fmt::Debug for GatedRouter<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let inner = self.inner.lock();
		f.debug_struct("GatedRouter")
			.field("registry", &self.registry.label())
			.field("state", &inner.state)
			.field("current_path", &inner.current_path)
			.field("latest", &inner.latest)
			.finish_non_exhaustive()
	}
}

impl<M: Send + Sync + 'static> GatedRouter<M> {
	/// Creates a router in the [`RouterState::Loading`] state. The first
	/// [`navigate`](Self::navigate) or [`refresh_session`](Self::refresh_session)
	/// consults the session.
	pub fn new(
		registry: Arc<SectionRegistry>,
		loader: LazyModuleLoader<M>,
		session: Arc<dyn SessionSource>,
		renderer: Arc<dyn Renderer<M>>,
		diagnostics: Arc<dyn Diagnostics>,
	) -> Self {
		Self {
			registry,
			loader,
			session,
			renderer,
			diagnostics,
			clock: NavigationClock::default(),
			inner: Mutex::new(RouterInner {
				state: RouterState::Loading,
				grants: CapabilitySet::new(),
				anonymous: false,
				latest: 0,
				current_path: None,
				view: View::Loading,
			}),
		}
	}

	/// Handles a navigation event.
	///
	/// Never fails: unknown paths, missing grants, load failures and render
	/// failures all come back as views.
	pub async fn navigate(&self, path: &str) -> Navigation<M> {
		let generation = self.clock.next();
		let session = self.session.current_grants();
		let grants = {
			let mut inner = self.inner.lock();
			inner.latest = generation;
			inner.current_path = Some(path.to_owned());
			inner.reset();
			inner.apply_session(session);
			if inner.state == RouterState::Loading {
				let view = inner.waiting_view();
				tracing::debug!(path, generation, view = view.kind(), "router.deferred");
				inner.view = view.clone();
				return Navigation::Presented(view);
			}
			inner.grants.clone()
		};
		tracing::debug!(path, generation, "router.navigate");
		self.resolve(path, generation, &grants).await
	}

	/// Re-reads the session. When this brings the router out of
	/// [`RouterState::Loading`], the remembered path is navigated to.
	pub async fn refresh_session(&self) -> Option<Navigation<M>> {
		let session = self.session.current_grants();
		let resume = {
			let mut inner = self.inner.lock();
			let was_loading = inner.state == RouterState::Loading;
			inner.apply_session(session);
			if inner.state == RouterState::Loading {
				inner.view = inner.waiting_view();
				None
			} else if was_loading {
				inner.current_path.clone()
			} else {
				None
			}
		};
		match resume {
			Some(path) => Some(self.navigate(&path).await),
			None => None,
		}
	}

	/// Leaves [`RouterState::Error`] without navigating.
	pub fn reset(&self) -> bool {
		self.inner.lock().reset()
	}

	/// Leaves the error state and resolves the current path again from
	/// scratch. `None` if nothing was ever navigated to.
	pub async fn retry(&self) -> Option<Navigation<M>> {
		let path = {
			let mut inner = self.inner.lock();
			inner.reset();
			inner.current_path.clone()
		}?;
		tracing::debug!(path = %path, "router.retry");
		Some(self.navigate(&path).await)
	}

	pub fn state(&self) -> RouterState {
		self.inner.lock().state.clone()
	}

	pub fn current_path(&self) -> Option<String> {
		self.inner.lock().current_path.clone()
	}

	pub fn current_view(&self) -> View<M> {
		self.inner.lock().view.clone()
	}

	/// Grants as of the last session read.
	pub fn grants(&self) -> CapabilitySet {
		self.inner.lock().grants.clone()
	}

	pub fn registry(&self) -> &SectionRegistry {
		&self.registry
	}

	pub fn loader(&self) -> &LazyModuleLoader<M> {
		&self.loader
	}

	async fn resolve(&self, path: &str, generation: u64, grants: &CapabilitySet) -> Navigation<M> {
		match self.registry.resolve(path, grants) {
			MatchResult::NotFound => {
				tracing::debug!(path, "router.not_found");
				self.present(generation, View::NotFound { path: path.to_owned() })
			}
			MatchResult::Forbidden(descriptor) => {
				let required = descriptor.permissions();
				tracing::info!(
					path,
					section = descriptor.name(),
					required = %required,
					"router.forbidden"
				);
				self.present(
					generation,
					View::Forbidden {
						path: path.to_owned(),
						section: descriptor.name().to_owned(),
						missing: required.missing(grants),
					},
				)
			}
			MatchResult::Matched(descriptor) => {
				let loaded = self.loader.load(descriptor.module()).await;
				if self.is_superseded(generation) {
					tracing::debug!(path, generation, "router.superseded");
					return Navigation::Superseded;
				}
				match loaded {
					Ok(module) => self.render(generation, SectionView::new(path, descriptor, module)),
					Err(error) => self.present(
						generation,
						View::LoadFailed {
							path: path.to_owned(),
							error,
						},
					),
				}
			}
		}
	}

	fn render(&self, generation: u64, section: SectionView<M>) -> Navigation<M> {
		let rendered = catch_unwind(AssertUnwindSafe(|| self.renderer.render(&section)))
			.unwrap_or_else(|payload| Err(RenderFailure::new(panic_message(payload.as_ref()))));
		let failure = match rendered {
			Ok(()) => return self.present(generation, View::Section(section)),
			Err(failure) => failure,
		};

		let error_id = Uuid::new_v4().to_string();
		let error = RenderError {
			path: section.path,
			section: section.section,
			source: failure,
		};
		tracing::error!(error_id = %error_id, error = %error, "router.render_failed");
		self.diagnostics.capture(&error_id, &error);

		let mut inner = self.inner.lock();
		if inner.latest != generation {
			return Navigation::Superseded;
		}
		inner.state = RouterState::Error {
			error_id: error_id.clone(),
		};
		let view = View::Error { error_id };
		inner.view = view.clone();
		Navigation::Presented(view)
	}

	fn present(&self, generation: u64, view: View<M>) -> Navigation<M> {
		let mut inner = self.inner.lock();
		if inner.latest != generation {
			return Navigation::Superseded;
		}
		inner.view = view.clone();
		Navigation::Presented(view)
	}

	fn is_superseded(&self, generation: u64) -> bool {
		self.inner.lock().latest != generation
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		format!("render panicked: {message}")
	} else if let Some(message) = payload.downcast_ref::<String>() {
		format!("render panicked: {message}")
	} else {
		"render panicked".to_owned()
	}
}
