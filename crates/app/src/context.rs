use std::sync::Arc;

use dashgate_loader::{LazyModuleLoader, ModuleSource};
use dashgate_registry::{DuplicatePolicy, RegistryError, RouteTable, SectionRegistry};
use dashgate_router::{Diagnostics, GatedRouter, Renderer, SessionSource, SessionState};
use thiserror::Error;

use crate::{builtin, DashgateConfig, FixedSession, SectionModule, StaticModuleSource, TracingDiagnostics, TracingRenderer};

#[derive(Debug, Error)]
pub enum ContextError {
	#[error("route table: {0}")]
	Registry(#[from] RegistryError),
}

/// Every collaborator of a running dashboard, built once at startup.
///
/// Construction order is fixed: config, registry, loader, session,
/// diagnostics, router.
pub struct AppContext {
	pub config: DashgateConfig,
	pub registry: Arc<SectionRegistry>,
	pub loader: LazyModuleLoader<SectionModule>,
	pub session: Arc<FixedSession>,
	pub renderer: Arc<TracingRenderer>,
	pub diagnostics: Arc<TracingDiagnostics>,
	pub router: GatedRouter<SectionModule>,
}

impl AppContext {
	pub fn build(config: DashgateConfig, session: SessionState) -> Result<Self, ContextError> {
		let registry = Arc::new(load_registry(&config, config.registry.duplicate_policy)?);

		let source = StaticModuleSource::for_registry(&registry).with_latency(config.loader.latency());
		tracing::debug!(modules = source.len(), "context.module_source");
		let loader = LazyModuleLoader::new(Arc::new(source) as Arc<dyn ModuleSource<Module = SectionModule>>);

		let session = Arc::new(FixedSession::new(session));
		let renderer = Arc::new(TracingRenderer::default());
		let diagnostics = Arc::new(TracingDiagnostics::default());

		let router = GatedRouter::new(
			Arc::clone(&registry),
			loader.clone(),
			Arc::clone(&session) as Arc<dyn SessionSource>,
			Arc::clone(&renderer) as Arc<dyn Renderer<SectionModule>>,
			Arc::clone(&diagnostics) as Arc<dyn Diagnostics>,
		);

		tracing::info!(
			title = %config.app.title,
			demo_mode = config.app.demo_mode,
			sections = registry.len(),
			warnings = registry.warnings().len(),
			"context.ready"
		);
		Ok(Self {
			config,
			registry,
			loader,
			session,
			renderer,
			diagnostics,
			router,
		})
	}
}

/// Builds the registry named by `[routes] file`, or the builtin table.
pub fn load_registry(config: &DashgateConfig, policy: DuplicatePolicy) -> Result<SectionRegistry, RegistryError> {
	match &config.routes.file {
		Some(path) => {
			tracing::debug!(path = %path.display(), "context.route_file");
			RouteTable::load(path)?.into_registry("routes", policy)
		}
		None => builtin::dashboard_routes().into_registry("builtin", policy),
	}
}
