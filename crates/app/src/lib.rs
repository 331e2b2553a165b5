//! Dashboard wiring for the gated router.
//!
//! [`AppContext`] assembles every collaborator in a fixed order from a
//! [`DashgateConfig`]; the `dashgate` binary drives it from the command line.

pub mod builtin;
pub mod commands;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod logging;
pub mod render;
pub mod session;
pub mod source;

pub use config::{ConfigError, DashgateConfig};
pub use context::{AppContext, ContextError};
pub use diagnostics::TracingDiagnostics;
pub use render::TracingRenderer;
pub use session::FixedSession;
pub use source::{SectionModule, StaticModuleSource};
