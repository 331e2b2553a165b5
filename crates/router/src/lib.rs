//! Permission-gated router.
//!
//! [`GatedRouter`] turns navigation events into [`View`]s. It resolves the
//! path against the [`SectionRegistry`](dashgate_registry::SectionRegistry),
//! checks the caller's grants, loads the section module through the
//! [`LazyModuleLoader`](dashgate_loader::LazyModuleLoader) and hands it to a
//! [`Renderer`]. Every failure ends as a view; nothing escapes the router.
//!
//! ```text
//!            session known             render fails
//!  Loading ─────────────────▶ Ready ─────────────────▶ Error
//!     ▲   session lost/pending  ▲                        │
//!     └─────────────────────────┴────────────────────────┘
//!                                  navigate / retry
//! ```

mod collab;
mod error;
mod generation;
mod router;
mod view;

pub use collab::{Diagnostics, Renderer, SessionSource, SessionState};
pub use error::{RenderError, RenderFailure};
pub use router::GatedRouter;
pub use view::{Navigation, RouterState, SectionView, View};
