use std::fmt;
use std::sync::Arc;

use dashgate_loader::LoadError;
use dashgate_permissions::Capability;
use dashgate_registry::{ModuleRef, SectionDescriptor};

/// Router lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterState {
	/// Grants are not known yet.
	Loading,
	/// Grants are known; navigations resolve.
	Ready,
	/// A section failed to render. Left on the next navigation or retry.
	Error { error_id: String },
}

impl RouterState {
	pub fn as_str(&self) -> &'static str {
		match self {
			RouterState::Loading => "loading",
			RouterState::Ready => "ready",
			RouterState::Error { .. } => "error",
		}
	}
}

/// A resolved, permitted, loaded section.
pub struct SectionView<M> {
	pub path: String,
	pub section: String,
	pub module_ref: ModuleRef,
	pub module: Arc<M>,
	pub full_size: bool,
	pub title: Option<String>,
}

impl<M> SectionView<M> {
	pub(crate) fn new(path: &str, descriptor: &SectionDescriptor, module: Arc<M>) -> Self {
		Self {
			path: path.to_owned(),
			section: descriptor.name().to_owned(),
			module_ref: descriptor.module().clone(),
			module,
			full_size: descriptor.is_full_size(),
			title: descriptor.title().map(str::to_owned),
		}
	}
}

impl<M> Clone for SectionView<M> {
	fn clone(&self) -> Self {
		Self {
			path: self.path.clone(),
			section: self.section.clone(),
			module_ref: self.module_ref.clone(),
			module: Arc::clone(&self.module),
			full_size: self.full_size,
			title: self.title.clone(),
		}
	}
}

impl<M> fmt::Debug for SectionView<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SectionView")
			.field("path", &self.path)
			.field("section", &self.section)
			.field("module_ref", &self.module_ref)
			.field("full_size", &self.full_size)
			.field("title", &self.title)
			.finish_non_exhaustive()
	}
}

/// What the router currently presents.
pub enum View<M> {
	/// Waiting for the session.
	Loading,
	/// No user is signed in.
	SignIn,
	Section(SectionView<M>),
	/// Access denied; the path matched but grants were insufficient.
	Forbidden {
		path: String,
		section: String,
		missing: Vec<Capability>,
	},
	NotFound { path: String },
	/// The module could not be fetched. The next navigation retries.
	LoadFailed { path: String, error: LoadError },
	/// Generic error screen with a retry action.
	Error { error_id: String },
}

impl<M> View<M> {
	pub fn kind(&self) -> &'static str {
		match self {
			View::Loading => "loading",
			View::SignIn => "sign-in",
			View::Section(_) => "section",
			View::Forbidden { .. } => "forbidden",
			View::NotFound { .. } => "not-found",
			View::LoadFailed { .. } => "load-failed",
			View::Error { .. } => "error",
		}
	}

	pub fn as_section(&self) -> Option<&SectionView<M>> {
		match self {
			View::Section(section) => Some(section),
			_ => None,
		}
	}
}

impl<M> Clone for View<M> {
	fn clone(&self) -> Self {
		match self {
			View::Loading => View::Loading,
			View::SignIn => View::SignIn,
			View::Section(section) => View::Section(section.clone()),
			View::Forbidden { path, section, missing } => View::Forbidden {
				path: path.clone(),
				section: section.clone(),
				missing: missing.clone(),
			},
			View::NotFound { path } => View::NotFound { path: path.clone() },
			View::LoadFailed { path, error } => View::LoadFailed {
				path: path.clone(),
				error: error.clone(),
			},
			View::Error { error_id } => View::Error {
				error_id: error_id.clone(),
			},
		}
	}
}

impl<M> fmt::Debug for View<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			View::Loading => f.write_str("Loading"),
			View::SignIn => f.write_str("SignIn"),
			View::Section(section) => f.debug_tuple("Section").field(section).finish(),
			View::Forbidden { path, section, missing } => f
				.debug_struct("Forbidden")
				.field("path", path)
				.field("section", section)
				.field("missing", missing)
				.finish(),
			View::NotFound { path } => f.debug_struct("NotFound").field("path", path).finish(),
			View::LoadFailed { path, error } => f
				.debug_struct("LoadFailed")
				.field("path", path)
				.field("error", error)
				.finish(),
			View::Error { error_id } => f.debug_struct("Error").field("error_id", error_id).finish(),
		}
	}
}

impl<M> fmt::Display for View<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			View::Loading => f.write_str("loading"),
			View::SignIn => f.write_str("sign-in"),
			View::Section(section) => write!(f, "section {} ({})", section.section, section.path),
			View::Forbidden { path, missing, .. } => {
				let missing: Vec<&str> = missing.iter().map(Capability::as_str).collect();
				write!(f, "access denied to {path} (missing {})", missing.join(", "))
			}
			View::NotFound { path } => write!(f, "page not found: {path}"),
			View::LoadFailed { path, error } => write!(f, "could not load {path}: {error}"),
			View::Error { error_id } => write!(f, "something went wrong (error id {error_id})"),
		}
	}
}

/// Result of one navigation.
pub enum Navigation<M> {
	Presented(View<M>),
	/// A newer navigation started before this one finished; its result was
	/// dropped without rendering.
	Superseded,
}

impl<M> Navigation<M> {
	pub fn view(&self) -> Option<&View<M>> {
		match self {
			Navigation::Presented(view) => Some(view),
			Navigation::Superseded => None,
		}
	}

	pub fn is_superseded(&self) -> bool {
		matches!(self, Navigation::Superseded)
	}
}

impl<M> Clone for Navigation<M> {
	fn clone(&self) -> Self {
		match self {
			Navigation::Presented(view) => Navigation::Presented(view.clone()),
			Navigation::Superseded => Navigation::Superseded,
		}
	}
}

impl<M> fmt::Debug for Navigation<M> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Navigation::Presented(view) => f.debug_tuple("Presented").field(view).finish(),
			Navigation::Superseded => f.write_str("Superseded"),
		}
	}
}
