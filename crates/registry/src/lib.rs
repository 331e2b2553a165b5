//! Section registry infrastructure.
//!
//! This crate provides the routing table behind the dashboard:
//! - [`PathPattern`]: normalized URL pattern with exact or prefix matching
//! - [`SectionDescriptor`]: binds a pattern to a module and a permission set
//! - [`SectionRegistry`]: ordered descriptors, first structural match wins
//! - [`MatchResult`]: `Matched`, `Forbidden` or `NotFound`
//! - [`RouteTable`]: the declarative route list loaded at startup
//! - [`ConfigurationWarning`]: duplicate or shadowed patterns found at build time

mod collision;
mod descriptor;
mod error;
mod index;
pub mod metadata;
mod pattern;
mod table;

pub use collision::{ConfigurationWarning, DuplicatePolicy, WarningKind};
pub use descriptor::{ModuleRef, SectionDescriptor};
pub use error::RegistryError;
pub use index::{MatchResult, SectionRegistry, SectionRegistryBuilder};
pub use metadata::MetadataEntry;
pub use pattern::{PathPattern, normalize_path};
pub use table::{RouteRecord, RouteTable};
