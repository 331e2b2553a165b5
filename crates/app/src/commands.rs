//! Command implementations behind the `dashgate` binary.
//!
//! Each command writes its report to `out` so it can be checked without a
//! terminal.

use std::io::Write;

use anyhow::Context;
use dashgate_permissions::{Capability, CapabilitySet, known};
use dashgate_registry::{DuplicatePolicy, MatchResult, SectionRegistry};
use dashgate_router::{Navigation, SessionState};

use crate::context::load_registry;
use crate::{AppContext, DashgateConfig};

/// Collects `--grant` values, or every known capability.
pub fn grants_from(caps: &[String], grant_all: bool) -> CapabilitySet {
	let mut grants: CapabilitySet = caps.iter().map(String::as_str).collect();
	if grant_all {
		grants.extend(known::ALL.iter().copied());
	}
	grants
}

fn join(caps: &[Capability]) -> String {
	caps.iter().map(Capability::as_str).collect::<Vec<_>>().join(", ")
}

/// Prints the registry in resolution order.
pub fn routes(config: &DashgateConfig, out: &mut impl Write) -> anyhow::Result<()> {
	let registry = load_registry(config, config.registry.duplicate_policy)?;
	writeln!(out, "{:<22} {:<6} {:<56} MODULE", "PATTERN", "MATCH", "PERMISSIONS")?;
	for descriptor in registry.iter() {
		writeln!(
			out,
			"{:<22} {:<6} {:<56} {}",
			descriptor.pattern().as_str(),
			if descriptor.is_exact() { "exact" } else { "prefix" },
			descriptor.permissions().to_string(),
			descriptor.module(),
		)?;
	}
	Ok(())
}

/// Resolves one path and explains the outcome.
pub fn resolve(registry: &SectionRegistry, path: &str, grants: &CapabilitySet, out: &mut impl Write) -> anyhow::Result<()> {
	match registry.resolve(path, grants) {
		MatchResult::Matched(descriptor) => {
			writeln!(out, "matched {} ({})", descriptor.name(), descriptor.module())?;
		}
		MatchResult::Forbidden(descriptor) => {
			let missing = descriptor.permissions().missing(grants);
			writeln!(
				out,
				"forbidden {} (requires {}; missing {})",
				descriptor.name(),
				descriptor.permissions(),
				join(&missing)
			)?;
		}
		MatchResult::NotFound => writeln!(out, "not-found {path}")?,
	}
	Ok(())
}

/// Options for [`navigate`].
#[derive(Debug, Default)]
pub struct NavigateOptions {
	pub grants: CapabilitySet,
	pub anonymous: bool,
	/// Sections whose render should fail.
	pub fail_render: Vec<String>,
}

/// Drives the router over `paths` in order and prints each view.
pub async fn navigate(config: DashgateConfig, paths: &[String], options: NavigateOptions, out: &mut impl Write) -> anyhow::Result<()> {
	let session = if options.anonymous {
		SessionState::Anonymous
	} else {
		SessionState::Authenticated(options.grants)
	};
	let ctx = AppContext::build(config, session).context("failed to build the dashboard context")?;
	for section in options.fail_render {
		ctx.renderer.fail_on(section);
	}

	if ctx.config.app.demo_mode {
		writeln!(out, "[demo] {}", ctx.config.app.title)?;
	}
	for path in paths {
		match ctx.router.navigate(path).await {
			Navigation::Presented(view) => writeln!(out, "{path} -> {view}")?,
			Navigation::Superseded => writeln!(out, "{path} -> superseded")?,
		}
	}
	writeln!(
		out,
		"state: {}, modules loaded: {}",
		ctx.router.state().as_str(),
		ctx.loader.cached_count()
	)?;
	Ok(())
}

/// Builds the registry and reports configuration warnings. `strict` rejects
/// duplicate patterns. Returns the number of warnings.
pub fn check(config: &DashgateConfig, strict: bool, out: &mut impl Write) -> anyhow::Result<usize> {
	let policy = if strict {
		DuplicatePolicy::Deny
	} else {
		config.registry.duplicate_policy
	};
	let registry = load_registry(config, policy).context("route table check failed")?;
	for warning in registry.warnings() {
		writeln!(out, "warning: {warning}")?;
	}
	writeln!(
		out,
		"{}: {} sections, {} warnings",
		registry.label(),
		registry.len(),
		registry.warnings().len()
	)?;
	Ok(registry.warnings().len())
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn output(write: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
		let mut out = Vec::new();
		write(&mut out).unwrap();
		String::from_utf8(out).unwrap()
	}

	fn builtin() -> SectionRegistry {
		load_registry(&DashgateConfig::default(), DuplicatePolicy::Warn).unwrap()
	}

	#[test]
	fn grant_all_adds_known_capabilities() {
		let grants = grants_from(&["CUSTOM".to_owned()], true);
		assert!(grants.contains("CUSTOM"));
		assert!(grants.contains(known::MANAGE_ORDERS));
		assert_eq!(grants.len(), known::ALL.len() + 1);
		assert!(grants_from(&[], false).is_empty());
	}

	#[test]
	fn resolve_explains_denials() {
		let registry = builtin();
		let text = output(|out| resolve(&registry, "/orders/1", &CapabilitySet::new(), out));
		assert_eq!(text, "forbidden orders (requires all{MANAGE_ORDERS}; missing MANAGE_ORDERS)\n");

		let grants = grants_from(&[known::MANAGE_ORDERS.to_owned()], false);
		let text = output(|out| resolve(&registry, "/orders/1", &grants, out));
		assert_eq!(text, "matched orders (sections/orders)\n");

		let text = output(|out| resolve(&registry, "/missing", &grants, out));
		assert_eq!(text, "not-found /missing\n");
	}

	#[test]
	fn routes_lists_every_section() {
		let text = output(|out| routes(&DashgateConfig::default(), out));
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(lines.len(), builtin().len() + 1);
		assert!(lines[1].starts_with("/ "));
		assert!(lines[1].contains("exact"));
		assert!(text.contains("sections/custom-apps"));
	}

	#[test]
	fn check_reports_clean_builtin_table() {
		let mut out = Vec::new();
		let warnings = check(&DashgateConfig::default(), true, &mut out).unwrap();
		assert_eq!(warnings, 0);
		assert_eq!(String::from_utf8(out).unwrap(), "builtin: 26 sections, 0 warnings\n");
	}

	#[tokio::test]
	async fn navigate_prints_each_view() {
		let mut out = Vec::new();
		let paths = ["/".to_owned(), "/orders".to_owned(), "/nowhere".to_owned()];
		navigate(DashgateConfig::default(), &paths, NavigateOptions::default(), &mut out)
			.await
			.unwrap();
		let text = String::from_utf8(out).unwrap();

		assert_eq!(
			text.lines().collect::<Vec<_>>(),
			[
				"/ -> section welcome (/)",
				"/orders -> access denied to /orders (missing MANAGE_ORDERS)",
				"/nowhere -> page not found: /nowhere",
				"state: ready, modules loaded: 1",
			]
		);
	}

	#[tokio::test]
	async fn navigate_anonymous_shows_sign_in() {
		let mut out = Vec::new();
		let options = NavigateOptions {
			anonymous: true,
			..NavigateOptions::default()
		};
		navigate(DashgateConfig::default(), &["/".to_owned()], options, &mut out)
			.await
			.unwrap();
		let text = String::from_utf8(out).unwrap();
		assert!(text.starts_with("/ -> sign-in\n"), "{text}");
		assert!(text.ends_with("state: loading, modules loaded: 0\n"), "{text}");
	}
}
