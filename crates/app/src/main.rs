mod cli;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use dashgate_app::commands::{self, NavigateOptions};
use dashgate_app::context::load_registry;
use dashgate_app::{DashgateConfig, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let config = match &cli.config {
		Some(path) => DashgateConfig::load(path)?,
		None => DashgateConfig::default(),
	};
	logging::init(config.log.filter.as_deref(), cli.verbose);

	let stdout = std::io::stdout();
	let mut out = stdout.lock();
	match cli.command {
		Command::Routes => commands::routes(&config, &mut out)?,
		Command::Resolve { path, grants } => {
			let registry = load_registry(&config, config.registry.duplicate_policy).context("failed to load routes")?;
			let grants = commands::grants_from(&grants.grants, grants.grant_all);
			commands::resolve(&registry, &path, &grants, &mut out)?;
		}
		Command::Navigate {
			paths,
			grants,
			anonymous,
			fail_render,
		} => {
			let options = NavigateOptions {
				grants: commands::grants_from(&grants.grants, grants.grant_all),
				anonymous,
				fail_render,
			};
			commands::navigate(config, &paths, options, &mut out).await?;
		}
		Command::Check { strict } => {
			commands::check(&config, strict, &mut out)?;
		}
	}
	out.flush()?;
	Ok(())
}
