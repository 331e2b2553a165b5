use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dashgate")]
#[command(about = "Inspect and drive the permission-gated dashboard router")]
#[command(version)]
pub struct Cli {
	/// Config file (dashgate.toml)
	#[arg(long, short = 'c', global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Capabilities the acting user holds.
#[derive(clap::Args, Debug, Default)]
pub struct GrantArgs {
	/// Grant a capability (repeatable)
	#[arg(long = "grant", short = 'g', value_name = "CAP")]
	pub grants: Vec<String>,

	/// Grant every known capability
	#[arg(long)]
	pub grant_all: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// List registered sections in resolution order
	Routes,
	/// Resolve a path against the registry
	Resolve {
		path: String,
		#[command(flatten)]
		grants: GrantArgs,
	},
	/// Navigate the router through one or more paths
	Navigate {
		#[arg(required = true)]
		paths: Vec<String>,
		#[command(flatten)]
		grants: GrantArgs,
		/// Navigate without a signed-in user
		#[arg(long, conflicts_with_all = ["grants", "grant_all"])]
		anonymous: bool,
		/// Make a section fail to render (repeatable)
		#[arg(long, value_name = "SECTION")]
		fail_render: Vec<String>,
	},
	/// Build the registry and report unreachable routes
	Check {
		/// Fail on duplicate patterns
		#[arg(long)]
		strict: bool,
	},
}
