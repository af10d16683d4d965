//! CLI schema for the lodge binary.

use std::path::PathBuf;

use clap::Parser;
use lodge_loader::LoaderConfig;

#[derive(Parser, Debug)]
#[command(name = "lodge")]
#[command(about = "Load hotels and their reviews, then print every hotel with its reviews")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Hotels JSON document
	#[arg(long, value_name = "FILE")]
	pub hotels: PathBuf,

	/// Directory searched recursively for review batch files
	#[arg(long, value_name = "DIR")]
	pub reviews: Option<PathBuf>,

	/// Review batches loaded at once
	#[arg(short, long, value_name = "N")]
	pub threads: Option<usize>,

	/// Write the snapshot here instead of stdout
	#[arg(short, long, value_name = "FILE")]
	pub output: Option<PathBuf>,

	/// Loader settings (TOML)
	#[arg(short, long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Stop waiting for review batches after this many seconds
	#[arg(long, value_name = "SECS")]
	pub drain_timeout: Option<u64>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

impl Cli {
	/// Overwrites config values that were given as flags.
	pub fn apply(&self, config: &mut LoaderConfig) {
		if let Some(threads) = self.threads {
			config.workers = threads;
		}
		if let Some(secs) = self.drain_timeout {
			config.drain_timeout_secs = Some(secs);
		}
	}
}
