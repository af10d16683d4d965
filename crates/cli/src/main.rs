//! Lodge binary: loads a hotels document and a tree of review batches, then
//! prints the resulting store.

mod cli;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use lodge_loader::{BulkLoader, LoaderConfig};
use lodge_store::GuardedStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbose)?;

	let mut config = match &cli.config {
		Some(path) => LoaderConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
		None => LoaderConfig::default(),
	};
	cli.apply(&mut config);
	config.validate()?;
	let drain = config.drain_mode();

	let store = Arc::new(GuardedStore::new());
	let mut loader = BulkLoader::new(Arc::clone(&store), config)?;
	loader.load_entities(&cli.hotels)?;
	if let Some(reviews) = &cli.reviews {
		loader.load_children_concurrently(reviews)?;
	}
	let report = loader.drain_and_finalize(drain);
	if !report.is_complete() {
		warn!(pending = report.drain.pending, "lodge.output.partial");
	}

	match &cli.output {
		Some(path) => {
			store.write_snapshot(path)?;
			info!(path = %path.display(), hotels = store.hotel_count(), "lodge.output.written");
		}
		None => {
			let mut stdout = std::io::stdout().lock();
			stdout.write_all(store.render_all().as_bytes())?;
			stdout.flush()?;
		}
	}
	Ok(())
}

/// Logs go to stderr so stdout carries only the snapshot. `RUST_LOG`
/// overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
	let subscriber = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;
	Ok(())
}
