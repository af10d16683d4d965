use std::path::Path;
use std::sync::Arc;

use lodge_store::{GuardedStore, ReviewInput};
use lodge_worker::{DrainReport, WorkerPool};

use crate::config::{DrainMode, LoaderConfig};
use crate::discover::{UnitFilter, discover_units};
use crate::error::LoadError;
use crate::format;
use crate::stats::{LoadStats, LoadSummary, UnitCounts};

/// Outcome of [`BulkLoader::load_entities`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityReport {
	pub loaded: usize,
	pub rejected: usize,
}

/// Outcome of [`BulkLoader::drain_and_finalize`].
#[derive(Debug, Clone)]
pub struct FinalizeReport {
	pub drain: DrainReport,
	pub summary: LoadSummary,
	/// Hotels whose average rating was recorded.
	pub hotels_finalized: usize,
}

impl FinalizeReport {
	/// Whether aggregates were recorded after every batch finished.
	pub fn is_complete(&self) -> bool {
		self.drain.is_complete()
	}
}

/// Populates a [`GuardedStore`]: hotels on the calling thread, review batches
/// on a bounded worker pool.
///
/// Lifecycle is `load_entities`, then any number of
/// `load_children_concurrently` calls, then one `drain_and_finalize`. The
/// pool is closed by the drain; later submissions fail with
/// [`LoadError::Pool`].
pub struct BulkLoader {
	store: Arc<GuardedStore>,
	pool: WorkerPool,
	filter: UnitFilter,
	config: LoaderConfig,
	stats: Arc<LoadStats>,
}

impl BulkLoader {
	pub fn new(store: Arc<GuardedStore>, config: LoaderConfig) -> Result<Self, LoadError> {
		config.validate()?;
		let pool = WorkerPool::new("loader", config.workers)?;
		Ok(Self {
			store,
			pool,
			filter: UnitFilter::from_config(&config),
			config,
			stats: Arc::new(LoadStats::default()),
		})
	}

	pub fn store(&self) -> &Arc<GuardedStore> {
		&self.store
	}

	pub fn config(&self) -> &LoaderConfig {
		&self.config
	}

	/// Counters so far; jobs may still be running.
	pub fn summary(&self) -> LoadSummary {
		self.stats.snapshot()
	}

	/// Reads the hotels document at `path` and inserts every usable record.
	///
	/// Malformed records are skipped and counted.
	///
	/// # Errors
	///
	/// [`LoadError::Io`] or [`LoadError::Json`] when the document itself cannot
	/// be read; the store is untouched in that case.
	pub fn load_entities(&self, path: &Path) -> Result<EntityReport, LoadError> {
		let text = std::fs::read_to_string(path).map_err(|error| LoadError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let batch = format::parse_hotels(&text).map_err(|error| LoadError::Json {
			path: path.to_path_buf(),
			error,
		})?;

		let mut report = EntityReport {
			loaded: 0,
			rejected: batch.rejected,
		};
		for hotel in batch.hotels {
			match self.store.insert_entity(hotel) {
				Ok(()) => report.loaded += 1,
				Err(err) => {
					tracing::warn!(%err, "loader.hotel.insert_failed");
					report.rejected += 1;
				}
			}
		}
		tracing::info!(
			path = %path.display(),
			loaded = report.loaded,
			rejected = report.rejected,
			"loader.hotels.loaded"
		);
		Ok(report)
	}

	/// Finds every review batch under `root` and queues one job per batch.
	///
	/// Returns once the jobs are queued, not when they finish. Each job parses
	/// its whole batch before inserting anything, so a batch that fails to
	/// parse contributes no reviews.
	///
	/// # Errors
	///
	/// An unreadable `root`, or a pool that has already been drained.
	pub fn load_children_concurrently(&mut self, root: &Path) -> Result<usize, LoadError> {
		let discovery = discover_units(root, &self.filter, self.config.follow_symlinks)?;
		let queued = discovery.units.len();
		for unit in discovery.units {
			let store = Arc::clone(&self.store);
			let stats = Arc::clone(&self.stats);
			self.pool.submit(move || load_unit(&store, &unit, &stats))?;
		}
		tracing::info!(
			root = %root.display(),
			queued,
			skipped = discovery.errors,
			workers = self.pool.workers(),
			"loader.reviews.queued"
		);
		Ok(queued)
	}

	/// Waits for queued batches per `mode`, then records the average rating
	/// of every hotel in the store.
	///
	/// With [`DrainMode::Bounded`], batches still running at the deadline are
	/// not waited for and their reviews may be missing from the recorded
	/// averages.
	pub fn drain_and_finalize(&mut self, mode: DrainMode) -> FinalizeReport {
		let drain = self.pool.drain(mode.budget());
		if !drain.is_complete() {
			tracing::warn!(pending = drain.pending, "loader.finalize.partial");
		}

		let mut hotels_finalized = 0;
		for id in self.store.list_ids() {
			match self.store.record_aggregate(&id) {
				Ok(Some(_)) => hotels_finalized += 1,
				Ok(None) => {}
				Err(err) => tracing::warn!(hotel_id = %id, %err, "loader.finalize.record_failed"),
			}
		}

		let report = FinalizeReport {
			drain,
			summary: self.stats.snapshot(),
			hotels_finalized,
		};
		tracing::info!(
			units = report.summary.units_loaded,
			failed_units = report.summary.units_failed,
			reviews = report.summary.reviews_inserted,
			duplicates = report.summary.reviews_duplicate,
			rejected = report.summary.reviews_rejected,
			hotels = report.hotels_finalized,
			"loader.finalize.done"
		);
		report
	}
}

fn read_unit(path: &Path) -> Result<Vec<ReviewInput>, LoadError> {
	let text = std::fs::read_to_string(path).map_err(|error| LoadError::Io {
		path: path.to_path_buf(),
		error,
	})?;
	format::parse_review_batch(&text).map_err(|error| LoadError::Json {
		path: path.to_path_buf(),
		error,
	})
}

/// Body of one review job.
fn load_unit(store: &GuardedStore, path: &Path, stats: &LoadStats) {
	let reviews = match read_unit(path) {
		Ok(reviews) => reviews,
		Err(err) => {
			tracing::warn!(%err, "loader.unit.failed");
			stats.unit_failed();
			return;
		}
	};

	let mut counts = UnitCounts::default();
	for review in reviews {
		match store.insert_child(review) {
			Ok(true) => counts.inserted += 1,
			Ok(false) => counts.duplicates += 1,
			Err(_) => counts.rejected += 1,
		}
	}
	stats.unit_loaded(counts);
	tracing::debug!(
		path = %path.display(),
		inserted = counts.inserted,
		duplicates = counts.duplicates,
		rejected = counts.rejected,
		"loader.unit.loaded"
	);
}
