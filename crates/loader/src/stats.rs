use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by every review job of one loader.
#[derive(Debug, Default)]
pub struct LoadStats {
	units_loaded: AtomicUsize,
	units_failed: AtomicUsize,
	reviews_inserted: AtomicUsize,
	reviews_duplicate: AtomicUsize,
	reviews_rejected: AtomicUsize,
}

/// Point-in-time copy of [`LoadStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
	/// Batches parsed and committed.
	pub units_loaded: usize,
	/// Batches that could not be read or parsed; none of their reviews were
	/// inserted.
	pub units_failed: usize,
	/// Reviews newly added to the store.
	pub reviews_inserted: usize,
	/// Valid reviews equal to one already stored, so not added.
	pub reviews_duplicate: usize,
	/// Reviews that failed validation.
	pub reviews_rejected: usize,
}

/// Per-batch tallies, folded into [`LoadStats`] once the batch is done.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct UnitCounts {
	pub(crate) inserted: usize,
	pub(crate) duplicates: usize,
	pub(crate) rejected: usize,
}

impl LoadStats {
	pub(crate) fn unit_loaded(&self, counts: UnitCounts) {
		self.units_loaded.fetch_add(1, Ordering::Relaxed);
		self.reviews_inserted.fetch_add(counts.inserted, Ordering::Relaxed);
		self.reviews_duplicate.fetch_add(counts.duplicates, Ordering::Relaxed);
		self.reviews_rejected.fetch_add(counts.rejected, Ordering::Relaxed);
	}

	pub(crate) fn unit_failed(&self) {
		self.units_failed.fetch_add(1, Ordering::Relaxed);
	}

	pub fn snapshot(&self) -> LoadSummary {
		LoadSummary {
			units_loaded: self.units_loaded.load(Ordering::Relaxed),
			units_failed: self.units_failed.load(Ordering::Relaxed),
			reviews_inserted: self.reviews_inserted.load(Ordering::Relaxed),
			reviews_duplicate: self.reviews_duplicate.load(Ordering::Relaxed),
			reviews_rejected: self.reviews_rejected.load(Ordering::Relaxed),
		}
	}
}
