use std::time::Duration;

/// How long [`crate::WorkerPool::drain`] may wait for submitted work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrainBudget {
	/// Join every submitted task, however long it takes.
	#[default]
	Unbounded,
	/// Stop waiting after this duration; unfinished tasks keep running.
	Within(Duration),
}

impl DrainBudget {
	pub fn limit(self) -> Option<Duration> {
		match self {
			Self::Unbounded => None,
			Self::Within(limit) => Some(limit),
		}
	}
}

/// Outcome of one drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
	/// Tasks that returned normally.
	pub completed: u64,
	/// Tasks that panicked or were cancelled.
	pub failed: u64,
	/// Tasks still outstanding when the drain returned.
	pub pending: usize,
	/// The budget ran out before every task was joined.
	pub budget_exhausted: bool,
	pub elapsed: Duration,
}

impl DrainReport {
	/// True when nothing was left outstanding.
	pub fn is_complete(&self) -> bool {
		self.pending == 0
	}
}
