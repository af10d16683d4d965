use std::time::Instant;

use tokio::runtime::Runtime;
use tokio::task::JoinSet;

use crate::budget::{DrainBudget, DrainReport};
use crate::error::PoolError;
use crate::panic::join_error_panic_message;


/// Fixed-size pool of OS threads for blocking jobs.
///
/// Jobs run on a dedicated runtime's blocking pool capped at `workers`
/// threads; jobs beyond that wait in its FIFO queue. Completions are tracked
/// in a [`JoinSet`] so [`Self::drain`] can join them.
///
/// The pool is driven from synchronous code. Dropping it from inside an
/// async context panics, as dropping any Tokio runtime there does.
#[derive(Debug)]
pub struct WorkerPool {
	name: String,
	workers: usize,
	runtime: Runtime,
	tasks: JoinSet<()>,
	closed: bool,
	submitted: u64,
}

impl WorkerPool {
	/// Starts a pool running at most `workers` jobs at once (at least one).
	pub fn new(name: impl Into<String>, workers: usize) -> Result<Self, PoolError> {
		let name = name.into();
		let workers = workers.max(1);
		let runtime = tokio::runtime::Builder::new_multi_thread()
			.worker_threads(1)
			.max_blocking_threads(workers)
			.thread_name(format!("{name}-worker"))
			.enable_time()
			.build()?;
		tracing::debug!(pool = %name, workers, "worker.pool.start");
		Ok(Self {
			name,
			workers,
			runtime,
			tasks: JoinSet::new(),
			closed: false,
			submitted: 0,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Maximum number of jobs running at once.
	pub fn workers(&self) -> usize {
		self.workers
	}

	/// Jobs submitted over the pool's lifetime.
	pub fn submitted(&self) -> u64 {
		self.submitted
	}

	/// Jobs submitted but not yet joined by a drain.
	pub fn pending(&self) -> usize {
		self.tasks.len()
	}

	pub fn is_closed(&self) -> bool {
		self.closed
	}

	/// Queues one job.
	///
	/// # Errors
	///
	/// [`PoolError::Closed`] once the pool has been closed.
	pub fn submit<F>(&mut self, job: F) -> Result<(), PoolError>
	where
		F: FnOnce() + Send + 'static,
	{
		if self.closed {
			return Err(PoolError::Closed { name: self.name.clone() });
		}
		self.tasks.spawn_blocking_on(job, self.runtime.handle());
		self.submitted += 1;
		tracing::trace!(pool = %self.name, pending = self.tasks.len(), "worker.pool.submit");
		Ok(())
	}

	/// Stops accepting jobs. Already queued jobs still run.
	pub fn close(&mut self) {
		if !self.closed {
			self.closed = true;
			tracing::debug!(pool = %self.name, pending = self.tasks.len(), "worker.pool.close");
		}
	}

	/// Closes the pool and joins submitted jobs within `budget`.
	///
	/// Panicking jobs are counted as failed and logged; they never abort the
	/// drain. With [`DrainBudget::Within`], jobs still running at the deadline
	/// are left running and reported as pending.
	pub fn drain(&mut self, budget: DrainBudget) -> DrainReport {
		self.close();
		let start = Instant::now();
		let name = self.name.as_str();
		let tasks = &mut self.tasks;

		let (completed, failed, budget_exhausted) = self.runtime.block_on(async move {
			let deadline = budget.limit().map(|limit| tokio::time::Instant::now() + limit);
			let mut completed = 0u64;
			let mut failed = 0u64;
			loop {
				let next = match deadline {
					Some(deadline) => match tokio::time::timeout_at(deadline, tasks.join_next()).await {
						Ok(next) => next,
						Err(_) => break (completed, failed, true),
					},
					None => tasks.join_next().await,
				};
				match next {
					None => break (completed, failed, false),
					Some(Ok(())) => completed += 1,
					Some(Err(err)) => {
						failed += 1;
						match join_error_panic_message(err) {
							Some(payload) => tracing::error!(pool = %name, %payload, "worker.pool.job_panicked"),
							None => tracing::warn!(pool = %name, "worker.pool.job_cancelled"),
						}
					}
				}
			}
		});

		let report = DrainReport {
			completed,
			failed,
			pending: self.tasks.len(),
			budget_exhausted,
			elapsed: start.elapsed(),
		};
		if report.budget_exhausted {
			tracing::warn!(
				pool = %self.name,
				completed = report.completed,
				pending = report.pending,
				elapsed_ms = report.elapsed.as_millis() as u64,
				"worker.pool.drain_timeout"
			);
		} else {
			tracing::debug!(
				pool = %self.name,
				completed = report.completed,
				failed = report.failed,
				elapsed_ms = report.elapsed.as_millis() as u64,
				"worker.pool.drain"
			);
		}
		report
	}
}
