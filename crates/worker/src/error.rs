use thiserror::Error;

/// Worker pool errors.
#[derive(Debug, Error)]
pub enum PoolError {
	/// The pool was closed by a drain; no further work is accepted.
	#[error("worker pool '{name}' is closed")]
	Closed { name: String },

	/// The pool's threads could not be started.
	#[error("failed to start worker pool: {0}")]
	Spawn(#[from] std::io::Error),
}
