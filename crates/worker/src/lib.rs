//! Bounded worker pool for blocking batch work.
//!
//! [`WorkerPool`] runs submitted closures on at most `workers` OS threads,
//! queueing the rest. [`WorkerPool::drain`] closes the pool to new work and
//! joins what was submitted, optionally under a [`DrainBudget`].

mod budget;
mod error;
mod panic;
mod pool;

pub use budget::{DrainBudget, DrainReport};
pub use error::PoolError;
pub use panic::join_error_panic_message;
pub use pool::WorkerPool;
