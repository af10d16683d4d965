//! Bulk loading of hotels and reviews into a [`lodge_store::GuardedStore`].
//!
//! Hotels come from one JSON file and are ingested on the calling thread.
//! Reviews come from a directory tree of batch files; each file becomes one
//! job on a bounded [`lodge_worker::WorkerPool`]. Once the pool is drained,
//! [`BulkLoader::drain_and_finalize`] records every hotel's average rating.

mod config;
mod discover;
mod error;
pub mod format;
mod loader;
mod stats;

pub use config::{ConfigError, DrainMode, LoaderConfig};
pub use discover::{Discovery, UnitFilter, discover_units};
pub use error::LoadError;
pub use loader::{BulkLoader, EntityReport, FinalizeReport};
pub use stats::{LoadStats, LoadSummary};
