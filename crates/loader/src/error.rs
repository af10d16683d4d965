use std::path::PathBuf;

use lodge_worker::PoolError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop one loader operation.
///
/// Failures inside a single review batch never surface here; they are
/// logged and counted in [`crate::LoadSummary`].
#[derive(Debug, Error)]
pub enum LoadError {
	/// An input file or directory could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},

	/// An input file is not a document of the expected shape.
	#[error("invalid JSON in {path}: {error}")]
	Json {
		path: PathBuf,
		error: serde_json::Error,
	},

	/// The review root exists but is not a directory.
	#[error("{path} is not a directory")]
	NotADirectory { path: PathBuf },

	#[error(transparent)]
	Pool(#[from] PoolError),

	#[error(transparent)]
	Config(#[from] ConfigError),
}
