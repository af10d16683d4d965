//! Error types for store operations.

use std::path::PathBuf;

use lodge_sync::LockError;
use thiserror::Error;

/// A review rejected before it touched the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
	/// Rating outside [`crate::RATING_RANGE`].
	#[error("rating {rating} out of range 1..=5")]
	InvalidRating { rating: i64 },

	/// Submission time not in [`crate::TIMESTAMP_FORMAT`].
	#[error("unparseable review timestamp {value:?}")]
	InvalidTimestamp { value: String },
}

/// Errors from [`crate::GuardedStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error(transparent)]
	Review(#[from] ReviewError),

	#[error(transparent)]
	Lock(#[from] LockError),

	/// Writing a snapshot failed.
	#[error("failed to write snapshot {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},
}

impl StoreError {
	/// Returns the validation failure, if that is what this is.
	pub fn as_review(&self) -> Option<&ReviewError> {
		match self {
			Self::Review(err) => Some(err),
			_ => None,
		}
	}
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
