//! Loader configuration.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lodge_worker::DrainBudget;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading loader configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading the configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},

	/// TOML syntax or schema error.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A value parsed but is unusable.
	#[error("invalid value for '{field}': {reason}")]
	Invalid { field: &'static str, reason: &'static str },
}

/// How [`crate::BulkLoader::drain_and_finalize`] waits for review jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrainMode {
	/// Join every job before aggregates are recorded.
	#[default]
	Join,
	/// Wait at most this long, then record aggregates over whatever has been
	/// loaded so far. Jobs still running keep inserting afterwards.
	Bounded(Duration),
}

impl DrainMode {
	pub fn budget(self) -> DrainBudget {
		match self {
			Self::Join => DrainBudget::Unbounded,
			Self::Bounded(limit) => DrainBudget::Within(limit),
		}
	}
}

/// Loader settings, typically read from a TOML file.
///
/// ```toml
/// workers = 8
/// drain_timeout_secs = 60   # omit to join unconditionally
/// review_file_marker = "review"
/// review_file_extension = "json"
/// follow_symlinks = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
	/// Review jobs running at once.
	pub workers: usize,
	/// Bounded drain in seconds; `None` joins unconditionally.
	pub drain_timeout_secs: Option<u64>,
	/// Substring a review batch file name must contain.
	pub review_file_marker: String,
	/// Extension of review batch files, without the dot.
	pub review_file_extension: String,
	pub follow_symlinks: bool,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			workers: std::thread::available_parallelism().map_or(4, NonZeroUsize::get),
			drain_timeout_secs: None,
			review_file_marker: "review".to_string(),
			review_file_extension: "json".to_string(),
			follow_symlinks: false,
		}
	}
}

impl LoaderConfig {
	/// Parses and validates TOML text. Missing keys take their defaults.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads and parses a TOML file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.workers == 0 {
			return Err(ConfigError::Invalid {
				field: "workers",
				reason: "must be at least 1",
			});
		}
		if self.review_file_extension.trim_start_matches('.').is_empty() {
			return Err(ConfigError::Invalid {
				field: "review_file_extension",
				reason: "must not be empty",
			});
		}
		Ok(())
	}

	pub fn drain_mode(&self) -> DrainMode {
		match self.drain_timeout_secs {
			Some(secs) => DrainMode::Bounded(Duration::from_secs(secs)),
			None => DrainMode::Join,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_file_yields_defaults() {
		let config = LoaderConfig::from_toml_str("").expect("empty config");
		assert_eq!(config, LoaderConfig::default());
		assert_eq!(config.drain_mode(), DrainMode::Join);
		assert!(config.workers >= 1);
	}

	#[test]
	fn explicit_values_override_defaults() {
		let config = LoaderConfig::from_toml_str(
			r#"
			workers = 3
			drain_timeout_secs = 60
			review_file_marker = ""
			follow_symlinks = true
			"#,
		)
		.expect("valid config");
		assert_eq!(config.workers, 3);
		assert_eq!(config.drain_mode(), DrainMode::Bounded(Duration::from_secs(60)));
		assert_eq!(config.review_file_marker, "");
		assert_eq!(config.review_file_extension, "json");
		assert!(config.follow_symlinks);
	}

	#[test]
	fn zero_workers_is_rejected() {
		let err = LoaderConfig::from_toml_str("workers = 0").unwrap_err();
		assert!(matches!(err, ConfigError::Invalid { field: "workers", .. }));
	}

	#[test]
	fn unknown_keys_are_rejected() {
		assert!(matches!(LoaderConfig::from_toml_str("threads = 2"), Err(ConfigError::Toml(_))));
	}

	#[test]
	fn drain_modes_map_to_budgets() {
		assert_eq!(DrainMode::Join.budget(), DrainBudget::Unbounded);
		assert_eq!(
			DrainMode::Bounded(Duration::from_secs(5)).budget(),
			DrainBudget::Within(Duration::from_secs(5))
		);
	}
}
