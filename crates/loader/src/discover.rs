//! Finding review batch files under a root directory.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::LoaderConfig;
use crate::error::LoadError;

/// Decides which file names are review batches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitFilter {
	marker: String,
	extension: String,
}

impl UnitFilter {
	/// Matches names containing `marker` with extension `extension`.
	pub fn new(marker: impl Into<String>, extension: impl AsRef<str>) -> Self {
		Self {
			marker: marker.into(),
			extension: extension.as_ref().trim_start_matches('.').to_string(),
		}
	}

	pub fn from_config(config: &LoaderConfig) -> Self {
		Self::new(config.review_file_marker.clone(), &config.review_file_extension)
	}

	/// Checks the final path component only, so directory names never count.
	pub fn matches(&self, path: &Path) -> bool {
		let Some(name) = path.file_name().and_then(OsStr::to_str) else {
			return false;
		};
		let extension_matches = path
			.extension()
			.and_then(OsStr::to_str)
			.is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension));
		extension_matches && name.contains(self.marker.as_str())
	}
}

/// Batch files found under one root.
#[derive(Debug, Default)]
pub struct Discovery {
	/// Matching files in walk order: sorted by name within each directory.
	pub units: Vec<PathBuf>,
	/// Entries that could not be read; each was logged and skipped.
	pub errors: usize,
}

/// Walks `root` recursively and collects every file `filter` accepts.
///
/// Hidden files and ignore files get no special treatment. Unreadable
/// entries below the root are skipped.
///
/// # Errors
///
/// [`LoadError::Io`] when `root` cannot be read, [`LoadError::NotADirectory`]
/// when it is a file.
pub fn discover_units(root: &Path, filter: &UnitFilter, follow_symlinks: bool) -> Result<Discovery, LoadError> {
	let metadata = std::fs::metadata(root).map_err(|error| LoadError::Io {
		path: root.to_path_buf(),
		error,
	})?;
	if !metadata.is_dir() {
		return Err(LoadError::NotADirectory { path: root.to_path_buf() });
	}

	let mut walker = WalkBuilder::new(root);
	walker
		.standard_filters(false)
		.follow_links(follow_symlinks)
		.sort_by_file_name(|a, b| a.cmp(b));

	let mut discovery = Discovery::default();
	for entry in walker.build() {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				tracing::warn!(root = %root.display(), %err, "loader.discover.error");
				discovery.errors += 1;
				continue;
			}
		};
		let is_file = entry.file_type().is_some_and(|kind| kind.is_file());
		if is_file && filter.matches(entry.path()) {
			discovery.units.push(entry.into_path());
		}
	}

	tracing::debug!(
		root = %root.display(),
		units = discovery.units.len(),
		errors = discovery.errors,
		"loader.discover.done"
	);
	Ok(discovery)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	fn filter() -> UnitFilter {
		UnitFilter::new("review", "json")
	}

	#[test]
	fn filter_needs_marker_and_extension() {
		let filter = filter();
		assert!(filter.matches(Path::new("a/hotel_reviews_1.json")));
		assert!(filter.matches(Path::new("review.JSON")));
		assert!(!filter.matches(Path::new("a/hotels.json")));
		assert!(!filter.matches(Path::new("a/review.json.bak")));
		assert!(!filter.matches(Path::new("reviews/notes.txt")));
		assert!(!filter.matches(Path::new("reviews/data.json")));
	}

	#[test]
	fn empty_marker_accepts_any_matching_extension() {
		let filter = UnitFilter::new("", ".json");
		assert!(filter.matches(Path::new("x.json")));
		assert!(!filter.matches(Path::new("x.toml")));
	}

	#[test]
	fn walk_descends_and_sorts() {
		let dir = tempfile::tempdir().expect("tempdir");
		let root = dir.path();
		fs::create_dir_all(root.join("b/deeper")).expect("mkdir");
		fs::create_dir_all(root.join("a")).expect("mkdir");
		for path in [
			"review_z.json",
			"a/review_1.json",
			"b/deeper/.hidden_review.json",
			"b/review_notes.txt",
			"b/hotels.json",
		] {
			fs::write(root.join(path), "{}").expect("write");
		}

		let found = discover_units(root, &filter(), false).expect("walk");
		let relative: Vec<_> = found
			.units
			.iter()
			.map(|path| path.strip_prefix(root).expect("under root").to_path_buf())
			.collect();
		assert_eq!(
			relative,
			vec![
				PathBuf::from("a/review_1.json"),
				PathBuf::from("b/deeper/.hidden_review.json"),
				PathBuf::from("review_z.json"),
			]
		);
		assert_eq!(found.errors, 0);
	}

	#[test]
	fn missing_root_is_an_error() {
		let dir = tempfile::tempdir().expect("tempdir");
		let err = discover_units(&dir.path().join("absent"), &filter(), false).unwrap_err();
		assert!(matches!(err, LoadError::Io { .. }));
	}

	#[test]
	fn file_root_is_an_error() {
		let dir = tempfile::tempdir().expect("tempdir");
		let file = dir.path().join("review.json");
		fs::write(&file, "{}").expect("write");
		let err = discover_units(&file, &filter(), false).unwrap_err();
		assert!(matches!(err, LoadError::NotADirectory { .. }));
	}
}
