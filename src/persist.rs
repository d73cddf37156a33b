//! Bookmark persistence: one serialized snapshot, overwritten wholesale on every change.

use crate::{
	config::Config,
	error::{Error, Result},
	state::RecipeSummary,
};
use std::{
	fs, io,
	path::{Path, PathBuf},
};
use tracing::{debug, instrument};

/// Fixed key (or file stem) the snapshot is stored under.
pub const STORAGE_KEY: &str = "bookmarks";

pub trait BookmarkStore {
	/// The last saved snapshot, or an empty one if nothing was saved yet.
	///
	/// # Errors
	///
	/// If the storage can't be read or holds something that isn't a bookmark snapshot.
	fn load(&self) -> Result<Vec<RecipeSummary>>;

	/// Replaces the stored snapshot. Completes before returning.
	///
	/// # Errors
	///
	/// If the storage can't be written.
	fn save(&mut self, bookmarks: &[RecipeSummary]) -> Result<()>;
}

/// Keeps the serialized snapshot in memory. Useful for tests and for hosts without storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	snapshot: Option<String>,
	saves: usize,
}

impl MemoryStore {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts out with an already serialized snapshot.
	#[must_use]
	pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
		Self {
			snapshot: Some(snapshot.into()),
			saves: 0,
		}
	}

	#[must_use]
	pub fn snapshot(&self) -> Option<&str> {
		self.snapshot.as_deref()
	}

	/// How often [`BookmarkStore::save`] was called.
	#[must_use]
	pub fn save_count(&self) -> usize {
		self.saves
	}
}

impl BookmarkStore for MemoryStore {
	fn load(&self) -> Result<Vec<RecipeSummary>> {
		match &self.snapshot {
			Some(snapshot) => Ok(serde_json::from_str(snapshot)?),
			None => Ok(Vec::new()),
		}
	}

	fn save(&mut self, bookmarks: &[RecipeSummary]) -> Result<()> {
		self.snapshot = Some(serde_json::to_string(bookmarks)?);
		self.saves += 1;
		Ok(())
	}
}

/// Stores the snapshot as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
	path: PathBuf,
}

impl JsonFileStore {
	#[must_use]
	pub fn at(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// The configured `bookmarks-path`.
	#[must_use]
	pub fn from_config(config: &Config) -> Self {
		Self::at(&config.bookmarks_path)
	}

	/// `bookmarks.json` inside `directory`.
	#[must_use]
	pub fn in_dir(directory: impl AsRef<Path>) -> Self {
		Self::at(directory.as_ref().join(format!("{}.json", STORAGE_KEY)))
	}

	#[must_use]
	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl BookmarkStore for JsonFileStore {
	#[instrument(skip(self), fields(path = %self.path.display()))]
	fn load(&self) -> Result<Vec<RecipeSummary>> {
		match fs::read_to_string(&self.path) {
			Ok(snapshot) => Ok(serde_json::from_str(&snapshot)?),
			Err(error) if error.kind() == io::ErrorKind::NotFound => {
				debug!("No bookmark snapshot yet.");
				Ok(Vec::new())
			}
			Err(error) => Err(Error::Persistence(error.to_string())),
		}
	}

	#[instrument(skip(self, bookmarks), fields(path = %self.path.display(), count = bookmarks.len()))]
	fn save(&mut self, bookmarks: &[RecipeSummary]) -> Result<()> {
		let snapshot = serde_json::to_string_pretty(bookmarks)?;
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).map_err(|error| Error::Persistence(error.to_string()))?;
		}
		fs::write(&self.path, snapshot).map_err(|error| Error::Persistence(error.to_string()))
	}
}
