use crate::error::{Error, Result};
use core::time::Duration;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

/// Client settings. Every field has a default, so a configuration file only needs to name what it changes:
///
/// ```toml
/// key = "my-api-key"
/// timeout-secs = 5
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	pub api_url: String,
	pub key: String,
	/// Every network call is raced against this.
	pub timeout_secs: f64,
	pub results_per_page: usize,
	/// Delay before the upload window closes after a successful upload.
	pub modal_close_secs: f64,
	/// URL of the icon sprite views reference.
	pub icons: String,
	pub bookmarks_path: PathBuf,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			api_url: "https://forkify-api.jonas.io/api/v2/recipes".to_owned(),
			key: String::new(),
			timeout_secs: 10.0,
			results_per_page: 10,
			modal_close_secs: 2.5,
			icons: "img/icons.svg".to_owned(),
			bookmarks_path: PathBuf::from("bookmarks.json"),
		}
	}
}

impl Config {
	/// # Errors
	///
	/// Iff `toml` isn't a valid configuration.
	pub fn from_toml_str(toml: &str) -> Result<Self> {
		let config: Self = toml::from_str(toml)?;
		config.validate()
	}

	/// # Errors
	///
	/// If the file can't be read or isn't a valid configuration.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let toml = fs::read_to_string(path).map_err(|error| Error::ConfigFile {
			path: path.to_owned(),
			message: error.to_string(),
		})?;
		Self::from_toml_str(&toml)
	}

	fn validate(self) -> Result<Self> {
		if self.results_per_page == 0 {
			return Err(Error::Validation("results-per-page must be positive".to_owned()));
		}
		match Duration::try_from_secs_f64(self.timeout_secs) {
			Ok(timeout) if !timeout.is_zero() => (),
			_ => return Err(Error::Validation("timeout-secs must be a positive number of seconds that fits a duration".to_owned())),
		}
		// The upload form is reset a little after the window closes.
		if Duration::try_from_secs_f64(self.modal_close_secs * 1.05).is_err() {
			return Err(Error::Validation("modal-close-secs must be a non-negative number of seconds that fits a duration".to_owned()));
		}
		Ok(self)
	}

	/// Falls back to the default for values [`Config::from_toml_str`] would have rejected.
	#[must_use]
	pub fn timeout(&self) -> Duration {
		Duration::try_from_secs_f64(self.timeout_secs)
			.ok()
			.filter(|timeout| !timeout.is_zero())
			.unwrap_or_else(|| Duration::from_secs_f64(Self::default().timeout_secs))
	}

	/// Falls back to the default for values [`Config::from_toml_str`] would have rejected.
	#[must_use]
	pub fn modal_close(&self) -> Duration {
		Duration::try_from_secs_f64(self.modal_close_secs).unwrap_or_else(|_| Duration::from_secs_f64(Self::default().modal_close_secs))
	}
}
