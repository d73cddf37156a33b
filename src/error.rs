use core::time::Duration;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Everything the state cache, the API client and the persistence adapters can fail with.
///
/// Reconciliation never produces one of these: tree shape mismatches are logged and repaired in place.
#[derive(Debug, Error)]
pub enum Error {
	/// No recipe id was supplied. Short-circuited before any request is made.
	#[error("no recipe id was supplied")]
	NotFound,

	/// No (non-blank) search query was supplied. Short-circuited before any request is made.
	#[error("no search query was supplied")]
	EmptyQuery,

	#[error("network error: {0}")]
	Network(String),

	/// The service answered with a non-2xx status and a `{message}` body.
	#[error("{message} ({status})")]
	Api { status: u16, message: String },

	#[error("Request took too long! Timeout after {} second(s)", .0.as_secs_f64())]
	Timeout(Duration),

	#[error("malformed response: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("{0}")]
	Validation(String),

	#[error("no recipe is loaded")]
	NoRecipe,

	/// A newer load of the same kind was started before this one finished.
	#[error("a newer load superseded this one")]
	Superseded,

	#[error("bookmark persistence failed: {0}")]
	Persistence(String),

	#[error("invalid configuration: {0}")]
	Config(#[from] toml::de::Error),

	/// The configuration file couldn't be read.
	#[error("could not read configuration {}: {message}", .path.display())]
	ConfigFile { path: PathBuf, message: String },
}

impl Error {
	/// Whether the error was short-circuited locally instead of coming back from the service.
	#[must_use]
	pub fn is_local(&self) -> bool {
		matches!(self, Self::NotFound | Self::EmptyQuery | Self::Validation(_) | Self::NoRecipe)
	}
}
