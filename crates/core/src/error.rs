use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal run errors. Per-item booking and extraction problems never show up
/// here: they are recorded in the results and the run keeps going.
#[derive(Debug, Error)]
pub enum Error {
	/// Login could not be completed. Aborts the run, no retry.
	#[error("authentication failed: {reason}")]
	Auth { reason: String },

	/// A required page element or state never showed up.
	#[error("navigation failed: {what}")]
	Navigation { what: String },

	/// The schedule update never arrived within the configured ceiling.
	#[error("no schedule update detected within {ceiling:?}")]
	WatcherCeiling { ceiling: Duration },

	/// Transport or protocol failure in the underlying driver.
	#[error(transparent)]
	Driver(#[from] webdriver::Error),
}

impl Error {
	pub(crate) fn auth(reason: impl Into<String>) -> Self {
		Error::Auth {
			reason: reason.into(),
		}
	}

	pub(crate) fn navigation(what: impl Into<String>) -> Self {
		Error::Navigation {
			what: what.into(),
		}
	}
}
