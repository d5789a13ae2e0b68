use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the WebDriver client.
#[derive(Debug, Error)]
pub enum Error {
	/// The remote end answered with a protocol-level error payload.
	#[error("webdriver error: {error}: {message}")]
	Wire { error: String, message: String },

	#[error(transparent)]
	Transport(#[from] reqwest::Error),

	#[error("invalid webdriver url: {0}")]
	InvalidUrl(#[from] url::ParseError),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error("webdriver session already closed")]
	SessionClosed,

	#[error("malformed webdriver response: {0}")]
	Malformed(String),
}

impl Error {
	/// True for the W3C `no such element` code, which callers treat as
	/// element absence rather than a hard failure.
	pub fn is_no_such_element(&self) -> bool {
		matches!(self, Error::Wire { error, .. } if error == "no such element")
	}
}
