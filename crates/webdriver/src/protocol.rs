//! Wire types for the W3C WebDriver protocol.
//!
//! Request and response payloads are plain serde structs; everything rides
//! inside the protocol's `{"value": ...}` envelope, which the session layer
//! strips before deserializing.

use serde::{Deserialize, Serialize};

/// Key under which element references appear in WebDriver payloads.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Browser capabilities requested when opening a session.
#[derive(Debug, Clone, Serialize)]
pub struct Capabilities {
	#[serde(rename = "browserName")]
	browser_name: String,

	#[serde(rename = "moz:firefoxOptions", skip_serializing_if = "Option::is_none")]
	firefox_options: Option<FirefoxOptions>,
}

#[derive(Debug, Clone, Default, Serialize)]
struct FirefoxOptions {
	#[serde(skip_serializing_if = "Vec::is_empty")]
	args: Vec<String>,
}

impl Capabilities {
	/// Firefox with no extra launch arguments.
	pub fn firefox() -> Self {
		Self {
			browser_name: "firefox".into(),
			firefox_options: None,
		}
	}

	/// Adds the `-headless` launch argument.
	pub fn headless(self) -> Self {
		self.arg("-headless")
	}

	/// Adds an arbitrary browser launch argument.
	pub fn arg(mut self, arg: impl Into<String>) -> Self {
		self.firefox_options
			.get_or_insert_with(FirefoxOptions::default)
			.args
			.push(arg.into());
		self
	}
}

#[derive(Debug, Serialize)]
pub(crate) struct NewSessionRequest {
	pub capabilities: CapabilityRequest,
}

#[derive(Debug, Serialize)]
pub(crate) struct CapabilityRequest {
	#[serde(rename = "alwaysMatch")]
	pub always_match: Capabilities,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewSessionValue {
	#[serde(rename = "sessionId")]
	pub session_id: String,
}

/// Error payload the remote end returns on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct WireError {
	pub error: String,
	pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ElementValue {
	#[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
	pub reference: String,
}
