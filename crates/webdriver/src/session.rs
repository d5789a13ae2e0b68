//! HTTP session against a WebDriver remote end.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::protocol::{CapabilityRequest, Capabilities, ElementValue, NewSessionRequest, NewSessionValue, WireError};

/// Locator strategy for element lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum By {
	XPath(String),
	Css(String),
}

impl By {
	pub fn xpath(value: impl Into<String>) -> Self {
		Self::XPath(value.into())
	}

	pub fn css(value: impl Into<String>) -> Self {
		Self::Css(value.into())
	}

	fn using(&self) -> &'static str {
		match self {
			By::XPath(_) => "xpath",
			By::Css(_) => "css selector",
		}
	}

	pub fn value(&self) -> &str {
		match self {
			By::XPath(value) | By::Css(value) => value,
		}
	}
}

/// Opaque element reference handed out by the remote end. Valid only for the
/// session that produced it, and only until the page it came from is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element(String);

impl Element {
	pub fn new(reference: impl Into<String>) -> Self {
		Self(reference.into())
	}

	pub fn reference(&self) -> &str {
		&self.0
	}
}

/// One browser session, exclusively owned for its whole lifetime.
#[derive(Debug)]
pub struct Session {
	http: Client,
	base: Url,
	session_id: String,
	open: bool,
}

impl Session {
	/// Opens a session against `server_url` (a running geckodriver, usually
	/// `http://localhost:4444`).
	pub async fn new(server_url: &str, capabilities: Capabilities) -> Result<Self> {
		let base = normalize_base(server_url)?;
		let http = Client::new();

		let request = NewSessionRequest {
			capabilities: CapabilityRequest {
				always_match: capabilities,
			},
		};
		let value: NewSessionValue = execute_raw(&http, &base, Method::POST, "session", Some(serde_json::to_value(&request)?)).await?;
		debug!(target = "webdriver", session = %value.session_id, "session opened");

		Ok(Self {
			http,
			base,
			session_id: value.session_id,
			open: true,
		})
	}

	pub fn session_id(&self) -> &str {
		&self.session_id
	}

	pub async fn navigate(&self, url: &str) -> Result<()> {
		self.execute_unit(Method::POST, "url", Some(json!({ "url": url }))).await
	}

	pub async fn current_url(&self) -> Result<String> {
		self.execute(Method::GET, "url", None).await
	}

	pub async fn refresh(&self) -> Result<()> {
		self.execute_unit(Method::POST, "refresh", None).await
	}

	pub async fn maximize(&self) -> Result<()> {
		self.execute_unit(Method::POST, "window/maximize", None).await
	}

	/// Finds the first element matching `by`. Absence comes back as the
	/// `no such element` wire error; see [`Error::is_no_such_element`].
	pub async fn find_element(&self, by: &By) -> Result<Element> {
		let value: ElementValue = self.execute(Method::POST, "element", Some(locator(by))).await?;
		Ok(Element(value.reference))
	}

	/// Finds all elements matching `by`, in document order. No match is an
	/// empty vec, not an error.
	pub async fn find_elements(&self, by: &By) -> Result<Vec<Element>> {
		let values: Vec<ElementValue> = self.execute(Method::POST, "elements", Some(locator(by))).await?;
		Ok(values.into_iter().map(|value| Element(value.reference)).collect())
	}

	/// Finds the first descendant of `parent` matching `by`.
	pub async fn find_element_from(&self, parent: &Element, by: &By) -> Result<Element> {
		let path = format!("element/{}/element", parent.reference());
		let value: ElementValue = self.execute(Method::POST, &path, Some(locator(by))).await?;
		Ok(Element(value.reference))
	}

	pub async fn click(&self, element: &Element) -> Result<()> {
		let path = format!("element/{}/click", element.reference());
		self.execute_unit(Method::POST, &path, None).await
	}

	pub async fn send_keys(&self, element: &Element, text: &str) -> Result<()> {
		let path = format!("element/{}/value", element.reference());
		self.execute_unit(Method::POST, &path, Some(json!({ "text": text }))).await
	}

	pub async fn text(&self, element: &Element) -> Result<String> {
		let path = format!("element/{}/text", element.reference());
		self.execute(Method::GET, &path, None).await
	}

	pub async fn attribute(&self, element: &Element, name: &str) -> Result<Option<String>> {
		let path = format!("element/{}/attribute/{}", element.reference(), name);
		self.execute(Method::GET, &path, None).await
	}

	pub async fn is_displayed(&self, element: &Element) -> Result<bool> {
		let path = format!("element/{}/displayed", element.reference());
		self.execute(Method::GET, &path, None).await
	}

	/// Deletes the remote session. Idempotent: repeated calls are no-ops, and
	/// every other method fails with [`Error::SessionClosed`] afterwards.
	pub async fn quit(&mut self) -> Result<()> {
		if !self.open {
			return Ok(());
		}
		self.open = false;
		let path = format!("session/{}", self.session_id);
		let _: Value = execute_raw(&self.http, &self.base, Method::DELETE, &path, None).await?;
		debug!(target = "webdriver", session = %self.session_id, "session closed");
		Ok(())
	}

	async fn execute<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T> {
		if !self.open {
			return Err(Error::SessionClosed);
		}
		let path = format!("session/{}/{}", self.session_id, path);
		execute_raw(&self.http, &self.base, method, &path, body).await
	}

	async fn execute_unit(&self, method: Method, path: &str, body: Option<Value>) -> Result<()> {
		let _: Value = self.execute(method, path, body).await?;
		Ok(())
	}
}

fn locator(by: &By) -> Value {
	json!({ "using": by.using(), "value": by.value() })
}

/// The endpoint base must end in `/` so joined paths append instead of
/// replacing the last segment (`/wd/hub` setups).
fn normalize_base(server_url: &str) -> Result<Url> {
	let mut base = Url::parse(server_url)?;
	if !base.path().ends_with('/') {
		base.set_path(&format!("{}/", base.path()));
	}
	Ok(base)
}

async fn execute_raw<T: DeserializeOwned>(http: &Client, base: &Url, method: Method, path: &str, body: Option<Value>) -> Result<T> {
	let url = base.join(path).map_err(Error::InvalidUrl)?;
	debug!(target = "webdriver", %method, %url, "request");

	let mut request = http.request(method.clone(), url);
	request = if let Some(body) = body {
		request.json(&body)
	} else if method == Method::POST {
		// W3C requires POST bodies to be JSON objects, even empty ones.
		request.json(&json!({}))
	} else {
		request
	};

	let response = request.send().await?;
	let status = response.status();
	let mut payload: Value = response.json().await?;
	let value = payload.get_mut("value").map(Value::take).unwrap_or(Value::Null);

	if !status.is_success() {
		let wire: WireError = serde_json::from_value(value)
			.map_err(|e| Error::Malformed(format!("undecodable error body ({status}): {e}")))?;
		return Err(Error::Wire {
			error: wire.error,
			message: wire.message,
		});
	}

	serde_json::from_value(value).map_err(|e| Error::Malformed(e.to_string()))
}
