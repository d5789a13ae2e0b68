//! Browser capability seam.
//!
//! The flows in this crate never talk to the wire protocol directly; they go
//! through [`Browser`], which is exactly the capability set the booking run
//! needs. [`webdriver::Session`] is the production implementation.

use async_trait::async_trait;
use webdriver::{By, Element, Error, Session};

/// What the booking flows need from a browser.
///
/// All methods take `&mut self`: one run owns one browser exclusively, and
/// every wait is a blocking poll against it.
#[async_trait]
pub trait Browser: Send {
	async fn goto(&mut self, url: &str) -> Result<(), Error>;
	async fn refresh(&mut self) -> Result<(), Error>;
	async fn current_url(&mut self) -> Result<String, Error>;

	/// First match for `by`, or `None` when the page has no such element.
	async fn find(&mut self, by: &By) -> Result<Option<Element>, Error>;

	/// All matches for `by`, in document order.
	async fn find_all(&mut self, by: &By) -> Result<Vec<Element>, Error>;

	/// First descendant of `parent` matching `by`, or `None`.
	async fn find_in(&mut self, parent: &Element, by: &By) -> Result<Option<Element>, Error>;

	async fn click(&mut self, element: &Element) -> Result<(), Error>;
	async fn type_text(&mut self, element: &Element, text: &str) -> Result<(), Error>;
	async fn text(&mut self, element: &Element) -> Result<String, Error>;
	async fn attr(&mut self, element: &Element, name: &str) -> Result<Option<String>, Error>;
	async fn is_displayed(&mut self, element: &Element) -> Result<bool, Error>;

	/// Releases the underlying browser. Called exactly once per run.
	async fn quit(&mut self) -> Result<(), Error>;
}

#[async_trait]
impl Browser for Session {
	async fn goto(&mut self, url: &str) -> Result<(), Error> {
		self.navigate(url).await
	}

	async fn refresh(&mut self) -> Result<(), Error> {
		Session::refresh(self).await
	}

	async fn current_url(&mut self) -> Result<String, Error> {
		Session::current_url(self).await
	}

	async fn find(&mut self, by: &By) -> Result<Option<Element>, Error> {
		absence_as_none(self.find_element(by).await)
	}

	async fn find_all(&mut self, by: &By) -> Result<Vec<Element>, Error> {
		self.find_elements(by).await
	}

	async fn find_in(&mut self, parent: &Element, by: &By) -> Result<Option<Element>, Error> {
		absence_as_none(self.find_element_from(parent, by).await)
	}

	async fn click(&mut self, element: &Element) -> Result<(), Error> {
		Session::click(self, element).await
	}

	async fn type_text(&mut self, element: &Element, text: &str) -> Result<(), Error> {
		self.send_keys(element, text).await
	}

	async fn text(&mut self, element: &Element) -> Result<String, Error> {
		Session::text(self, element).await
	}

	async fn attr(&mut self, element: &Element, name: &str) -> Result<Option<String>, Error> {
		self.attribute(element, name).await
	}

	async fn is_displayed(&mut self, element: &Element) -> Result<bool, Error> {
		Session::is_displayed(self, element).await
	}

	async fn quit(&mut self) -> Result<(), Error> {
		Session::quit(self).await
	}
}

/// The wire protocol reports a missing element as an error; the flows treat
/// it as data.
fn absence_as_none(result: Result<Element, Error>) -> Result<Option<Element>, Error> {
	match result {
		Ok(element) => Ok(Some(element)),
		Err(e) if e.is_no_such_element() => Ok(None),
		Err(e) => Err(e),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn absence_as_none_maps_no_such_element() {
		let missing = Err(Error::Wire {
			error: "no such element".into(),
			message: "Unable to locate element".into(),
		});
		assert_eq!(absence_as_none(missing).unwrap(), None);
	}

	#[test]
	fn absence_as_none_keeps_other_wire_errors() {
		let stale: Result<Element, Error> = Err(Error::Wire {
			error: "stale element reference".into(),
			message: "gone".into(),
		});
		assert!(absence_as_none(stale).is_err());
	}

	#[test]
	fn absence_as_none_passes_elements_through() {
		let found = Ok(Element::new("node-3"));
		assert_eq!(absence_as_none(found).unwrap(), Some(Element::new("node-3")));
	}
}
