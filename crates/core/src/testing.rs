//! Scripted browser double for the flow tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use webdriver::{By, Element, Error};

use crate::browser::Browser;

/// Scripted [`Browser`]: selector lookups serve canned elements, element
/// reads serve canned values, and every interaction is recorded for
/// assertions.
#[derive(Default)]
pub(crate) struct MockBrowser {
	finds: HashMap<String, VecDeque<Option<Element>>>,
	find_alls: HashMap<String, Vec<Element>>,
	children: HashMap<(String, String), Element>,
	texts: HashMap<String, String>,
	attrs: HashMap<(String, String), String>,
	hidden: Vec<String>,
	urls: VecDeque<String>,

	pub visited: Vec<String>,
	pub clicked: Vec<String>,
	pub typed: Vec<(String, String)>,
	pub refreshes: usize,
	/// Shared so tests can still observe quits after `run` consumed the mock.
	quit_calls: Arc<AtomicUsize>,
	/// Substring that makes `goto` fail, for driver-error scenarios.
	pub fail_goto_containing: Option<String>,
}

impl MockBrowser {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn quit_counter(&self) -> Arc<AtomicUsize> {
		Arc::clone(&self.quit_calls)
	}

	/// Scripts successive `find` outcomes for a selector. The last entry
	/// repeats forever; an unscripted selector is never found.
	pub fn on_find(&mut self, selector: &str, results: Vec<Option<Element>>) -> &mut Self {
		self.finds.insert(selector.to_string(), results.into());
		self
	}

	pub fn on_find_all(&mut self, selector: &str, results: Vec<Element>) -> &mut Self {
		self.find_alls.insert(selector.to_string(), results);
		self
	}

	pub fn child(&mut self, parent: &Element, selector: &str, child: Element) -> &mut Self {
		self.children.insert((parent.reference().to_string(), selector.to_string()), child);
		self
	}

	pub fn text_of(&mut self, element: &Element, text: &str) -> &mut Self {
		self.texts.insert(element.reference().to_string(), text.to_string());
		self
	}

	pub fn attr_of(&mut self, element: &Element, name: &str, value: &str) -> &mut Self {
		self.attrs.insert((element.reference().to_string(), name.to_string()), value.to_string());
		self
	}

	pub fn hide(&mut self, element: &Element) -> &mut Self {
		self.hidden.push(element.reference().to_string());
		self
	}

	/// Scripts successive `current_url` reads. The last entry repeats.
	pub fn on_url(&mut self, urls: Vec<&str>) -> &mut Self {
		self.urls = urls.into_iter().map(str::to_string).collect();
		self
	}

	fn pop_repeating<T: Clone>(queue: &mut VecDeque<T>) -> Option<T> {
		if queue.len() > 1 {
			queue.pop_front()
		} else {
			queue.front().cloned()
		}
	}
}

#[async_trait]
impl Browser for MockBrowser {
	async fn goto(&mut self, url: &str) -> Result<(), Error> {
		if let Some(marker) = &self.fail_goto_containing {
			if url.contains(marker.as_str()) {
				return Err(Error::SessionClosed);
			}
		}
		self.visited.push(url.to_string());
		Ok(())
	}

	async fn refresh(&mut self) -> Result<(), Error> {
		self.refreshes += 1;
		Ok(())
	}

	async fn current_url(&mut self) -> Result<String, Error> {
		Ok(Self::pop_repeating(&mut self.urls).unwrap_or_default())
	}

	async fn find(&mut self, by: &By) -> Result<Option<Element>, Error> {
		Ok(self.finds.get_mut(by.value()).and_then(Self::pop_repeating).flatten())
	}

	async fn find_all(&mut self, by: &By) -> Result<Vec<Element>, Error> {
		Ok(self.find_alls.get(by.value()).cloned().unwrap_or_default())
	}

	async fn find_in(&mut self, parent: &Element, by: &By) -> Result<Option<Element>, Error> {
		Ok(self
			.children
			.get(&(parent.reference().to_string(), by.value().to_string()))
			.cloned())
	}

	async fn click(&mut self, element: &Element) -> Result<(), Error> {
		self.clicked.push(element.reference().to_string());
		Ok(())
	}

	async fn type_text(&mut self, element: &Element, text: &str) -> Result<(), Error> {
		self.typed.push((element.reference().to_string(), text.to_string()));
		Ok(())
	}

	async fn text(&mut self, element: &Element) -> Result<String, Error> {
		self.texts.get(element.reference()).cloned().ok_or(Error::Wire {
			error: "stale element reference".into(),
			message: format!("no scripted text for {}", element.reference()),
		})
	}

	async fn attr(&mut self, element: &Element, name: &str) -> Result<Option<String>, Error> {
		Ok(self
			.attrs
			.get(&(element.reference().to_string(), name.to_string()))
			.cloned())
	}

	async fn is_displayed(&mut self, element: &Element) -> Result<bool, Error> {
		Ok(!self.hidden.contains(&element.reference().to_string()))
	}

	async fn quit(&mut self) -> Result<(), Error> {
		self.quit_calls.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}
}
