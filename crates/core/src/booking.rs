//! The booking sequencer.

use std::sync::LazyLock;
use std::time::Duration;

use regex_lite::Regex;
use thiserror::Error;
use tracing::{info, warn};
use webdriver::By;

use crate::browser::Browser;
use crate::discovery::BookableClass;
use crate::selectors;
use crate::session::BookingSession;
use crate::wait::{Lookup, wait_for};

const CONFIRM_TIMEOUT: Duration = Duration::from_secs(15);

static CLASS_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"class_id=(\d+)").unwrap());

/// Why a single booking attempt did not go through. Per-item only; the
/// sequencer always moves on to the next class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingFailure {
	#[error("no class_id in discovered link: {url}")]
	MissingClassId { url: String },

	#[error("confirmation dialog absent after {waited:?}")]
	ConfirmationTimeout { waited: Duration },

	#[error("driver failure: {0}")]
	Driver(String),
}

/// Outcome of one booking attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingResult {
	pub title: String,
	pub class_id: Option<String>,
	pub failure: Option<BookingFailure>,
}

impl BookingResult {
	pub fn succeeded(&self) -> bool {
		self.failure.is_none()
	}
}

/// Numeric class id carried in a discovered booking link.
pub fn extract_class_id(url: &str) -> Option<String> {
	CLASS_ID.captures(url).map(|captures| captures[1].to_string())
}

impl<B: Browser> BookingSession<B> {
	/// Attempts every class in order. One result per input; failures are
	/// recorded, never propagated, so one bad slot cannot block the rest.
	pub async fn book(&mut self, classes: &[BookableClass]) -> Vec<BookingResult> {
		if classes.is_empty() {
			warn!(target = "fitbook", "no classes to book");
			return Vec::new();
		}

		let mut results = Vec::with_capacity(classes.len());
		for class in classes {
			info!(target = "fitbook", title = %class.title, "attempting booking");
			let result = self.book_one(class).await;
			match &result.failure {
				None => info!(target = "fitbook", title = %class.title, "booked"),
				Some(failure) => warn!(target = "fitbook", title = %class.title, error = %failure, "booking failed"),
			}
			results.push(result);
		}

		let booked = results.iter().filter(|result| result.succeeded()).count();
		info!(target = "fitbook", booked, total = results.len(), "booking complete");
		results
	}

	async fn book_one(&mut self, class: &BookableClass) -> BookingResult {
		let Some(class_id) = extract_class_id(&class.registration_url) else {
			return BookingResult {
				title: class.title.clone(),
				class_id: None,
				failure: Some(BookingFailure::MissingClassId {
					url: class.registration_url.clone(),
				}),
			};
		};

		// The discovered link carries whatever state the page rendered it
		// with; registration goes through the known-good URL shape instead.
		let url = self.config.registration_url(&class_id);
		let failure = match self.confirm_registration(&url).await {
			Ok(Lookup::Found(_)) => None,
			Ok(Lookup::NotFoundWithin(waited)) => Some(BookingFailure::ConfirmationTimeout { waited }),
			Err(e) => Some(BookingFailure::Driver(e.to_string())),
		};

		BookingResult {
			title: class.title.clone(),
			class_id: Some(class_id),
			failure,
		}
	}

	async fn confirm_registration(&mut self, url: &str) -> crate::Result<Lookup> {
		self.browser.goto(url).await?;
		wait_for(&mut self.browser, &By::xpath(selectors::CONFIRM_MODAL), CONFIRM_TIMEOUT).await
	}
}

#[cfg(test)]
mod tests {
	use webdriver::Element;

	use super::*;
	use crate::config::BotConfig;
	use crate::testing::MockBrowser;

	fn class(title: &str, url: &str) -> BookableClass {
		BookableClass {
			title: title.to_string(),
			registration_url: url.to_string(),
		}
	}

	#[test]
	fn extract_class_id_reads_the_query_parameter() {
		assert_eq!(
			extract_class_id("https://www.myfitness.lv/x?class_id=12345&class_action=register"),
			Some("12345".to_string())
		);
	}

	#[test]
	fn extract_class_id_rejects_links_without_one() {
		assert_eq!(extract_class_id("https://www.myfitness.lv/x?week=34"), None);
		assert_eq!(extract_class_id("https://www.myfitness.lv/x?class_id=abc"), None);
	}

	#[tokio::test(start_paused = true)]
	async fn empty_input_books_nothing() {
		let mut session = BookingSession::new(MockBrowser::new(), BotConfig::default());
		assert!(session.book(&[]).await.is_empty());
		assert!(session.browser.visited.is_empty());
	}

	#[tokio::test(start_paused = true)]
	async fn confirmation_dialog_means_success() {
		let mut browser = MockBrowser::new();
		browser.on_find(selectors::CONFIRM_MODAL, vec![Some(Element::new("modal"))]);

		let mut session = BookingSession::new(browser, BotConfig::default());
		let results = session.book(&[class("Hot Pilates Sculpt", "/x?class_id=42")]).await;

		assert_eq!(results.len(), 1);
		assert!(results[0].succeeded());
		assert_eq!(results[0].class_id.as_deref(), Some("42"));
		// Registration goes through the rebuilt canonical link.
		assert_eq!(
			session.browser.visited,
			vec![session.config().registration_url("42")]
		);
	}

	#[tokio::test(start_paused = true)]
	async fn missing_dialog_is_a_timeout_failure() {
		let mut session = BookingSession::new(MockBrowser::new(), BotConfig::default());
		let results = session.book(&[class("Hot Pilates Sculpt", "/x?class_id=42")]).await;

		assert_eq!(
			results[0].failure,
			Some(BookingFailure::ConfirmationTimeout {
				waited: CONFIRM_TIMEOUT
			})
		);
	}

	#[tokio::test(start_paused = true)]
	async fn bad_link_fails_that_item_and_attempts_the_rest() {
		let mut browser = MockBrowser::new();
		browser.on_find(selectors::CONFIRM_MODAL, vec![Some(Element::new("modal"))]);

		let mut session = BookingSession::new(browser, BotConfig::default());
		let results = session
			.book(&[
				class("Hot Pilates Sculpt 9:00", "/x?class_id=1"),
				class("Hot Pilates Sculpt 12:00", "/x?week=34"),
				class("Hot Pilates Sculpt 18:00", "/x?class_id=3"),
			])
			.await;

		assert_eq!(results.len(), 3);
		assert!(results[0].succeeded());
		assert!(matches!(results[1].failure, Some(BookingFailure::MissingClassId { .. })));
		assert!(results[2].succeeded());
		// The bad middle item never produced a navigation.
		assert_eq!(session.browser.visited.len(), 2);
	}

	#[tokio::test(start_paused = true)]
	async fn driver_errors_are_recorded_per_item() {
		let mut browser = MockBrowser::new();
		browser.on_find(selectors::CONFIRM_MODAL, vec![Some(Element::new("modal"))]);
		browser.fail_goto_containing = Some("class_id=13".to_string());

		let mut session = BookingSession::new(browser, BotConfig::default());
		let results = session
			.book(&[
				class("Hot Pilates Sculpt 9:00", "/x?class_id=13"),
				class("Hot Pilates Sculpt 18:00", "/x?class_id=14"),
			])
			.await;

		assert!(matches!(results[0].failure, Some(BookingFailure::Driver(_))));
		assert!(results[1].succeeded());
	}
}
