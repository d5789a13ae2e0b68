//! Timetable navigation.

use std::time::Duration;

use tracing::info;
use webdriver::By;

use crate::browser::Browser;
use crate::error::{Error, Result};
use crate::selectors;
use crate::session::BookingSession;
use crate::wait::{Lookup, wait_for, wait_gone};

const TIMETABLE_TIMEOUT: Duration = Duration::from_secs(15);
const WEEK_TIMEOUT: Duration = Duration::from_secs(10);
const NEXT_WEEK_TIMEOUT: Duration = Duration::from_secs(10);
const LOADER_TIMEOUT: Duration = Duration::from_secs(15);

impl<B: Browser> BookingSession<B> {
	/// Loads the timetable page and blocks until the table is present.
	pub async fn navigate_to_schedule(&mut self) -> Result<()> {
		info!(target = "fitbook", "navigating to schedule");
		let url = self.config.schedule_url.clone();
		self.browser.goto(&url).await?;

		match wait_for(&mut self.browser, &By::xpath(selectors::TIMETABLE), TIMETABLE_TIMEOUT).await? {
			Lookup::Found(_) => Ok(()),
			Lookup::NotFoundWithin(timeout) => Err(Error::navigation(format!("timetable not present within {timeout:?}"))),
		}
	}

	/// Reads the identifier of the week currently rendered.
	pub async fn current_week_id(&mut self) -> Result<String> {
		let marker = match wait_for(&mut self.browser, &By::xpath(selectors::WEEK_MARKER), WEEK_TIMEOUT).await? {
			Lookup::Found(element) => element,
			Lookup::NotFoundWithin(timeout) => {
				return Err(Error::navigation(format!("week marker not visible within {timeout:?}")));
			}
		};
		self.browser
			.attr(&marker, selectors::WEEK_ATTR)
			.await?
			.ok_or_else(|| Error::navigation("week marker lacks a data-week value"))
	}

	/// Clicks over to next week, then waits out the loading indicator that
	/// signals the asynchronous timetable swap.
	pub async fn advance_to_next_week(&mut self) -> Result<()> {
		info!(target = "fitbook", "advancing to next week");
		let control = match wait_for(&mut self.browser, &By::xpath(selectors::NEXT_WEEK), NEXT_WEEK_TIMEOUT).await? {
			Lookup::Found(element) => element,
			Lookup::NotFoundWithin(timeout) => {
				return Err(Error::navigation(format!("next-week control not present within {timeout:?}")));
			}
		};
		self.browser.click(&control).await?;

		if !wait_gone(&mut self.browser, &By::xpath(selectors::LOADER), LOADER_TIMEOUT).await? {
			return Err(Error::navigation(format!("loading indicator still visible after {LOADER_TIMEOUT:?}")));
		}
		info!(target = "fitbook", "next week loaded");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use webdriver::Element;

	use super::*;
	use crate::config::BotConfig;
	use crate::testing::MockBrowser;

	#[tokio::test(start_paused = true)]
	async fn navigate_requires_the_timetable() {
		let mut browser = MockBrowser::new();
		browser.on_find(selectors::TIMETABLE, vec![Some(Element::new("table"))]);

		let mut session = BookingSession::new(browser, BotConfig::default());
		session.navigate_to_schedule().await.unwrap();
		assert_eq!(session.browser.visited, vec![session.config().schedule_url.clone()]);
	}

	#[tokio::test(start_paused = true)]
	async fn navigate_fails_without_the_timetable() {
		let mut session = BookingSession::new(MockBrowser::new(), BotConfig::default());
		let err = session.navigate_to_schedule().await.unwrap_err();
		assert!(matches!(err, Error::Navigation { .. }));
	}

	#[tokio::test(start_paused = true)]
	async fn current_week_reads_the_data_week_attribute() {
		let marker = Element::new("wk");
		let mut browser = MockBrowser::new();
		browser.on_find(selectors::WEEK_MARKER, vec![Some(marker.clone())]);
		browser.attr_of(&marker, selectors::WEEK_ATTR, "2026-08-10");

		let mut session = BookingSession::new(browser, BotConfig::default());
		assert_eq!(session.current_week_id().await.unwrap(), "2026-08-10");
	}

	#[tokio::test(start_paused = true)]
	async fn current_week_fails_when_attribute_is_missing() {
		let mut browser = MockBrowser::new();
		browser.on_find(selectors::WEEK_MARKER, vec![Some(Element::new("wk"))]);

		let mut session = BookingSession::new(browser, BotConfig::default());
		let err = session.current_week_id().await.unwrap_err();
		assert!(matches!(err, Error::Navigation { .. }));
	}

	#[tokio::test(start_paused = true)]
	async fn advance_clicks_and_outwaits_the_loader() {
		let loader = Element::new("loader");
		let mut browser = MockBrowser::new();
		browser.on_find(selectors::NEXT_WEEK, vec![Some(Element::new("next"))]);
		browser.on_find(selectors::LOADER, vec![Some(loader.clone())]);
		browser.hide(&loader);

		let mut session = BookingSession::new(browser, BotConfig::default());
		session.advance_to_next_week().await.unwrap();
		assert_eq!(session.browser.clicked, vec!["next"]);
	}

	#[tokio::test(start_paused = true)]
	async fn advance_fails_when_the_loader_sticks() {
		let mut browser = MockBrowser::new();
		browser.on_find(selectors::NEXT_WEEK, vec![Some(Element::new("next"))]);
		browser.on_find(selectors::LOADER, vec![Some(Element::new("loader"))]);

		let mut session = BookingSession::new(browser, BotConfig::default());
		let err = session.advance_to_next_week().await.unwrap_err();
		assert!(matches!(err, Error::Navigation { .. }));
	}
}
