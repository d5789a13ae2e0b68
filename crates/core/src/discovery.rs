//! Class discovery on the rendered timetable.

use std::time::Duration;

use tracing::{info, warn};
use url::Url;
use webdriver::{By, Element, Error as DriverError};

use crate::browser::Browser;
use crate::error::{Error, Result};
use crate::selectors;
use crate::session::BookingSession;
use crate::wait::{Lookup, wait_for};

const TIMETABLE_TIMEOUT: Duration = Duration::from_secs(15);

/// One slot open for registration, scraped off the timetable. Valid for this
/// run only; the list is rebuilt from scratch on every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookableClass {
	pub title: String,
	pub registration_url: String,
}

impl<B: Browser> BookingSession<B> {
	/// Enumerates open slots on the displayed week and keeps those whose
	/// title contains the configured class name, in page order.
	pub async fn find_target_classes(&mut self) -> Result<Vec<BookableClass>> {
		let target = self.config.target_class.clone();
		info!(target = "fitbook", class = %target, "scanning timetable");

		if let Lookup::NotFoundWithin(timeout) =
			wait_for(&mut self.browser, &By::xpath(selectors::TIMETABLE_WRAP), TIMETABLE_TIMEOUT).await?
		{
			return Err(Error::navigation(format!("timetable wrap not present within {timeout:?}")));
		}

		let items = self.browser.find_all(&By::xpath(selectors::OPEN_CLASS_ITEMS)).await?;
		info!(target = "fitbook", open_slots = items.len(), "open slots enumerated");

		let base = self.config.base_url.clone();
		let mut matches = Vec::new();
		for item in &items {
			match self.read_slot(item, &base).await {
				Ok(Some(class)) if class.title.contains(&target) => matches.push(class),
				Ok(_) => {}
				Err(e) => warn!(target = "fitbook", error = %e, "skipping unreadable slot"),
			}
		}

		info!(target = "fitbook", found = matches.len(), class = %target, "target classes found");
		Ok(matches)
	}

	/// Reads one slot's booking link and title. `None` when either part is
	/// missing, which closed or half-rendered slots produce.
	async fn read_slot(&mut self, item: &Element, base: &str) -> std::result::Result<Option<BookableClass>, DriverError> {
		let Some(link) = self.browser.find_in(item, &By::xpath(selectors::CLASS_BOOKING_LINK)).await? else {
			return Ok(None);
		};
		let Some(href) = self.browser.attr(&link, "href").await? else {
			return Ok(None);
		};
		let Some(title_element) = self.browser.find_in(item, &By::xpath(selectors::CLASS_TITLE)).await? else {
			return Ok(None);
		};
		let title = self.browser.text(&title_element).await?.trim().to_string();

		Ok(Some(BookableClass {
			title,
			registration_url: resolve_href(base, &href),
		}))
	}
}

/// Absolute form of a possibly-relative href.
fn resolve_href(base: &str, href: &str) -> String {
	if Url::parse(href).is_ok() {
		return href.to_string();
	}
	Url::parse(base)
		.and_then(|parsed| parsed.join(href))
		.map(String::from)
		.unwrap_or_else(|_| href.to_string())
}
