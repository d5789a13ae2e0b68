//! Blocking waits with explicit outcomes.
//!
//! A bounded wait reports what happened instead of raising: callers decide
//! whether an absent element is fatal (timetable missing) or merely
//! informational (no cookie banner today).

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::trace;

use crate::browser::Browser;
use crate::error::Result;
use webdriver::By;

/// Outcome of a bounded element wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
	Found(webdriver::Element),
	NotFoundWithin(Duration),
}

impl Lookup {
	pub fn found(self) -> Option<webdriver::Element> {
		match self {
			Lookup::Found(element) => Some(element),
			Lookup::NotFoundWithin(_) => None,
		}
	}
}

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Polls until `by` matches or `timeout` elapses.
pub async fn wait_for<B: Browser>(browser: &mut B, by: &By, timeout: Duration) -> Result<Lookup> {
	let deadline = Instant::now() + timeout;
	loop {
		if let Some(element) = browser.find(by).await? {
			return Ok(Lookup::Found(element));
		}
		let now = Instant::now();
		if now >= deadline {
			trace!(target = "fitbook", selector = by.value(), ?timeout, "wait elapsed");
			return Ok(Lookup::NotFoundWithin(timeout));
		}
		sleep(POLL_INTERVAL.min(deadline - now)).await;
	}
}

/// Polls until no visible match for `by` remains. Absence counts as gone,
/// so this doubles as an invisibility wait for loading indicators.
pub async fn wait_gone<B: Browser>(browser: &mut B, by: &By, timeout: Duration) -> Result<bool> {
	let deadline = Instant::now() + timeout;
	loop {
		let visible = match browser.find(by).await? {
			// An element that goes stale mid-check is as good as gone.
			Some(element) => browser.is_displayed(&element).await.unwrap_or(false),
			None => false,
		};
		if !visible {
			return Ok(true);
		}
		let now = Instant::now();
		if now >= deadline {
			return Ok(false);
		}
		sleep(POLL_INTERVAL.min(deadline - now)).await;
	}
}

/// Polls until the browser reports exactly `url`, or `timeout` elapses.
pub async fn wait_for_url<B: Browser>(browser: &mut B, url: &str, timeout: Duration) -> Result<bool> {
	let deadline = Instant::now() + timeout;
	loop {
		if browser.current_url().await? == url {
			return Ok(true);
		}
		let now = Instant::now();
		if now >= deadline {
			return Ok(false);
		}
		sleep(POLL_INTERVAL.min(deadline - now)).await;
	}
}
