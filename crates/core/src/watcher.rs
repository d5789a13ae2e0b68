//! The schedule-update watcher.
//!
//! The site republishes its timetable at a fixed weekly instant. The watcher
//! sleeps coarsely while far out, captures a baseline week id in the final
//! minute, then refreshes aggressively until the rendered week changes. A
//! refresh that times out is logged and retried; the release event is worth
//! waiting through transient slow loads.

use chrono::{Datelike, Duration as ChronoDuration, Local, NaiveDateTime, NaiveTime, Weekday};
use tokio::time::{Instant, sleep};
use tracing::{info, warn};
use webdriver::By;

use crate::browser::Browser;
use crate::error::{Error, Result};
use crate::selectors;
use crate::session::BookingSession;
use crate::wait::{Lookup, wait_for};

/// Watcher phases, in order of occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	/// Far from the release instant, sleeping in coarse steps.
	Sleeping,
	/// Inside the final minute, baseline snapshot captured.
	Armed,
	/// Past the release instant, refreshing until the week changes.
	Polling,
	/// The rendered week differs from the baseline. Terminal.
	Detected,
}

/// Next occurrence of `weekday` at `at`, rolled a week forward when today's
/// instant has already passed.
pub fn next_release_instant(now: NaiveDateTime, weekday: Weekday, at: NaiveTime) -> NaiveDateTime {
	let days_ahead = (weekday.num_days_from_monday() + 7 - now.weekday().num_days_from_monday()) % 7;
	let candidate = (now.date() + ChronoDuration::days(i64::from(days_ahead))).and_time(at);
	if candidate <= now {
		candidate + ChronoDuration::days(7)
	} else {
		candidate
	}
}

/// Baseline week id captured on arming. Equality keeps the watcher polling;
/// any change is the release.
#[derive(Debug, Clone)]
pub struct SnapshotWatch {
	baseline: String,
}

impl SnapshotWatch {
	pub fn new(baseline: impl Into<String>) -> Self {
		Self {
			baseline: baseline.into(),
		}
	}

	pub fn baseline(&self) -> &str {
		&self.baseline
	}

	pub fn observe(&self, current: &str) -> Phase {
		if current == self.baseline {
			Phase::Polling
		} else {
			Phase::Detected
		}
	}
}

impl<B: Browser> BookingSession<B> {
	/// Blocks until the weekly schedule update is detected (or the polling
	/// ceiling, when configured, runs out).
	pub async fn wait_for_schedule_update(&mut self) -> Result<()> {
		let release = next_release_instant(
			Local::now().naive_local(),
			self.config.release.weekday,
			self.config.release.time,
		);
		self.watch_until(release).await
	}

	pub(crate) async fn watch_until(&mut self, release: NaiveDateTime) -> Result<()> {
		info!(target = "fitbook", release = %release, phase = ?Phase::Sleeping, "waiting for schedule update");
		let timing = self.config.timing;

		// Coarse sleep until one minute out, logging the countdown roughly
		// hourly.
		let mut logged_hours: Option<i64> = None;
		loop {
			let remaining = release - Local::now().naive_local();
			if remaining <= ChronoDuration::minutes(1) {
				break;
			}
			let hours = remaining.num_hours();
			if logged_hours != Some(hours) {
				info!(target = "fitbook", hours_left = hours, "schedule update still ahead");
				logged_hours = Some(hours);
			}
			sleep(timing.coarse).await;
		}

		// Final minute: capture the pre-release week as baseline.
		self.navigate_to_schedule().await?;
		let watch = SnapshotWatch::new(self.current_week_id().await?);
		info!(target = "fitbook", week = watch.baseline(), phase = ?Phase::Armed, "baseline week captured");

		let mut polling_since: Option<Instant> = None;
		let mut refreshes = 0u32;
		loop {
			if Local::now().naive_local() < release {
				sleep(timing.armed).await;
				continue;
			}

			let started = match polling_since {
				Some(instant) => instant,
				None => {
					info!(target = "fitbook", phase = ?Phase::Polling, "release instant passed");
					let now = Instant::now();
					polling_since = Some(now);
					now
				}
			};
			if let Some(ceiling) = timing.ceiling {
				if started.elapsed() > ceiling {
					return Err(Error::WatcherCeiling { ceiling });
				}
			}

			sleep(timing.poll).await;
			self.browser.refresh().await?;

			match wait_for(&mut self.browser, &By::xpath(selectors::TIMETABLE), timing.reload_timeout).await? {
				Lookup::NotFoundWithin(timeout) => {
					warn!(target = "fitbook", ?timeout, "reload timed out, retrying");
					continue;
				}
				Lookup::Found(_) => {}
			}

			let week = match self.current_week_id().await {
				Ok(week) => week,
				Err(Error::Navigation { what }) => {
					warn!(target = "fitbook", what = %what, "week marker unreadable after reload");
					continue;
				}
				Err(e) => return Err(e),
			};

			refreshes += 1;
			if watch.observe(&week) == Phase::Detected {
				info!(target = "fitbook", refreshes, week = %week, phase = ?Phase::Detected, "schedule update detected");
				return Ok(());
			}
			if refreshes % 10 == 0 {
				info!(target = "fitbook", refreshes, "still waiting for update");
			}
		}
	}
}
