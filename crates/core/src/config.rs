//! Run configuration.
//!
//! Everything a run needs travels in one explicitly constructed value; there
//! is no module-level state anywhere in the crate.

use std::time::Duration;

use chrono::{NaiveTime, Weekday};

/// Login credentials. Read by the caller, passed through as opaque strings;
/// the core never validates them beyond presence.
#[derive(Debug, Clone)]
pub struct Credentials {
	pub email: String,
	pub password: String,
}

/// When the site republishes the weekly timetable.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseSpec {
	pub weekday: Weekday,
	pub time: NaiveTime,
}

impl Default for ReleaseSpec {
	fn default() -> Self {
		Self {
			weekday: Weekday::Sun,
			time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
		}
	}
}

/// Watcher cadence. Tests compress these to near-zero.
#[derive(Debug, Clone, Copy)]
pub struct WatcherTiming {
	/// Sleep step while far from the release instant.
	pub coarse: Duration,
	/// Poll step inside the final minute, before the instant passes.
	pub armed: Duration,
	/// Refresh cadence once the instant has passed.
	pub poll: Duration,
	/// How long a reloaded page gets to show the timetable again.
	pub reload_timeout: Duration,
	/// Upper bound on post-release polling. `None` polls forever.
	pub ceiling: Option<Duration>,
}

impl Default for WatcherTiming {
	fn default() -> Self {
		Self {
			coarse: Duration::from_secs(60),
			armed: Duration::from_secs(10),
			poll: Duration::from_secs(2),
			reload_timeout: Duration::from_secs(10),
			ceiling: Some(Duration::from_secs(2 * 60 * 60)),
		}
	}
}

/// Run context passed through the whole call chain.
#[derive(Debug, Clone)]
pub struct BotConfig {
	pub base_url: String,
	/// Timetable page of the club being booked.
	pub schedule_url: String,
	/// Authenticated-area URL the login flow must land on.
	pub member_area_url: String,
	/// Class name filter, matched as a case-sensitive substring of titles.
	pub target_class: String,
	/// Whether to hold the run until the weekly schedule update is detected.
	pub wait_for_update: bool,
	pub release: ReleaseSpec,
	pub timing: WatcherTiming,
}

impl Default for BotConfig {
	fn default() -> Self {
		let base_url = "https://www.myfitness.lv".to_string();
		Self {
			schedule_url: format!("{base_url}/club/galerija-centrs/nodarbibu-saraksts/"),
			member_area_url: format!("{base_url}/biedra-zona/sakums/"),
			base_url,
			target_class: "Hot Pilates Sculpt".to_string(),
			wait_for_update: true,
			release: ReleaseSpec::default(),
			timing: WatcherTiming::default(),
		}
	}
}

impl BotConfig {
	/// Canonical registration link for a class id, independent of whatever
	/// extra state the discovered link carried.
	pub fn registration_url(&self, class_id: &str) -> String {
		format!("{}?class_id={}&class_action=register", self.schedule_url, class_id)
	}
}
