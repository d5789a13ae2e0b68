//! Run orchestration.

use tracing::info;

use crate::booking::BookingResult;
use crate::browser::Browser;
use crate::config::{BotConfig, Credentials};
use crate::error::Result;
use crate::session::BookingSession;

/// What a completed run did.
#[derive(Debug)]
pub struct RunReport {
	/// Week displayed when booking started, when it could be read.
	pub week_id: Option<String>,
	pub results: Vec<BookingResult>,
}

impl RunReport {
	pub fn booked(&self) -> usize {
		self.results.iter().filter(|result| result.succeeded()).count()
	}

	pub fn attempted(&self) -> usize {
		self.results.len()
	}
}

/// Performs one full booking run against `browser` and always releases it,
/// whichever way the run ends.
pub async fn run<B: Browser>(browser: B, config: BotConfig, credentials: &Credentials) -> Result<RunReport> {
	let mut session = BookingSession::new(browser, config);
	let outcome = run_stages(&mut session, credentials).await;
	session.quit().await;
	outcome
}

async fn run_stages<B: Browser>(session: &mut BookingSession<B>, credentials: &Credentials) -> Result<RunReport> {
	info!(target = "fitbook", "starting booking run");

	session.open_landing().await?;
	session.accept_cookies().await?;
	session.dismiss_promo().await?;

	session.login(credentials).await?;
	session.navigate_to_schedule().await?;
	session.dismiss_promo().await?;

	if session.config().wait_for_update {
		session.wait_for_schedule_update().await?;
	}

	session.advance_to_next_week().await?;
	let week_id = session.current_week_id().await.ok();

	let classes = session.find_target_classes().await?;
	let results = session.book(&classes).await;

	info!(target = "fitbook", "booking run complete");
	Ok(RunReport { week_id, results })
}
