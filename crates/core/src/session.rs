//! Session ownership, landing setup, overlay dismissal and login.

use std::time::Duration;

use tracing::{info, warn};
use webdriver::{By, Element};

use crate::browser::Browser;
use crate::config::{BotConfig, Credentials};
use crate::error::{Error, Result};
use crate::selectors;
use crate::wait::{Lookup, wait_for, wait_for_url};

const OVERLAY_TIMEOUT: Duration = Duration::from_secs(5);
const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

/// One browser run. Owns the browser handle for its whole lifetime; the
/// orchestrator releases it through [`BookingSession::quit`].
pub struct BookingSession<B: Browser> {
	pub(crate) browser: B,
	pub(crate) config: BotConfig,
	logged_in: bool,
}

impl<B: Browser> BookingSession<B> {
	pub fn new(browser: B, config: BotConfig) -> Self {
		Self {
			browser,
			config,
			logged_in: false,
		}
	}

	pub fn config(&self) -> &BotConfig {
		&self.config
	}

	pub fn is_logged_in(&self) -> bool {
		self.logged_in
	}

	/// Opens the landing page.
	pub async fn open_landing(&mut self) -> Result<()> {
		let url = self.config.base_url.clone();
		self.browser.goto(&url).await?;
		Ok(())
	}

	/// Clicks the Cookiebot allow-all button when the banner is up. Absence
	/// is not an error; neither is a failed click.
	pub async fn accept_cookies(&mut self) -> Result<()> {
		self.dismiss_overlay(selectors::COOKIE_ALLOW_ALL, "cookie banner").await
	}

	/// Closes the promotional dialog when one is up.
	pub async fn dismiss_promo(&mut self) -> Result<()> {
		self.dismiss_overlay(selectors::PROMO_CLOSE, "promo dialog").await
	}

	async fn dismiss_overlay(&mut self, selector: &str, what: &str) -> Result<()> {
		match wait_for(&mut self.browser, &By::xpath(selector), OVERLAY_TIMEOUT).await? {
			Lookup::Found(control) => match self.browser.click(&control).await {
				Ok(()) => info!(target = "fitbook", "{what} dismissed"),
				Err(e) => warn!(target = "fitbook", error = %e, "{what} dismissal failed"),
			},
			Lookup::NotFoundWithin(_) => info!(target = "fitbook", "no {what} detected"),
		}
		Ok(())
	}

	/// Logs in through the site header. Idempotent: an authenticated session
	/// is left untouched.
	pub async fn login(&mut self, credentials: &Credentials) -> Result<()> {
		if self.logged_in {
			info!(target = "fitbook", "already logged in");
			return Ok(());
		}
		info!(target = "fitbook", "logging in");

		let link = self.login_step(selectors::LOGIN_LINK, "login link").await?;
		self.browser.click(&link).await?;

		let username = self.login_step(selectors::LOGIN_USERNAME, "username field").await?;
		let password = self.login_step(selectors::LOGIN_PASSWORD, "password field").await?;
		self.browser.type_text(&username, &credentials.email).await?;
		self.browser.type_text(&password, &credentials.password).await?;

		let submit = self.login_step(selectors::LOGIN_SUBMIT, "submit button").await?;
		self.browser.click(&submit).await?;

		let member_area = self.config.member_area_url.clone();
		if !wait_for_url(&mut self.browser, &member_area, LOGIN_TIMEOUT).await? {
			return Err(Error::auth(format!("member area not reached within {LOGIN_TIMEOUT:?}")));
		}

		self.logged_in = true;
		info!(target = "fitbook", "login successful");
		Ok(())
	}

	async fn login_step(&mut self, selector: &str, what: &str) -> Result<Element> {
		match wait_for(&mut self.browser, &By::xpath(selector), LOGIN_TIMEOUT).await? {
			Lookup::Found(element) => Ok(element),
			Lookup::NotFoundWithin(timeout) => Err(Error::auth(format!("{what} not present within {timeout:?}"))),
		}
	}

	/// Releases the browser. Errors are logged, not propagated, so cleanup
	/// never masks an earlier failure.
	pub async fn quit(mut self) {
		match self.browser.quit().await {
			Ok(()) => info!(target = "fitbook", "browser closed"),
			Err(e) => warn!(target = "fitbook", error = %e, "browser shutdown failed"),
		}
	}
}
