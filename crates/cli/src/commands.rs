//! Command dispatch: the one-shot runner and the calendar-scheduled runner.

use std::time::Duration;

use anyhow::Context;
use chrono::{Duration as ChronoDuration, Local};
use fitbook::{BotConfig, next_release_instant};
use tokio::time::sleep;
use tracing::{info, warn};
use webdriver::{Capabilities, Session};

use crate::cli::{Cli, Commands, RunArgs, ScheduleArgs};
use crate::credentials;

pub async fn dispatch(cli: Cli) -> anyhow::Result<()> {
	match cli.command {
		Commands::Run(args) => {
			let wait_for_update = !args.no_wait;
			run_once(&args, wait_for_update).await
		}
		Commands::Schedule(args) => schedule(&args).await,
	}
}

fn build_config(args: &RunArgs, wait_for_update: bool) -> BotConfig {
	let mut config = BotConfig {
		target_class: args.target_class.clone(),
		wait_for_update,
		..BotConfig::default()
	};
	config.timing.ceiling = match args.max_poll_minutes {
		0 => None,
		minutes => Some(Duration::from_secs(minutes * 60)),
	};
	config
}

async fn run_once(args: &RunArgs, wait_for_update: bool) -> anyhow::Result<()> {
	let credentials = credentials::load(&args.credentials)?;
	let config = build_config(args, wait_for_update);

	let capabilities = if args.headless {
		Capabilities::firefox().headless()
	} else {
		Capabilities::firefox()
	};
	let session = Session::new(&args.webdriver_url, capabilities)
		.await
		.with_context(|| format!("connecting to webdriver at {}", args.webdriver_url))?;
	if let Err(e) = session.maximize().await {
		warn!(target = "fitbook", error = %e, "window maximize failed");
	}

	let report = fitbook::run(session, config, &credentials).await?;
	info!(
		target = "fitbook",
		booked = report.booked(),
		attempted = report.attempted(),
		week = report.week_id.as_deref().unwrap_or("unknown"),
		"run finished"
	);
	Ok(())
}

/// Sleeps until shortly before the next release instant, then performs one
/// run with the watcher enabled.
async fn schedule(args: &ScheduleArgs) -> anyhow::Result<()> {
	let config = build_config(&args.run, true);
	let release = next_release_instant(Local::now().naive_local(), config.release.weekday, config.release.time);
	let lead = ChronoDuration::minutes(args.lead_minutes as i64);
	info!(target = "fitbook", release = %release, lead_minutes = args.lead_minutes, "scheduled run armed");

	loop {
		let remaining = release - Local::now().naive_local();
		if remaining <= lead {
			break;
		}
		let step = (remaining - lead)
			.to_std()
			.unwrap_or_default()
			.min(Duration::from_secs(3600));
		sleep(step).await;
	}

	run_once(&args.run, true).await
}

#[cfg(test)]
mod tests {
	use clap::Parser;

	use super::*;

	fn run_args(extra: &[&str]) -> RunArgs {
		let mut argv = vec!["fitbook", "run", "--credentials", "/tmp/creds.txt"];
		argv.extend_from_slice(extra);
		let cli = Cli::parse_from(argv);
		match cli.command {
			Commands::Run(args) => args,
			Commands::Schedule(_) => unreachable!(),
		}
	}

	#[test]
	fn config_carries_the_target_class() {
		let config = build_config(&run_args(&["--target-class", "Bodypump"]), true);
		assert_eq!(config.target_class, "Bodypump");
		assert!(config.wait_for_update);
	}

	#[test]
	fn poll_ceiling_converts_from_minutes() {
		let config = build_config(&run_args(&["--max-poll-minutes", "30"]), true);
		assert_eq!(config.timing.ceiling, Some(Duration::from_secs(30 * 60)));
	}

	#[test]
	fn zero_minutes_disables_the_ceiling() {
		let config = build_config(&run_args(&["--max-poll-minutes", "0"]), true);
		assert_eq!(config.timing.ceiling, None);
	}

	#[test]
	fn no_wait_flag_skips_the_watcher() {
		let args = run_args(&["--no-wait"]);
		let config = build_config(&args, !args.no_wait);
		assert!(!config.wait_for_update);
	}
}
