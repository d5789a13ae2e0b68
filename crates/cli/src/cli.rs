//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Root CLI for the booking bot.
#[derive(Parser, Debug)]
#[command(name = "fitbook")]
#[command(about = "MyFitness class booking bot")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v debug, -vv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Append log output to this file in addition to the console
	#[arg(long, global = true, value_name = "PATH")]
	pub log_file: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Perform a single booking run now.
	Run(RunArgs),
	/// Sleep until the next schedule release, then perform one run.
	Schedule(ScheduleArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
	/// Two-line credentials file: email, then password
	#[arg(long, value_name = "FILE", env = "FITBOOK_CREDENTIALS")]
	pub credentials: PathBuf,

	/// Class name to book, matched as a substring of slot titles
	#[arg(long, value_name = "NAME", default_value = "Hot Pilates Sculpt")]
	pub target_class: String,

	/// WebDriver endpoint of a running geckodriver
	#[arg(long, value_name = "URL", default_value = "http://localhost:4444", env = "FITBOOK_WEBDRIVER")]
	pub webdriver_url: String,

	/// Launch the browser headless
	#[arg(long)]
	pub headless: bool,

	/// Book whatever the next week already shows instead of waiting for the
	/// weekly schedule update
	#[arg(long)]
	pub no_wait: bool,

	/// Give up when no update is detected within this many minutes of the
	/// release instant (0 polls forever)
	#[arg(long, value_name = "MINUTES", default_value_t = 120)]
	pub max_poll_minutes: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ScheduleArgs {
	#[command(flatten)]
	pub run: RunArgs,

	/// Wake up this many minutes before the release instant
	#[arg(long, value_name = "MINUTES", default_value_t = 5)]
	pub lead_minutes: u64,
}
