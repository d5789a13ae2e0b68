use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

/// Console logging, optionally teed into an append-mode log file so a
/// scheduled run leaves a persistent trail.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> anyhow::Result<()> {
	// 0 = the run narrative, 1 (-v) = debug incl. protocol chatter, 2+ = everything
	let filter = match verbosity {
		0 => "info,webdriver=warn",
		1 => "debug",
		_ => "trace",
	};
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

	let writer = match log_file {
		Some(path) => {
			let file = OpenOptions::new()
				.create(true)
				.append(true)
				.open(path)
				.with_context(|| format!("opening log file {}", path.display()))?;
			BoxMakeWriter::new(std::io::stderr.and(Arc::new(file)))
		}
		None => BoxMakeWriter::new(std::io::stderr),
	};

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(writer)
		.with_ansi(log_file.is_none())
		.with_target(true)
		.with_level(true)
		.compact()
		.init();

	Ok(())
}
