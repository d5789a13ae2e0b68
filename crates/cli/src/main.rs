mod cli;
mod commands;
mod credentials;
mod logging;

use clap::Parser;
use tracing::error;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	if let Err(err) = logging::init_logging(cli.verbose, cli.log_file.as_deref()) {
		eprintln!("fitbook: {err:#}");
		std::process::exit(1);
	}

	if let Err(err) = commands::dispatch(cli).await {
		let chain = format!("{err:#}");
		error!(target = "fitbook", error = %chain, "run failed");
		std::process::exit(1);
	}
}
