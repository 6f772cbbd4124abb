use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use laminate::Node;
use laminate::logging::init_logging;

#[derive(Parser)]
#[command(name = "laminate")]
#[command(
	author,
	version,
	about = "Merge layered YAML configuration files and print the result"
)]
struct Cli {
	/// Base configuration file
	base: PathBuf,

	/// Override configuration files, merged in order on top of the base
	overrides: Vec<PathBuf>,

	/// Treat missing override files as empty
	#[arg(long)]
	ignore_missing: bool,

	/// Enable debug logging to stderr
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	init_logging(None, None, Some(cli.verbose)).context("Failed to initialize logging")?;

	let mut cfg = Node::from_file(&cli.base)
		.with_context(|| format!("Failed to load {}", cli.base.display()))?;

	for path in &cli.overrides {
		cfg.update_file(path, cli.ignore_missing)
			.with_context(|| format!("Failed to merge {}", path.display()))?;
	}

	let stdout = std::io::stdout();
	cfg.dump(stdout.lock())
		.context("Failed to write merged config")?;

	Ok(ExitCode::SUCCESS)
}
