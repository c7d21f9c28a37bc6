use clap::Parser;
use dir_sweeper::{SweepConfig, Sweeper};
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "sweeper")]
#[command(
	about = "Periodically moves files matching glob patterns out of a directory tree, preserving structure"
)]
struct Cli {
	/// Path to the JSON configuration file
	#[arg(short, long)]
	config: PathBuf,

	/// Enable verbose logging
	#[arg(short, long)]
	verbose: bool,

	/// Log what would move without touching files
	#[arg(long)]
	dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	// Initialize tracing
	let level = if cli.verbose {
		Level::DEBUG
	} else {
		Level::INFO
	};
	tracing_subscriber::fmt().with_max_level(level).init();

	let mut config = SweepConfig::from_file(&cli.config)?;
	if cli.dry_run {
		config.dry_run = true;
	}

	info!("Loaded configuration from {:?}", cli.config);

	let handle = Sweeper::start(config)?;

	// Keep the program running until the host stops it
	tokio::signal::ctrl_c().await?;
	info!("Shutting down sweeper...");
	handle.stop().await?;

	Ok(())
}
