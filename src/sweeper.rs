//! The long-running sweep loop

use crate::config::SweepConfig;
use crate::error::{Result, SweepError};
use crate::mover::FileMover;
use crate::pattern::PatternSet;
use crate::pause::{self, PauseWindow};
use crate::scanner::ScanCycle;
use chrono::Local;
use std::path::PathBuf;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// The scheduler loop: pause evaluation, one scan cycle, interval sleep
///
/// Patterns and pause windows are compiled once at construction and held
/// immutable for the process lifetime; configuration changes require a
/// restart.
#[derive(Debug)]
pub struct Sweeper {
	config: SweepConfig,
	patterns: PatternSet,
	windows: Vec<PauseWindow>,
	mover: FileMover,
	cycle: ScanCycle,
}

impl Sweeper {
	/// Validate configuration and compile the immutable snapshot
	///
	/// Missing entry/destination roots, a malformed pattern, or a
	/// malformed pause window are fatal here; the loop never starts.
	pub fn new(config: SweepConfig) -> Result<Self> {
		config.validate()?;
		let patterns = PatternSet::compile(&config.patterns)?;
		let windows = pause::parse_windows(&config.pause_periods)?;

		let cycle = ScanCycle::new(
			PathBuf::from(&config.entry_directory),
			PathBuf::from(&config.dest_directory),
			config.recursive,
			config.dry_run,
		);
		let mover = FileMover::new(config.move_retry_count, config.retry_delay());

		Ok(Self {
			config,
			patterns,
			windows,
			mover,
			cycle,
		})
	}

	/// Run until the cancellation token fires
	///
	/// Cycle errors are logged and absorbed; nothing short of cancellation
	/// terminates the loop.
	pub async fn run(&self, cancel: CancellationToken) -> Result<()> {
		info!(
			"Sweeper started: entry={} dest={} patterns={} interval={}s",
			self.cycle.entry_root().display(),
			self.cycle.dest_root().display(),
			self.patterns.len(),
			self.config.interval_seconds
		);
		if let Some(first) = self.windows.first() {
			info!(
				"{} pause window(s) configured, first {}-{}",
				self.windows.len(),
				first.start.format("%H:%M"),
				first.end.format("%H:%M")
			);
		}

		loop {
			if cancel.is_cancelled() {
				break;
			}

			let now = Local::now().time();
			if pause::is_paused(now, &self.windows) {
				debug!("Inside a pause window, skipping this cycle");
			} else if let Err(e) = self.cycle.run(&self.patterns, &self.mover, &cancel).await {
				// The cycle aborted; the next interval tick tries again
				warn!("Scan cycle failed [{}]: {}", e.category(), e);
			}

			tokio::select! {
				_ = cancel.cancelled() => break,
				_ = tokio::time::sleep(self.config.interval()) => {}
			}
		}

		info!("Sweeper stopped");
		Ok(())
	}

	/// Spawn the loop on the current runtime and return a stop handle
	pub fn start(config: SweepConfig) -> Result<SweeperHandle> {
		let sweeper = Sweeper::new(config)?;
		let token = CancellationToken::new();
		let child = token.clone();
		let task = tokio::spawn(async move { sweeper.run(child).await });
		Ok(SweeperHandle { token, task })
	}
}

/// Handle to a spawned sweeper loop
pub struct SweeperHandle {
	token: CancellationToken,
	task: JoinHandle<Result<()>>,
}

impl SweeperHandle {
	/// Signal cancellation and wait for the loop to finish
	pub async fn stop(self) -> Result<()> {
		self.token.cancel();
		match self.task.await {
			Ok(result) => result,
			Err(join_err) => {
				error!("Sweeper task did not shut down cleanly: {}", join_err);
				Err(SweepError::TaskPanicked(join_err.to_string()))
			}
		}
	}

	/// Token shared with the running loop, for hosts that wire their own
	/// shutdown signal
	pub fn cancellation_token(&self) -> CancellationToken {
		self.token.clone()
	}
}
