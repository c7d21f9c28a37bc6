//! One scan-match-move pass over the entry tree

use crate::error::{Result, SweepError};
use crate::mover::{FileMover, MoveOutcome};
use crate::pattern::PatternSet;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// One pass: enumerate, filter, sort, relocate
#[derive(Debug)]
pub struct ScanCycle {
	entry_root: PathBuf,
	dest_root: PathBuf,
	recursive: bool,
	dry_run: bool,
}

impl ScanCycle {
	pub fn new(entry_root: PathBuf, dest_root: PathBuf, recursive: bool, dry_run: bool) -> Self {
		Self {
			entry_root,
			dest_root,
			recursive,
			dry_run,
		}
	}

	/// Enumerate matching files under the entry root, sorted ascending by
	/// full path so every cycle processes files in the same order
	/// regardless of directory enumeration order
	pub fn discover(&self, patterns: &PatternSet) -> Result<Vec<PathBuf>> {
		let mut walker = WalkDir::new(&self.entry_root).min_depth(1);
		if !self.recursive {
			walker = walker.max_depth(1);
		}

		let mut found = Vec::new();
		for entry in walker {
			let entry = entry.map_err(|e| SweepError::ScanFailed {
				path: self.entry_root.display().to_string(),
				cause: e.to_string(),
			})?;
			if !entry.file_type().is_file() {
				continue;
			}
			let name = entry.file_name().to_string_lossy();
			if patterns.matches(&name) {
				found.push(entry.into_path());
			}
		}

		found.sort();
		Ok(found)
	}

	/// Run one cycle
	///
	/// A missing entry root makes this a warned no-op; an enumeration
	/// failure aborts the remainder of the cycle. A failure on one file is
	/// isolated and the cycle continues with the next.
	pub async fn run(
		&self, patterns: &PatternSet, mover: &FileMover, cancel: &CancellationToken,
	) -> Result<()> {
		if !self.entry_root.exists() {
			warn!(
				"Entry directory {} does not exist, skipping this cycle",
				self.entry_root.display()
			);
			return Ok(());
		}

		std::fs::create_dir_all(&self.dest_root)?;

		let files = self.discover(patterns)?;
		debug!("{} file(s) matched this cycle", files.len());

		for src in files {
			if cancel.is_cancelled() {
				debug!("Cycle interrupted by shutdown");
				return Ok(());
			}

			let relative = match src.strip_prefix(&self.entry_root) {
				Ok(rel) => rel,
				Err(_) => {
					// Enumeration only yields paths under the root; a
					// mismatch means the entry moved under our feet.
					warn!("Skipping {} (no longer under entry root)", src.display());
					continue;
				}
			};
			let dest = self.dest_root.join(relative);

			if self.dry_run {
				info!("Dry run: would move {} -> {}", src.display(), dest.display());
				continue;
			}

			match mover.move_file(&src, &dest, cancel).await {
				MoveOutcome::Moved { src, dest, attempts } => {
					if attempts > 1 {
						info!(
							"Moved {} -> {} (after {} attempts)",
							src.display(),
							dest.display(),
							attempts
						);
					} else {
						info!("Moved {} -> {}", src.display(), dest.display());
					}
				}
				MoveOutcome::Failed {
					src,
					dest,
					error,
					attempts,
				} => {
					warn!(
						"Failed to move {} -> {} after {} attempt(s) [{}]: {}",
						src.display(),
						dest.display(),
						attempts,
						error.category(),
						error
					);
				}
			}
		}

		Ok(())
	}

	pub fn entry_root(&self) -> &Path {
		&self.entry_root
	}

	pub fn dest_root(&self) -> &Path {
		&self.dest_root
	}
}
