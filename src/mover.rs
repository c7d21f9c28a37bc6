//! Per-file move with collision rename and lock tolerance

use crate::error::MoveError;
use crate::retry::RetryPolicy;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

/// Result of one move call, after retries
#[derive(Debug)]
pub enum MoveOutcome {
	/// The file landed at `dest`, which may differ from the requested
	/// destination if a collision rename occurred
	Moved {
		src: PathBuf,
		dest: PathBuf,
		attempts: u32,
	},
	Failed {
		src: PathBuf,
		dest: PathBuf,
		error: MoveError,
		attempts: u32,
	},
}

impl MoveOutcome {
	pub fn is_moved(&self) -> bool {
		matches!(self, MoveOutcome::Moved { .. })
	}
}

/// Moves single files, retrying transient lock failures
#[derive(Debug)]
pub struct FileMover {
	policy: RetryPolicy,
}

impl FileMover {
	pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
		Self {
			policy: RetryPolicy::new(max_attempts, retry_delay),
		}
	}

	/// Move `src` to `dest`, never overwriting an existing destination
	///
	/// Each attempt recomputes the collision-free destination, so a file
	/// that appeared at the target between attempts still cannot be
	/// clobbered.
	pub async fn move_file(
		&self, src: &Path, dest: &Path, cancel: &CancellationToken,
	) -> MoveOutcome {
		let (result, attempts) = self
			.policy
			.run(cancel, "move_file", || attempt_move(src, dest))
			.await;

		match result {
			Ok(final_dest) => MoveOutcome::Moved {
				src: src.to_path_buf(),
				dest: final_dest,
				attempts,
			},
			Err(error) => MoveOutcome::Failed {
				src: src.to_path_buf(),
				dest: dest.to_path_buf(),
				error,
				attempts,
			},
		}
	}
}

/// One move attempt: ensure parent, resolve collision, probe, rename
fn attempt_move(src: &Path, dest: &Path) -> std::result::Result<PathBuf, MoveError> {
	if let Some(parent) = dest.parent() {
		fs::create_dir_all(parent)
			.map_err(|e| MoveError::classify("create destination directory", parent, e))?;
	}

	// The exists check races with the rename below: a file created at
	// the target in that window gets replaced. Nothing else writes the
	// destination tree in this design, so the window stays theoretical.
	let target = if dest.exists() {
		let renamed = unique_destination(dest);
		debug!(
			"Destination {} exists, using {}",
			dest.display(),
			renamed.display()
		);
		renamed
	} else {
		dest.to_path_buf()
	};

	probe_source(src)?;

	match fs::rename(src, &target) {
		Ok(()) => Ok(target),
		Err(rename_err) if is_cross_device(&rename_err) => {
			warn!(
				"Rename {} -> {} crossed volumes, falling back to copy+remove",
				src.display(),
				target.display()
			);
			copy_and_remove(src, &target)
		}
		Err(rename_err) => Err(MoveError::classify("rename", src, rename_err)),
	}
}

/// Best-effort check that no writer holds the source open
///
/// On Windows the open requests exclusive sharing, so any other handle
/// on the file surfaces as a sharing violation here instead of mid-move.
/// Unix has no mandatory sharing, so a plain open is as far as the probe
/// can see there. The race with a writer opening the file between probe
/// and rename is accepted; the retry loop is the mitigation.
fn probe_source(src: &Path) -> std::result::Result<(), MoveError> {
	open_exclusive(src)
		.map(drop)
		.map_err(|e| MoveError::classify("probe", src, e))
}

#[cfg(windows)]
fn open_exclusive(src: &Path) -> std::io::Result<fs::File> {
	use std::os::windows::fs::OpenOptionsExt;
	// share_mode(0): fail if any other handle is open on the file
	fs::OpenOptions::new().read(true).share_mode(0).open(src)
}

#[cfg(not(windows))]
fn open_exclusive(src: &Path) -> std::io::Result<fs::File> {
	fs::OpenOptions::new().read(true).open(src)
}

/// Copy-then-delete fallback for cross-volume moves
///
/// The copy lands in a staging sibling first and is renamed into place
/// once complete, so a reader enumerating the destination never observes
/// a half-written file under the final name. The staging sibling shares
/// the target's directory, keeping that final rename on one volume.
fn copy_and_remove(src: &Path, target: &Path) -> std::result::Result<PathBuf, MoveError> {
	let staging = staging_path(target);
	if let Err(copy_err) = fs::copy(src, &staging) {
		let _ = fs::remove_file(&staging);
		return Err(MoveError::classify("copy", src, copy_err));
	}
	if let Err(rename_err) = fs::rename(&staging, target) {
		let _ = fs::remove_file(&staging);
		return Err(MoveError::classify("publish staged copy", target, rename_err));
	}
	fs::remove_file(src).map_err(|e| MoveError::classify("remove source", src, e))?;
	Ok(target.to_path_buf())
}

/// Staging sibling for an in-flight fallback copy
fn staging_path(target: &Path) -> PathBuf {
	let name = target
		.file_name()
		.and_then(|s| s.to_str())
		.unwrap_or("file");
	let id = Uuid::new_v4().simple().to_string();
	target.with_file_name(format!("{}.{}.part", name, &id[..8]))
}

// EXDEV / ERROR_NOT_SAME_DEVICE
#[cfg(unix)]
fn is_cross_device(err: &std::io::Error) -> bool {
	err.raw_os_error() == Some(18)
}

#[cfg(windows)]
fn is_cross_device(err: &std::io::Error) -> bool {
	err.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_err: &std::io::Error) -> bool {
	false
}

/// Derive a collision-free sibling of `candidate` with a random suffix
fn unique_destination(candidate: &Path) -> PathBuf {
	let stem = candidate
		.file_stem()
		.and_then(|s| s.to_str())
		.unwrap_or("file");
	let ext = candidate
		.extension()
		.and_then(|s| s.to_str())
		.map(|e| format!(".{e}"))
		.unwrap_or_default();

	let id = Uuid::new_v4().simple().to_string();
	let new_name = format!("{}-{}{}", stem, &id[..8], ext);
	candidate.with_file_name(new_name)
}
