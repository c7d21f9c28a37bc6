use std::path::Path;
use thiserror::Error;

/// Core sweeper error types
///
/// Covers configuration, pattern compilation, and cycle-level failures.
/// Per-file move failures use the dedicated [`MoveError`] taxonomy, which
/// is what the retry policy consults.
#[derive(Error, Debug)]
pub enum SweepError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid pattern '{pattern}': {reason}")]
	InvalidPattern { pattern: String, reason: String },

	#[error("Invalid pause window '{value}': {reason}")]
	InvalidPauseWindow { value: String, reason: String },

	#[error("Configuration error: {parameter} - {reason}")]
	ConfigurationError { parameter: String, reason: String },

	#[error("Scan failed under {path}: {cause}")]
	ScanFailed { path: String, cause: String },

	#[error("Background task terminated abnormally: {0}")]
	TaskPanicked(String),
}

impl SweepError {
	/// Check if this error leaves the loop in a state where the next
	/// interval tick can simply try again
	pub fn is_retryable(&self) -> bool {
		match self {
			SweepError::Io(_) | SweepError::ScanFailed { .. } => true,
			SweepError::Json(_)
			| SweepError::InvalidPattern { .. }
			| SweepError::InvalidPauseWindow { .. }
			| SweepError::ConfigurationError { .. }
			| SweepError::TaskPanicked(_) => false,
		}
	}

	/// Get error category for logging
	pub fn category(&self) -> &'static str {
		match self {
			SweepError::Io(_) => "io",
			SweepError::Json(_) => "serialization",
			SweepError::InvalidPattern { .. } => "pattern",
			SweepError::InvalidPauseWindow { .. } => "pause_window",
			SweepError::ConfigurationError { .. } => "configuration",
			SweepError::ScanFailed { .. } => "scan",
			SweepError::TaskPanicked(_) => "task",
		}
	}

	/// Create a configuration error
	pub fn configuration_error(parameter: &str, reason: &str) -> Self {
		SweepError::ConfigurationError {
			parameter: parameter.to_string(),
			reason: reason.to_string(),
		}
	}
}

/// Classified failure of a single move attempt
///
/// The distinction drives retry: only lock/sharing violations are worth
/// waiting out; permission problems and everything else fail the move on
/// the first attempt.
#[derive(Error, Debug)]
pub enum MoveError {
	#[error("file locked by another process: {path} - {cause}")]
	Locked { path: String, cause: String },

	#[error("permission denied: {operation} on {path} - {cause}")]
	PermissionDenied {
		operation: String,
		path: String,
		cause: String,
	},

	#[error("{operation} failed on {path}: {cause}")]
	Other {
		operation: String,
		path: String,
		cause: String,
	},
}

impl MoveError {
	/// Check if this error indicates the move should be retried
	pub fn is_retryable(&self) -> bool {
		matches!(self, MoveError::Locked { .. })
	}

	/// Get error category for logging
	pub fn category(&self) -> &'static str {
		match self {
			MoveError::Locked { .. } => "transient-lock",
			MoveError::PermissionDenied { .. } => "permission",
			MoveError::Other { .. } => "other",
		}
	}

	/// Classify an I/O error from a move step into the retry taxonomy
	pub fn classify(operation: &str, path: &Path, err: std::io::Error) -> Self {
		if is_lock_error(&err) {
			MoveError::Locked {
				path: path.display().to_string(),
				cause: err.to_string(),
			}
		} else if err.kind() == std::io::ErrorKind::PermissionDenied {
			MoveError::PermissionDenied {
				operation: operation.to_string(),
				path: path.display().to_string(),
				cause: err.to_string(),
			}
		} else {
			MoveError::Other {
				operation: operation.to_string(),
				path: path.display().to_string(),
				cause: err.to_string(),
			}
		}
	}
}

/// Whether an I/O error looks like another process holding the file
fn is_lock_error(err: &std::io::Error) -> bool {
	if matches!(
		err.kind(),
		std::io::ErrorKind::WouldBlock
			| std::io::ErrorKind::TimedOut
			| std::io::ErrorKind::Interrupted
	) {
		return true;
	}
	err.raw_os_error().is_some_and(is_lock_code)
}

// ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
#[cfg(windows)]
fn is_lock_code(code: i32) -> bool {
	matches!(code, 32 | 33)
}

// EAGAIN / EBUSY / ETXTBSY
#[cfg(unix)]
fn is_lock_code(code: i32) -> bool {
	matches!(code, 11 | 16 | 26)
}

#[cfg(not(any(unix, windows)))]
fn is_lock_code(_code: i32) -> bool {
	false
}

pub type Result<T> = std::result::Result<T, SweepError>;
