//! Sweep configuration loaded from a JSON file
//!
//! The core treats the loaded configuration as an immutable snapshot for
//! the lifetime of the process; there is no hot-reload.

use crate::error::{Result, SweepError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration for the sweep loop
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SweepConfig {
	/// Root of the tree scanned for matching files
	pub entry_directory: String,

	/// Root of the tree files are moved into, mirroring relative paths
	pub dest_directory: String,

	/// Glob patterns matched against base file names (`*` wildcard,
	/// case-insensitive)
	pub patterns: Vec<String>,

	/// Seconds to sleep between scan cycles
	pub interval_seconds: u64,

	/// Whether to descend into subdirectories of the entry root
	pub recursive: bool,

	/// Total attempts per file when the file is locked
	pub move_retry_count: u32,

	/// Fixed delay between retry attempts
	pub move_retry_delay_ms: u64,

	/// Daily time-of-day windows during which scanning is suppressed
	pub pause_periods: Vec<PausePeriod>,

	/// Log what would move without touching files
	pub dry_run: bool,
}

/// One pause window as written in configuration, times in `HH:MM`
#[derive(Debug, Clone, Deserialize)]
pub struct PausePeriod {
	pub start: String,
	pub end: String,
}

impl Default for SweepConfig {
	fn default() -> Self {
		Self {
			entry_directory: String::new(),
			dest_directory: String::new(),
			patterns: vec!["*.ts".to_string()],
			interval_seconds: 60,
			recursive: true,
			move_retry_count: 1,
			move_retry_delay_ms: 1000,
			pause_periods: Vec::new(),
			dry_run: false,
		}
	}
}

impl SweepConfig {
	/// Load configuration from a JSON file
	pub fn from_file(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path)?;
		let config: SweepConfig = serde_json::from_str(&raw)?;
		Ok(config)
	}

	/// Validate configuration parameters
	///
	/// A missing entry or destination directory is a fatal startup
	/// condition; the loop must never begin scanning with either absent.
	pub fn validate(&self) -> Result<()> {
		if self.entry_directory.trim().is_empty() {
			return Err(SweepError::configuration_error(
				"entryDirectory",
				"must not be empty",
			));
		}

		if self.dest_directory.trim().is_empty() {
			return Err(SweepError::configuration_error(
				"destDirectory",
				"must not be empty",
			));
		}

		if self.interval_seconds == 0 {
			return Err(SweepError::configuration_error(
				"intervalSeconds",
				"must be greater than 0",
			));
		}

		if self.move_retry_count == 0 {
			return Err(SweepError::configuration_error(
				"moveRetryCount",
				"must be greater than 0",
			));
		}

		Ok(())
	}

	/// Sleep duration between scan cycles
	pub fn interval(&self) -> Duration {
		Duration::from_secs(self.interval_seconds)
	}

	/// Fixed delay between move retry attempts
	pub fn retry_delay(&self) -> Duration {
		Duration::from_millis(self.move_retry_delay_ms)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = SweepConfig::default();
		assert_eq!(config.patterns, vec!["*.ts".to_string()]);
		assert_eq!(config.interval_seconds, 60);
		assert!(config.recursive);
		assert_eq!(config.move_retry_count, 1);
		assert_eq!(config.move_retry_delay_ms, 1000);
		assert!(config.pause_periods.is_empty());
		assert!(!config.dry_run);
	}

	#[test]
	fn test_validation() {
		let mut config = SweepConfig::default();

		// Empty roots are fatal
		assert!(config.validate().is_err());

		config.entry_directory = "/entry".to_string();
		assert!(config.validate().is_err());

		config.dest_directory = "/dest".to_string();
		assert!(config.validate().is_ok());

		config.interval_seconds = 0;
		assert!(config.validate().is_err());
		config.interval_seconds = 60;

		config.move_retry_count = 0;
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_deserialize_partial_json() {
		let json = r#"{
			"entryDirectory": "/recordings/incoming",
			"destDirectory": "/recordings/done",
			"intervalSeconds": 30,
			"pausePeriods": [{ "start": "22:00", "end": "06:00" }]
		}"#;

		let config: SweepConfig = serde_json::from_str(json).unwrap();
		assert_eq!(config.entry_directory, "/recordings/incoming");
		assert_eq!(config.interval_seconds, 30);
		// Unspecified fields take defaults
		assert_eq!(config.patterns, vec!["*.ts".to_string()]);
		assert!(config.recursive);
		assert_eq!(config.pause_periods.len(), 1);
		assert_eq!(config.pause_periods[0].start, "22:00");
	}

	#[test]
	fn test_durations() {
		let config = SweepConfig::default();
		assert_eq!(config.interval(), Duration::from_secs(60));
		assert_eq!(config.retry_delay(), Duration::from_millis(1000));
	}
}
