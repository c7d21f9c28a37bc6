//! Daily pause windows
//!
//! A window whose start is later than its end spans midnight: 22:00-06:00
//! covers 22:00 through 23:59:59 and 00:00 through 06:00.

use crate::config::PausePeriod;
use crate::error::{Result, SweepError};
use chrono::NaiveTime;

/// One parsed pause window, both bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseWindow {
	pub start: NaiveTime,
	pub end: NaiveTime,
}

impl PauseWindow {
	/// Parse a window from `HH:MM` bounds
	pub fn parse(start: &str, end: &str) -> Result<Self> {
		Ok(Self {
			start: parse_time(start)?,
			end: parse_time(end)?,
		})
	}

	/// True if the given time-of-day falls inside this window
	pub fn contains(&self, now: NaiveTime) -> bool {
		if self.start <= self.end {
			self.start <= now && now <= self.end
		} else {
			// Wraps past midnight
			now >= self.start || now <= self.end
		}
	}
}

/// Parse all configured pause periods, failing on the first malformed one
pub fn parse_windows(periods: &[PausePeriod]) -> Result<Vec<PauseWindow>> {
	periods
		.iter()
		.map(|p| PauseWindow::parse(&p.start, &p.end))
		.collect()
}

/// True if any window contains the given time-of-day
///
/// Pure function of the clock and configuration; an empty window list
/// never pauses.
pub fn is_paused(now: NaiveTime, windows: &[PauseWindow]) -> bool {
	windows.iter().any(|w| w.contains(now))
}

fn parse_time(value: &str) -> Result<NaiveTime> {
	NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| SweepError::InvalidPauseWindow {
		value: value.to_string(),
		reason: e.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn t(value: &str) -> NaiveTime {
		NaiveTime::parse_from_str(value, "%H:%M").unwrap()
	}

	#[test]
	fn test_non_wrapping_window() {
		let window = PauseWindow::parse("08:00", "10:00").unwrap();
		assert!(window.contains(t("09:00")));
		assert!(!window.contains(t("07:59")));
		assert!(!window.contains(t("10:01")));
		// Both boundary instants are inside
		assert!(window.contains(t("08:00")));
		assert!(window.contains(t("10:00")));
	}

	#[test]
	fn test_wrapping_window() {
		let window = PauseWindow::parse("22:00", "06:00").unwrap();
		assert!(window.contains(t("23:30")));
		assert!(window.contains(t("02:00")));
		assert!(!window.contains(t("12:00")));
		assert!(window.contains(t("22:00")));
		assert!(window.contains(t("06:00")));
	}

	#[test]
	fn test_or_across_windows() {
		let windows = vec![
			PauseWindow::parse("08:00", "10:00").unwrap(),
			PauseWindow::parse("22:00", "06:00").unwrap(),
		];
		assert!(is_paused(t("09:00"), &windows));
		assert!(is_paused(t("23:00"), &windows));
		assert!(!is_paused(t("12:00"), &windows));
	}

	#[test]
	fn test_empty_windows_never_pause() {
		assert!(!is_paused(t("12:00"), &[]));
	}

	#[test]
	fn test_malformed_time_is_an_error() {
		assert!(PauseWindow::parse("8am", "10:00").is_err());
		assert!(PauseWindow::parse("08:00", "25:61").is_err());
	}

	#[test]
	fn test_parse_windows_from_config() {
		let periods = vec![PausePeriod {
			start: "22:00".to_string(),
			end: "06:00".to_string(),
		}];
		let windows = parse_windows(&periods).unwrap();
		assert_eq!(windows.len(), 1);
		assert!(windows[0].start > windows[0].end);
	}
}
