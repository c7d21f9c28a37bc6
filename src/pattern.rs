//! Compiled file-name patterns
//!
//! Patterns use `*` as "zero or more characters"; every other character
//! matches literally and comparison is case-insensitive. A pattern matches
//! only against the entire base file name, never the full path.

use crate::error::{Result, SweepError};
use globset::{GlobBuilder, GlobMatcher};

/// A set of compiled patterns, matched with logical OR
#[derive(Debug)]
pub struct PatternSet {
	matchers: Vec<GlobMatcher>,
}

impl PatternSet {
	/// Compile the configured patterns once at startup
	///
	/// A malformed pattern is a fatal startup error, not a per-match one.
	pub fn compile(patterns: &[String]) -> Result<Self> {
		let mut matchers = Vec::with_capacity(patterns.len());

		for pattern in patterns {
			let glob = GlobBuilder::new(&wildcard_only(pattern))
				.case_insensitive(true)
				.build()
				.map_err(|e| SweepError::InvalidPattern {
					pattern: pattern.clone(),
					reason: e.to_string(),
				})?;
			matchers.push(glob.compile_matcher());
		}

		Ok(Self { matchers })
	}

	/// True if the base file name matches any compiled pattern
	pub fn matches(&self, file_name: &str) -> bool {
		self.matchers.iter().any(|m| m.is_match(file_name))
	}

	pub fn len(&self) -> usize {
		self.matchers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.matchers.is_empty()
	}
}

/// Escape glob metacharacters other than `*` so only `*` is a wildcard
fn wildcard_only(pattern: &str) -> String {
	pattern
		.split('*')
		.map(globset::escape)
		.collect::<Vec<_>>()
		.join("*")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn compile(patterns: &[&str]) -> PatternSet {
		let owned: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
		PatternSet::compile(&owned).unwrap()
	}

	#[test]
	fn test_wildcard_and_case() {
		let set = compile(&["*.ts"]);
		assert!(set.matches("a.ts"));
		assert!(set.matches("A.TS"));
		assert!(set.matches("some long recording.ts"));
		assert!(!set.matches("a.tsx"));
		assert!(!set.matches("a.ts.bak"));
	}

	#[test]
	fn test_anchored_to_whole_name() {
		let set = compile(&["rec*"]);
		assert!(set.matches("rec001.ts"));
		assert!(set.matches("rec"));
		assert!(!set.matches("old_rec001.ts"));
	}

	#[test]
	fn test_multiple_patterns_or() {
		let set = compile(&["*.ts", "*.mp4"]);
		assert!(set.matches("a.ts"));
		assert!(set.matches("b.MP4"));
		assert!(!set.matches("c.mkv"));
	}

	#[test]
	fn test_non_star_characters_are_literal() {
		// '?' and '[' are ordinary characters here, not glob syntax
		let set = compile(&["what?.ts"]);
		assert!(set.matches("what?.ts"));
		assert!(!set.matches("whatX.ts"));

		let set = compile(&["[draft]*"]);
		assert!(set.matches("[draft] notes.txt"));
		assert!(!set.matches("d notes.txt"));
	}

	#[test]
	fn test_empty_set_matches_nothing() {
		let set = compile(&[]);
		assert!(set.is_empty());
		assert!(!set.matches("a.ts"));
	}
}
