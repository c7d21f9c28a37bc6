//! Common test utilities for the dir-sweeper integration tests

#![allow(dead_code)]

use dir_sweeper::SweepConfig;
use std::path::Path;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn setup_temp_dir() -> TempDir {
	TempDir::new().expect("Failed to create temp directory")
}

/// Create a test file with content, including parent directories
pub fn create_test_file(path: &Path, content: &str) -> std::io::Result<()> {
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}

/// Config pointing at entry/dest subdirectories of a temp root, with a
/// short interval suitable for tests
pub fn test_config(root: &Path) -> SweepConfig {
	SweepConfig {
		entry_directory: root.join("entry").display().to_string(),
		dest_directory: root.join("dest").display().to_string(),
		interval_seconds: 1,
		move_retry_delay_ms: 10,
		..SweepConfig::default()
	}
}

/// Count regular files under a directory tree
pub fn count_files(root: &Path) -> usize {
	walkdir_count(root)
}

fn walkdir_count(root: &Path) -> usize {
	if !root.exists() {
		return 0;
	}
	let mut count = 0;
	let mut stack = vec![root.to_path_buf()];
	while let Some(dir) = stack.pop() {
		for entry in std::fs::read_dir(&dir).unwrap() {
			let entry = entry.unwrap();
			let path = entry.path();
			if path.is_dir() {
				stack.push(path);
			} else {
				count += 1;
			}
		}
	}
	count
}

/// Wait long enough for the sweep loop to complete at least one cycle
pub async fn wait_for_cycle() {
	tokio::time::sleep(std::time::Duration::from_millis(300)).await;
}
