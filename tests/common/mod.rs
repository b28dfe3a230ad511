/*!
 * Common test utilities for the subtime test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;
use subtime::segmentation::SentenceUnit;

/// Two-block timing file used throughout the suite (4.0 seconds in total)
pub const TWO_BLOCK_SRT: &str = "1
00:00:01,000 --> 00:00:03,000
Hello everyone.

2
00:00:04,000 --> 00:00:06,000
See you soon.
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
"#;
    create_test_file(dir, filename, content)
}

/// Sentence units from literal texts, skipping blank ones
pub fn sentences(texts: &[&str]) -> Vec<SentenceUnit> {
    texts.iter().filter_map(|text| SentenceUnit::new(text)).collect()
}

/// All non-whitespace characters of a string, in order
pub fn non_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Route library log output through the test harness; safe to call repeatedly
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).filter_level(log::LevelFilter::Debug).try_init();
}
