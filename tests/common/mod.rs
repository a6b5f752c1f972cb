//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use numclass_rs::Category;
use std::path::Path;
use std::time::Duration;

/// Upper bound for a pipeline run in tests before it counts as a hang
pub fn test_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Parse one `<category>.out` file back into integers
pub fn read_category(dir: &Path, category: Category) -> Vec<i64> {
    let content = std::fs::read_to_string(dir.join(category.file_name()))
        .unwrap_or_else(|e| panic!("missing {}: {}", category.file_name(), e));
    content
        .lines()
        .map(|line| line.parse().expect("sink wrote a non-integer line"))
        .collect()
}
