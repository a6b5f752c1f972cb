//! Run summary returned by a successful pipeline run.

use crate::error::{Result, ResultExt};
use crate::types::{Category, CategoryCounts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Totals for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,
    /// Time from start until both tasks finished
    pub elapsed: Duration,
    /// Items pushed by the producer
    pub produced: u64,
    /// Items popped and classified by the consumer
    pub consumed: u64,
    /// Items written per category
    pub routed: CategoryCounts,
}

impl PipelineReport {
    /// True when every produced item was classified exactly once.
    pub fn is_complete(&self) -> bool {
        self.produced == self.consumed
    }

    pub fn routed_to(&self, category: Category) -> u64 {
        self.routed.get(category)
    }

    /// Write the report as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write summary {:?}", path))
    }

    /// Log a one-line-per-category summary.
    pub fn log(&self) {
        tracing::info!(
            "Classified {} of {} items in {:.3}s",
            self.consumed,
            self.produced,
            self.elapsed.as_secs_f64()
        );
        for (category, count) in self.routed.iter() {
            tracing::info!("  {:<8} {}", category.label(), count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NumClassError;

    fn sample() -> PipelineReport {
        let mut routed = CategoryCounts::new();
        routed.increment(Category::Even);
        routed.increment(Category::Square);
        PipelineReport {
            started_at: Utc::now(),
            elapsed: Duration::from_millis(12),
            produced: 1,
            consumed: 1,
            routed,
        }
    }

    #[test]
    fn test_report_completeness() {
        let mut report = sample();
        assert!(report.is_complete());
        report.consumed = 0;
        assert!(!report.is_complete());
        assert_eq!(report.routed_to(Category::Even), 1);
        assert_eq!(report.routed_to(Category::Odd), 0);
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let report = sample();
        report.write_json(&path).unwrap();

        let parsed: PipelineReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_write_json_failure_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("summary.json");

        let err = sample().write_json(&path).unwrap_err();
        assert!(matches!(err, NumClassError::WithContext { .. }));
        assert!(err.to_string().contains("Failed to write summary"));
    }
}
