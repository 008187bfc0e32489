//! Machine-readable summary of one crawl run.

use crate::error::{Result, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Counters and outcome of a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique per run
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Listing pages fetched successfully
    pub pages_fetched: usize,
    /// Unique listings discovered this run
    pub discovered: usize,
    /// Listings skipped because their record was already complete
    pub skipped: usize,
    /// Listings an enrichment pass was attempted for
    pub attempted: usize,
    /// Passes that added contact data to the store
    pub enriched: usize,
    /// Detail pages that could not be fetched
    pub detail_failures: usize,
    /// Passes that panicked
    pub faulted: usize,
    /// Store size at the end of the run
    pub records_total: usize,
    /// Records with at least one contact channel
    pub records_actionable: usize,
    /// Set when the run was cut short by an interrupt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupted: Option<String>,
    /// Discovery failure that ended the scan, fatal only on the first page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_error: Option<String>,
}

impl RunSummary {
    /// Start a fresh summary stamped with the current time.
    pub fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            pages_fetched: 0,
            discovered: 0,
            skipped: 0,
            attempted: 0,
            enriched: 0,
            detail_failures: 0,
            faulted: 0,
            records_total: 0,
            records_actionable: 0,
            interrupted: None,
            discovery_error: None,
        }
    }

    /// Stamp the finish time.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Write the summary as pretty JSON, creating parent directories.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| StoreError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_summary() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("out").join("run_summary.json");

        let mut summary = RunSummary::start();
        summary.discovered = 3;
        summary.enriched = 2;
        summary.finish();
        summary.write_to_file(&path).expect("write summary");

        let contents = fs::read_to_string(&path).expect("read summary");
        let parsed: RunSummary = serde_json::from_str(&contents).expect("parse summary");
        assert_eq!(parsed, summary);
        assert!(!contents.contains("discovery_error"));
        assert!(contents.contains("\"pages_fetched\": 0"));
    }

    #[test]
    fn test_parse_summary_without_optional_fields() {
        let json = r#"{
            "run_id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "started_at": "2026-10-16T08:00:00Z",
            "finished_at": null,
            "pages_fetched": 1,
            "discovered": 4,
            "skipped": 1,
            "attempted": 3,
            "enriched": 2,
            "detail_failures": 1,
            "faulted": 0,
            "records_total": 40,
            "records_actionable": 31
        }"#;
        let parsed: RunSummary = serde_json::from_str(json).expect("parse summary");
        assert_eq!(parsed.records_actionable, 31);
        assert!(parsed.interrupted.is_none());
        assert!(parsed.discovery_error.is_none());
    }
}
