//! Run report - a JSON summary written next to the result files

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::pipeline::SiftOutcome;
use crate::error::{DomainSiftError, Result};
use crate::types::FileItem;

/// Summary of one sift run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier
    pub run_id: String,
    /// exact, broad or brandables
    pub mode: String,
    /// Suffix splitter strategy used
    pub splitter: String,
    /// Scanned file names, in processing order
    pub files: Vec<String>,
    pub processed_files: usize,
    pub processed_records: u64,
    pub com_count: usize,
    pub others_count: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Build a report for a finished run
    pub fn new(
        mode: &str,
        splitter: &str,
        files: &[FileItem],
        outcome: &SiftOutcome,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            run_id: format!("sift_{}_{}", mode, started_at.format("%Y%m%d_%H%M%S")),
            mode: mode.to_string(),
            splitter: splitter.to_string(),
            files: files.iter().map(|f| f.name.clone()).collect(),
            processed_files: outcome.processed_files,
            processed_records: outcome.processed_records,
            com_count: outcome.results.com_count(),
            others_count: outcome.results.others_count(),
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Save report to file
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainSiftError::io(e.to_string(), Some(parent.to_string_lossy().to_string()))
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            DomainSiftError::internal(format!("Failed to serialize report: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            DomainSiftError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })
    }
}
