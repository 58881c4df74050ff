//! Types for the janitor module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file sitting in the staging directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedFileRecord {
    /// Path of the staged file.
    pub path: PathBuf,
    /// Modification time, used to identify orphans.
    pub created_at: DateTime<Utc>,
}

/// Outcome of one orphan sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepReport {
    /// Entries examined in the staging directory.
    pub examined: usize,
    /// Orphans deleted.
    pub deleted: usize,
    /// Entries that could not be deleted (logged, never escalated).
    pub failed: usize,
    /// Entries younger than the retention window, left untouched.
    pub retained: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_report_serialization() {
        let report = SweepReport {
            examined: 4,
            deleted: 2,
            failed: 0,
            retained: 2,
        };
        let json = serde_json::to_string(&report).unwrap();
        let parsed: SweepReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.deleted, 2);
        assert_eq!(parsed.retained, 2);
    }
}
