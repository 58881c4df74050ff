//! Temp file janitor implementation.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::metrics;
use crate::resolver::ResolvedInput;

use super::types::{StagedFileRecord, SweepReport};

/// Default retention window for staged files: 1 hour.
///
/// Must exceed the longest expected conversion so a concurrent sweep can
/// never delete an in-flight staged file.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(60 * 60);

/// Tracks and removes temporary files created by the resolver.
///
/// Per-request cleanup is best-effort: a failed deletion is logged and never
/// surfaced as the conversion's outcome. The orphan sweep catches anything
/// cleanup missed, e.g. after a crash mid-conversion.
pub struct TempFileJanitor {
    staging_dir: PathBuf,
    retention: Duration,
}

impl TempFileJanitor {
    /// Creates a janitor for `staging_dir` with the given retention window.
    pub fn new(staging_dir: PathBuf, retention: Duration) -> Self {
        Self {
            staging_dir,
            retention,
        }
    }

    /// Creates a janitor with the default 1-hour retention.
    pub fn with_default_retention(staging_dir: PathBuf) -> Self {
        Self::new(staging_dir, DEFAULT_RETENTION)
    }

    /// The staging directory this janitor watches.
    pub fn staging_dir(&self) -> &PathBuf {
        &self.staging_dir
    }

    /// Deletes the staged copy behind a resolved input, if there is one.
    ///
    /// Runs exactly once per request on every exit path. Deletion failure is
    /// a warning, not an error: it must never mask the conversion's outcome.
    pub async fn cleanup(&self, resolved: &ResolvedInput) {
        if !resolved.was_staged {
            return;
        }

        match fs::remove_file(&resolved.local_path).await {
            Ok(()) => {
                debug!(path = %resolved.local_path.display(), "Removed staged file");
            }
            Err(e) => {
                warn!(
                    path = %resolved.local_path.display(),
                    error = %e,
                    "Failed to remove staged file; orphan sweep will retry"
                );
            }
        }
    }

    /// Lists the files currently in the staging directory.
    pub async fn list_staged(&self) -> Result<Vec<StagedFileRecord>, std::io::Error> {
        let mut records = Vec::new();

        let mut entries = match fs::read_dir(&self.staging_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(e),
        };

        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            records.push(StagedFileRecord {
                path: entry.path(),
                created_at: DateTime::<Utc>::from(modified),
            });
        }

        Ok(records)
    }

    /// Best-effort deletion of staged files older than the retention window.
    ///
    /// Entries newer than the threshold are left untouched even if a previous
    /// process crashed mid-conversion; the grace period protects staged files
    /// belonging to in-flight conversions.
    pub async fn sweep_orphans(&self) -> SweepReport {
        let mut report = SweepReport::default();
        let threshold = Utc::now()
            - chrono::Duration::from_std(self.retention).unwrap_or(chrono::Duration::hours(1));

        let records = match self.list_staged().await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    staging_dir = %self.staging_dir.display(),
                    error = %e,
                    "Failed to list staging directory for sweep"
                );
                return report;
            }
        };

        for record in records {
            report.examined += 1;

            if record.created_at >= threshold {
                report.retained += 1;
                continue;
            }

            match fs::remove_file(&record.path).await {
                Ok(()) => {
                    debug!(path = %record.path.display(), "Swept orphaned staged file");
                    report.deleted += 1;
                }
                Err(e) => {
                    warn!(path = %record.path.display(), error = %e, "Failed to sweep orphan");
                    report.failed += 1;
                }
            }
        }

        if report.deleted > 0 || report.failed > 0 {
            info!(
                deleted = report.deleted,
                failed = report.failed,
                retained = report.retained,
                "Orphan sweep finished"
            );
        }
        metrics::SWEEP_DELETED.inc_by(report.deleted as u64);

        report
    }
}
