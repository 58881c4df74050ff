//! Filesystem-backed input resolver.

use async_trait::async_trait;
use regex_lite::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::metrics;

use super::error::ResolverError;
use super::traits::{ContentProvider, InputResolver};
use super::types::{ReferenceKind, ResolvedInput};

/// Input resolver backed by the local filesystem and a content provider.
///
/// Resolution falls through three tiers:
/// 1. an absolute path that exists is returned unstaged;
/// 2. `content://` and `file://` references are copied into the staging
///    directory and returned staged;
/// 3. anything else is tried as a plain path, and `InputNotFound` otherwise.
///
/// The staging directory is explicit configuration; it is created lazily on
/// the first staging need and only ever emptied by the janitor.
pub struct FsResolver {
    staging_dir: PathBuf,
    provider: Arc<dyn ContentProvider>,
}

impl FsResolver {
    /// Creates a resolver staging into `staging_dir`, reading opaque handles
    /// through `provider`.
    pub fn new(staging_dir: PathBuf, provider: Arc<dyn ContentProvider>) -> Self {
        Self {
            staging_dir,
            provider,
        }
    }

    /// Creates a resolver with the plain filesystem content provider.
    pub fn with_fs_provider(staging_dir: PathBuf) -> Self {
        Self::new(staging_dir, Arc::new(FsContentProvider))
    }

    /// Derives a collision-free staged file name for a reference.
    ///
    /// Timestamp plus a random suffix: the timestamp keeps names sortable for
    /// the orphan sweep, the suffix closes the identical-millisecond gap
    /// between concurrent requests.
    fn staged_file_name(reference: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "staged_{}_{}{}",
            millis,
            &suffix[..8],
            sniff_extension(reference)
        )
    }

    async fn stage(&self, reference: &str) -> Result<ResolvedInput, ResolverError> {
        fs::create_dir_all(&self.staging_dir)
            .await
            .map_err(|e| ResolverError::staging_failed(reference, e))?;

        let staged_path = self.staging_dir.join(Self::staged_file_name(reference));

        let bytes = match self.provider.copy_to(reference, &staged_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                // An interrupted copy may have written part of the file;
                // remove it rather than waiting for the orphan sweep.
                let _ = fs::remove_file(&staged_path).await;
                return Err(ResolverError::staging_failed(reference, e));
            }
        };

        // Post-copy verification: the provider may have reported success
        // without producing a readable file.
        if !fs::try_exists(&staged_path).await.unwrap_or(false) {
            let _ = fs::remove_file(&staged_path).await;
            return Err(ResolverError::staging_failed(
                reference,
                std::io::Error::other("staged copy missing after write"),
            ));
        }

        info!(reference, staged_path = %staged_path.display(), bytes, "Staged input");
        metrics::STAGED_FILES.inc();

        Ok(ResolvedInput::staged(staged_path))
    }
}

#[async_trait]
impl InputResolver for FsResolver {
    fn name(&self) -> &str {
        "fs"
    }

    async fn resolve(&self, reference: &str) -> Result<ResolvedInput, ResolverError> {
        let kind = ReferenceKind::of(reference);
        debug!(reference, ?kind, "Resolving input reference");

        if kind == ReferenceKind::LocalPath {
            let path = Path::new(reference);
            if fs::try_exists(path).await.unwrap_or(false) {
                return Ok(ResolvedInput::unstaged(path.to_path_buf()));
            }
            return Err(ResolverError::input_not_found(reference));
        }

        if kind.needs_staging() {
            return self.stage(reference).await;
        }

        // Last resort: treat the reference as a plain path.
        let path = Path::new(reference);
        if fs::try_exists(path).await.unwrap_or(false) {
            return Ok(ResolvedInput::unstaged(path.to_path_buf()));
        }

        Err(ResolverError::input_not_found(reference))
    }
}

/// Extracts a file extension from a reference, with audio-friendly fallbacks.
fn sniff_extension(reference: &str) -> String {
    // Trailing ".ext", also matching before a query or fragment
    let re = Regex::new(r"\.([a-zA-Z0-9]+)([?#]|$)").expect("valid extension regex");
    if let Some(caps) = re.captures(reference) {
        if let Some(ext) = caps.get(1) {
            return format!(".{}", ext.as_str().to_lowercase());
        }
    }

    if reference.contains("audio") {
        ".mp3".to_string()
    } else {
        ".tmp".to_string()
    }
}

/// Content provider for references that are already filesystem-reachable.
///
/// Handles `file://` URIs and plain paths. Opaque `content://` handles need a
/// platform-mediated provider and are rejected here.
pub struct FsContentProvider;

#[async_trait]
impl ContentProvider for FsContentProvider {
    async fn copy_to(&self, reference: &str, dest: &Path) -> Result<u64, std::io::Error> {
        let source = match reference.strip_prefix("file://") {
            Some(path) => PathBuf::from(path),
            None if ReferenceKind::of(reference) == ReferenceKind::ContentUri => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    "content handles require a platform content provider",
                ));
            }
            None => PathBuf::from(reference),
        };

        fs::copy(&source, dest).await
    }
}
