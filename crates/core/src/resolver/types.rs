//! Types for the resolver module.

use std::path::PathBuf;

/// A resolved input: a local path the engine can read for the whole
/// invocation.
///
/// Owned by the orchestrator for the lifetime of one conversion. When
/// `was_staged` is true the janitor must delete `local_path` after the engine
/// invocation completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    /// Readable local file path.
    pub local_path: PathBuf,
    /// Whether the path is a temporary staged copy.
    pub was_staged: bool,
}

impl ResolvedInput {
    /// An input that was already a readable local file.
    pub fn unstaged(local_path: PathBuf) -> Self {
        Self {
            local_path,
            was_staged: false,
        }
    }

    /// An input that was copied into the staging directory.
    pub fn staged(local_path: PathBuf) -> Self {
        Self {
            local_path,
            was_staged: true,
        }
    }
}

/// How an input reference is interpreted by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Absolute local filesystem path.
    LocalPath,
    /// Platform-mediated content handle (`content://`).
    ContentUri,
    /// File URI (`file://`).
    FileUri,
    /// Anything else; tried as a plain path as a last resort.
    Other,
}

impl ReferenceKind {
    /// Classifies a raw input reference.
    pub fn of(reference: &str) -> Self {
        if reference.starts_with("content://") {
            Self::ContentUri
        } else if reference.starts_with("file://") {
            Self::FileUri
        } else if reference.starts_with('/') {
            Self::LocalPath
        } else {
            Self::Other
        }
    }

    /// Whether the reference must be staged before the engine can read it.
    pub fn needs_staging(&self) -> bool {
        matches!(self, Self::ContentUri | Self::FileUri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_classification() {
        assert_eq!(ReferenceKind::of("/music/song.mp3"), ReferenceKind::LocalPath);
        assert_eq!(
            ReferenceKind::of("content://provider/audio/42"),
            ReferenceKind::ContentUri
        );
        assert_eq!(
            ReferenceKind::of("file:///music/song.mp3"),
            ReferenceKind::FileUri
        );
        assert_eq!(ReferenceKind::of("song.mp3"), ReferenceKind::Other);
        assert_eq!(ReferenceKind::of("http://host/x.mp3"), ReferenceKind::Other);
    }

    #[test]
    fn test_needs_staging() {
        assert!(ReferenceKind::ContentUri.needs_staging());
        assert!(ReferenceKind::FileUri.needs_staging());
        assert!(!ReferenceKind::LocalPath.needs_staging());
        assert!(!ReferenceKind::Other.needs_staging());
    }
}
