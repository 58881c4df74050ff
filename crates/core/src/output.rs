//! Output directory layout.
//!
//! Converted files land in a fixed, well-known output directory, created on
//! demand. The shell derives destination paths here instead of inventing its
//! own naming.

use std::path::{Path, PathBuf};

use crate::engine::OutputFormat;

/// Fixed output directory with `<basename>.<extension>` naming.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    dir: PathBuf,
}

impl OutputLayout {
    /// Creates a layout rooted at `dir`.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the output directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), std::io::Error> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Derives the destination path for an input file name and target format:
    /// the input's base name with the format's extension.
    pub fn path_for(&self, input_name: &str, format: OutputFormat) -> PathBuf {
        let base = match input_name.rsplit_once('.') {
            Some((base, _)) if !base.is_empty() => base,
            _ => input_name,
        };
        self.dir.join(format!("{}.{}", base, format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_for_replaces_extension() {
        let layout = OutputLayout::new(PathBuf::from("/out"));
        assert_eq!(
            layout.path_for("song.wav", OutputFormat::Mp3),
            PathBuf::from("/out/song.mp3")
        );
        assert_eq!(
            layout.path_for("my favorite.track.flac", OutputFormat::M4a),
            PathBuf::from("/out/my favorite.track.m4a")
        );
    }

    #[test]
    fn test_path_for_without_extension() {
        let layout = OutputLayout::new(PathBuf::from("/out"));
        assert_eq!(
            layout.path_for("recording", OutputFormat::Wav),
            PathBuf::from("/out/recording.wav")
        );
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let layout = OutputLayout::new(dir.path().join("Output"));
        layout.ensure_dir().await.unwrap();
        layout.ensure_dir().await.unwrap();
        assert!(layout.dir().is_dir());
    }
}
