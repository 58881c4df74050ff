//! Error types for the engine module.

use std::path::PathBuf;
use thiserror::Error;

/// Faults that prevent an engine invocation from producing a status.
///
/// A transcode that runs to completion and fails is not an `EngineError`;
/// it comes back as a non-success [`super::EngineStatus`] with its log.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine binary not found.
    #[error("transcoding engine not found at path: {path}")]
    EngineNotFound { path: PathBuf },

    /// The invocation exceeded the configured timeout.
    #[error("transcode timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error while spawning or driving the engine process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
