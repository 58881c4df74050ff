//! Types for the conversion orchestrator.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::engine::{EngineError, OutputFormat};
use crate::resolver::ResolverError;

/// A request to convert one audio file.
///
/// Immutable once submitted; the orchestrator never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Input reference: absolute path, `content://` or `file://` URI.
    pub input_reference: String,
    /// Desired output file path.
    pub output_path: PathBuf,
    /// Target format.
    pub output_format: OutputFormat,
    /// Target bitrate, e.g. "192k".
    #[serde(default = "default_bitrate")]
    pub bitrate: String,
    /// Target sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Number of audio channels (1 = mono, 2 = stereo).
    #[serde(default = "default_channels")]
    pub channels: u8,
}

fn default_bitrate() -> String {
    "192k".to_string()
}

fn default_sample_rate() -> u32 {
    44100
}

fn default_channels() -> u8 {
    2
}

impl ConversionRequest {
    /// Creates a request with default bitrate, sample rate and channels.
    pub fn new(
        input_reference: impl Into<String>,
        output_path: impl Into<PathBuf>,
        output_format: OutputFormat,
    ) -> Self {
        Self {
            input_reference: input_reference.into(),
            output_path: output_path.into(),
            output_format,
            bitrate: default_bitrate(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
        }
    }
}

/// Phase of a conversion as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionPhase {
    /// Not started.
    Idle,
    /// Engine invocation in flight.
    Converting,
    /// Finished successfully.
    Completed,
    /// Terminal failure.
    Error,
}

/// Progress update emitted zero or more times per request.
///
/// Percentages are monotonically non-decreasing within one request, except
/// the transition to `error` which resets to 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionProgress {
    /// Progress percentage (0-100).
    pub percent: u8,
    /// Current phase.
    pub phase: ConversionPhase,
    /// Error message, set only in the `error` phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ConversionProgress {
    /// The early heartbeat emitted before the engine starts.
    pub fn converting(percent: u8) -> Self {
        Self {
            percent,
            phase: ConversionPhase::Converting,
            error_message: None,
        }
    }

    /// Terminal success.
    pub fn completed() -> Self {
        Self {
            percent: 100,
            phase: ConversionPhase::Completed,
            error_message: None,
        }
    }

    /// Terminal failure with a message for the caller.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            percent: 0,
            phase: ConversionPhase::Error,
            error_message: Some(message.into()),
        }
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Output file path (equals the request's `output_path`).
    pub output_path: PathBuf,
    /// Output file size in bytes.
    pub output_size_bytes: u64,
    /// Wall-clock conversion duration in milliseconds.
    pub duration_ms: u64,
}

/// Terminal errors surfaced to the caller.
///
/// Janitor failures are deliberately absent: a failed temp-file deletion is
/// logged at the janitor boundary and never reported as the request's outcome.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The input reference does not resolve to readable bytes.
    #[error("input not found or inaccessible: {reference}")]
    InputNotFound { reference: String },

    /// Copying the input to the staging area failed.
    #[error("failed to stage input {reference}: {source}")]
    StagingFailed {
        reference: String,
        #[source]
        source: std::io::Error,
    },

    /// The requested format is not an accepted conversion target.
    #[error("unsupported output format: {format}")]
    UnsupportedOutputFormat { format: OutputFormat },

    /// The output directory could not be created.
    #[error("failed to create output directory: {path}")]
    OutputDirectoryFailed { path: PathBuf },

    /// The engine reported a non-success status (or could not be invoked);
    /// carries the engine's newline-joined diagnostic log.
    #[error("conversion failed: {diagnostic_log}")]
    EngineInvocationFailed { diagnostic_log: String },
}

impl From<ResolverError> for ConversionError {
    fn from(err: ResolverError) -> Self {
        match err {
            ResolverError::InputNotFound { reference } => Self::InputNotFound { reference },
            ResolverError::StagingFailed { reference, source } => {
                Self::StagingFailed { reference, source }
            }
        }
    }
}

impl From<EngineError> for ConversionError {
    fn from(err: EngineError) -> Self {
        Self::EngineInvocationFailed {
            diagnostic_log: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: ConversionRequest = serde_json::from_str(
            r#"{
                "input_reference": "/tmp/song.wav",
                "output_path": "/out/song.mp3",
                "output_format": "mp3"
            }"#,
        )
        .unwrap();

        assert_eq!(request.bitrate, "192k");
        assert_eq!(request.sample_rate, 44100);
        assert_eq!(request.channels, 2);
    }

    #[test]
    fn test_progress_constructors() {
        let progress = ConversionProgress::converting(10);
        assert_eq!(progress.percent, 10);
        assert_eq!(progress.phase, ConversionPhase::Converting);
        assert!(progress.error_message.is_none());

        let progress = ConversionProgress::completed();
        assert_eq!(progress.percent, 100);

        let progress = ConversionProgress::error("boom");
        assert_eq!(progress.percent, 0);
        assert_eq!(progress.phase, ConversionPhase::Error);
        assert_eq!(progress.error_message.as_deref(), Some("boom"));
    }

    #[test]
    fn test_error_conversion_from_resolver() {
        let err: ConversionError = ResolverError::input_not_found("content://x").into();
        assert!(matches!(err, ConversionError::InputNotFound { .. }));

        let err: ConversionError =
            ResolverError::staging_failed("content://x", std::io::Error::other("copy failed"))
                .into();
        assert!(matches!(err, ConversionError::StagingFailed { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = ConversionError::UnsupportedOutputFormat {
            format: OutputFormat::Ogg,
        };
        assert_eq!(err.to_string(), "unsupported output format: ogg");
    }

    #[test]
    fn test_phase_serde_names() {
        assert_eq!(
            serde_json::to_string(&ConversionPhase::Converting).unwrap(),
            "\"converting\""
        );
        assert_eq!(
            serde_json::to_string(&ConversionPhase::Error).unwrap(),
            "\"error\""
        );
    }
}
