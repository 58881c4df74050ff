//! Types for the engine module.

use serde::{Deserialize, Serialize};

/// Target audio format for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// MPEG Audio Layer III
    Mp3,
    /// WAVE (uncompressed PCM)
    Wav,
    /// Advanced Audio Coding
    Aac,
    /// AAC in an MPEG-4 container
    M4a,
    /// Ogg Vorbis (codec mapping kept, not accepted as an output choice)
    Ogg,
    /// Free Lossless Audio Codec (codec mapping kept, not accepted as an output choice)
    Flac,
}

impl OutputFormat {
    /// Formats accepted as conversion targets.
    pub const SUPPORTED_OUTPUTS: &'static [OutputFormat] = &[
        OutputFormat::Mp3,
        OutputFormat::Wav,
        OutputFormat::Aac,
        OutputFormat::M4a,
    ];

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Aac => "aac",
            Self::M4a => "m4a",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
        }
    }

    /// Returns the ffmpeg codec name for this format.
    pub fn codec(&self) -> &'static str {
        match self {
            Self::Mp3 => "libmp3lame",
            Self::Wav => "pcm_s16le",
            Self::Aac | Self::M4a => "aac",
            Self::Ogg => "libvorbis",
            Self::Flac => "flac",
        }
    }

    /// Whether this format can be requested as a conversion target.
    ///
    /// Ogg and FLAC keep their codec mapping for forward compatibility but
    /// are rejected before a request reaches the command builder.
    pub fn is_supported_output(&self) -> bool {
        Self::SUPPORTED_OUTPUTS.contains(self)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// File extensions accepted as conversion inputs.
///
/// Advisory only (for UI filtering); the core never rejects an input based
/// on its extension.
pub const SUPPORTED_INPUT_EXTENSIONS: &[&str] =
    &["mp3", "wav", "flac", "ogg", "aac", "m4a", "wma"];

/// Whether a file name carries one of the advisory input extensions.
pub fn is_supported_input(file_name: &str) -> bool {
    file_name
        .rsplit('.')
        .next()
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_INPUT_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// An ordered argument list for the external transcoding engine.
///
/// Arguments are discrete tokens handed to the process spawner as-is; they
/// are never joined into a single shell string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeCommand {
    args: Vec<String>,
}

impl TranscodeCommand {
    /// Creates a command from an ordered argument list.
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    /// The argument tokens, in invocation order.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Exit classification of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineStatus {
    /// The engine reported success.
    Success,
    /// The engine reported failure, with its exit code when available.
    Failed { code: Option<i32> },
}

impl EngineStatus {
    /// Whether the invocation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Outcome of one engine invocation: status plus diagnostic log lines.
#[derive(Debug, Clone)]
pub struct EngineRun {
    /// Exit classification.
    pub status: EngineStatus,
    /// Diagnostic log lines emitted by the engine, in order.
    pub log: Vec<String>,
}

impl EngineRun {
    /// Joins the diagnostic log lines into a single newline-separated string.
    pub fn joined_log(&self) -> String {
        self.log.join("\n")
    }
}
