//! Transcode command construction.
//!
//! Pure functions: no I/O, no failure modes. Format validity is enforced by
//! the type system and the orchestrator before a request reaches this point.

use std::path::Path;

use super::types::{OutputFormat, TranscodeCommand};

/// Builds the argument list for one transcode invocation.
///
/// The argument order is fixed: input, codec, bitrate, sample rate, channel
/// count, overwrite flag, output. Identical inputs always yield an identical
/// argument sequence. Paths travel as single tokens, so spaces and shell
/// metacharacters in them are harmless.
pub fn build_transcode_command(
    input_path: &Path,
    output_path: &Path,
    format: OutputFormat,
    bitrate: &str,
    sample_rate: u32,
    channels: u8,
) -> TranscodeCommand {
    let args = vec![
        "-i".to_string(),
        input_path.to_string_lossy().to_string(),
        "-c:a".to_string(),
        format.codec().to_string(),
        "-b:a".to_string(),
        bitrate.to_string(),
        "-ar".to_string(),
        sample_rate.to_string(),
        "-ac".to_string(),
        channels.to_string(),
        "-y".to_string(), // Overwrite output
        output_path.to_string_lossy().to_string(),
    ];

    TranscodeCommand::new(args)
}
