//! Engine module for invoking the external transcoder.
//!
//! This module provides the `TranscodeEngine` trait, the pure command builder,
//! and the FFmpeg subprocess implementation.
//!
//! # Example
//!
//! ```ignore
//! use waveshift_core::engine::{build_transcode_command, FfmpegEngine, OutputFormat, TranscodeEngine};
//!
//! let engine = FfmpegEngine::with_defaults();
//! engine.validate().await?;
//!
//! let command = build_transcode_command(
//!     Path::new("/music/input.wav"),
//!     Path::new("/music/output.mp3"),
//!     OutputFormat::Mp3,
//!     "192k",
//!     44100,
//!     2,
//! );
//!
//! let run = engine.execute(&command).await?;
//! if !run.status.is_success() {
//!     eprintln!("transcode failed:\n{}", run.joined_log());
//! }
//! ```

mod command;
mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use command::build_transcode_command;
pub use config::EngineConfig;
pub use error::EngineError;
pub use ffmpeg::FfmpegEngine;
pub use traits::TranscodeEngine;
pub use types::{
    is_supported_input, EngineRun, EngineStatus, OutputFormat, TranscodeCommand,
    SUPPORTED_INPUT_EXTENSIONS,
};
