//! Orchestrator module for driving conversions end to end.
//!
//! One request runs as one sequential pipeline: resolve the input, build the
//! transcode command, invoke the engine, release any staged copy. Progress
//! milestones reach the caller through a channel; cleanup runs on every exit
//! path.

mod runner;
mod types;

pub use runner::ConversionOrchestrator;
pub use types::{
    ConversionError, ConversionPhase, ConversionProgress, ConversionRequest, ConversionResult,
};
