//! Trait definitions for the engine module.

use async_trait::async_trait;

use super::error::EngineError;
use super::types::{EngineRun, TranscodeCommand};

/// A transcoding engine that can execute a command and report status + logs.
///
/// The engine is an opaque collaborator: the core hands it an ordered argument
/// list and consumes an exit classification plus diagnostic log lines. Nothing
/// else is assumed about its internals.
#[async_trait]
pub trait TranscodeEngine: Send + Sync {
    /// Returns the name of this engine implementation.
    fn name(&self) -> &str;

    /// Executes the command and waits for completion.
    ///
    /// A transcode that runs and fails comes back as `Ok` with a non-success
    /// status; `Err` is reserved for faults that prevented the invocation
    /// itself (missing binary, timeout, I/O).
    async fn execute(&self, command: &TranscodeCommand) -> Result<EngineRun, EngineError>;

    /// Validates that the engine is properly configured and ready.
    async fn validate(&self) -> Result<(), EngineError>;
}
