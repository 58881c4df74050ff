//! Mock transcoding engine for testing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::engine::{EngineError, EngineRun, EngineStatus, TranscodeCommand, TranscodeEngine};

/// Mock implementation of the `TranscodeEngine` trait.
///
/// Provides controllable behavior for testing:
/// - Records executed commands for assertions
/// - Simulates success (writing the output file) or failure with a log
/// - Optional invocation fault (missing binary, timeout)
///
/// # Example
///
/// ```rust,ignore
/// use waveshift_core::testing::MockEngine;
///
/// let engine = MockEngine::new();
/// engine.set_failure(vec!["Unknown encoder 'x'".to_string()]).await;
///
/// // ... run a conversion ...
///
/// let commands = engine.recorded_commands().await;
/// assert_eq!(commands.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockEngine {
    /// Recorded commands, in execution order.
    commands: Arc<RwLock<Vec<TranscodeCommand>>>,
    /// When set, invocations report failure with these log lines.
    failure_log: Arc<RwLock<Option<Vec<String>>>>,
    /// If set, the next invocation fails with this fault instead of running.
    next_error: Arc<RwLock<Option<EngineError>>>,
    /// Whether successful invocations create the output file.
    write_output: Arc<RwLock<bool>>,
    /// Simulated invocation duration.
    duration: Arc<RwLock<Duration>>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    /// Creates a new mock engine that succeeds and writes output files.
    pub fn new() -> Self {
        Self {
            commands: Arc::new(RwLock::new(Vec::new())),
            failure_log: Arc::new(RwLock::new(None)),
            next_error: Arc::new(RwLock::new(None)),
            write_output: Arc::new(RwLock::new(true)),
            duration: Arc::new(RwLock::new(Duration::from_millis(0))),
        }
    }

    /// All commands executed so far.
    pub async fn recorded_commands(&self) -> Vec<TranscodeCommand> {
        self.commands.read().await.clone()
    }

    /// Makes every following invocation report failure with these log lines.
    pub async fn set_failure(&self, log: Vec<String>) {
        *self.failure_log.write().await = Some(log);
    }

    /// Restores the succeeding behavior.
    pub async fn clear_failure(&self) {
        *self.failure_log.write().await = None;
    }

    /// Makes the next invocation fail with an engine fault.
    pub async fn set_next_error(&self, error: EngineError) {
        *self.next_error.write().await = Some(error);
    }

    /// Controls whether successful invocations create the output file.
    pub async fn set_write_output(&self, write: bool) {
        *self.write_output.write().await = write;
    }

    /// Sets the simulated invocation duration.
    pub async fn set_duration(&self, duration: Duration) {
        *self.duration.write().await = duration;
    }

    /// The output path of a command: its final argument.
    fn output_path(command: &TranscodeCommand) -> Option<PathBuf> {
        command.args().last().map(PathBuf::from)
    }
}

#[async_trait]
impl TranscodeEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    async fn execute(&self, command: &TranscodeCommand) -> Result<EngineRun, EngineError> {
        self.commands.write().await.push(command.clone());

        let duration = *self.duration.read().await;
        if duration > Duration::ZERO {
            tokio::time::sleep(duration).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        if let Some(log) = self.failure_log.read().await.clone() {
            return Ok(EngineRun {
                status: EngineStatus::Failed { code: Some(1) },
                log,
            });
        }

        if *self.write_output.read().await {
            if let Some(output) = Self::output_path(command) {
                if let Some(parent) = output.parent() {
                    let _ = tokio::fs::create_dir_all(parent).await;
                }
                tokio::fs::write(&output, b"converted").await?;
            }
        }

        Ok(EngineRun {
            status: EngineStatus::Success,
            log: vec![],
        })
    }

    async fn validate(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_mock_engine_records_and_writes_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.mp3");
        let engine = MockEngine::new();

        let command = TranscodeCommand::new(vec![
            "-y".to_string(),
            output.to_string_lossy().to_string(),
        ]);
        let run = engine.execute(&command).await.unwrap();

        assert!(run.status.is_success());
        assert!(output.exists());
        assert_eq!(engine.recorded_commands().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_engine_failure_carries_log() {
        let engine = MockEngine::new();
        engine
            .set_failure(vec!["error line".to_string(), "another".to_string()])
            .await;

        let command = TranscodeCommand::new(vec!["/out.mp3".to_string()]);
        let run = engine.execute(&command).await.unwrap();

        assert!(!run.status.is_success());
        assert_eq!(run.joined_log(), "error line\nanother");
    }

    #[tokio::test]
    async fn test_mock_engine_next_error() {
        let engine = MockEngine::new();
        engine
            .set_next_error(EngineError::Timeout { timeout_secs: 5 })
            .await;

        let command = TranscodeCommand::new(vec!["/out.mp3".to_string()]);
        let err = engine.execute(&command).await.unwrap_err();
        assert!(matches!(err, EngineError::Timeout { .. }));
    }
}
