//! FFmpeg-based engine implementation.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::EngineConfig;
use super::error::EngineError;
use super::traits::TranscodeEngine;
use super::types::{EngineRun, EngineStatus, TranscodeCommand};

/// FFmpeg subprocess engine.
pub struct FfmpegEngine {
    config: EngineConfig,
}

impl FfmpegEngine {
    /// Creates a new FFmpeg engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Creates an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Global arguments placed before the command's own tokens.
    fn global_args(&self) -> Vec<String> {
        let mut args = vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            self.config.log_level.clone(),
        ];
        args.extend(self.config.extra_args.iter().cloned());
        args
    }
}

#[async_trait]
impl TranscodeEngine for FfmpegEngine {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn execute(&self, command: &TranscodeCommand) -> Result<EngineRun, EngineError> {
        debug!(args = ?command.args(), "Spawning ffmpeg");

        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(self.global_args())
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EngineError::EngineNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    EngineError::Io(e)
                }
            })?;

        let stderr = child.stderr.take().ok_or_else(|| {
            EngineError::Io(std::io::Error::other("ffmpeg stderr was not captured"))
        })?;
        let mut reader = BufReader::new(stderr).lines();

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let result = timeout(timeout_duration, async {
            let mut log = Vec::new();
            while let Ok(Some(line)) = reader.next_line().await {
                log.push(line);
            }
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, log))
        })
        .await;

        match result {
            Ok(Ok((status, log))) => {
                let status = if status.success() {
                    EngineStatus::Success
                } else {
                    EngineStatus::Failed {
                        code: status.code(),
                    }
                };
                Ok(EngineRun { status, log })
            }
            Ok(Err(e)) => Err(EngineError::Io(e)),
            Err(_) => {
                // Kill the process on timeout
                let _ = child.kill().await;
                Err(EngineError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                })
            }
        }
    }

    async fn validate(&self) -> Result<(), EngineError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(EngineError::EngineNotFound {
                    path: self.config.ffmpeg_path.clone(),
                })
            }
            Err(e) => Err(EngineError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_global_args_include_log_level() {
        let engine = FfmpegEngine::with_defaults();
        let args = engine.global_args();
        assert!(args.contains(&"-loglevel".to_string()));
        assert!(args.contains(&"warning".to_string()));
    }

    #[test]
    fn test_global_args_include_extra_args() {
        let mut config = EngineConfig::default();
        config.extra_args = vec!["-nostdin".to_string()];
        let engine = FfmpegEngine::new(config);
        assert!(engine.global_args().contains(&"-nostdin".to_string()));
    }

    #[tokio::test]
    async fn test_missing_binary_is_engine_not_found() {
        let engine = FfmpegEngine::new(EngineConfig::with_ffmpeg_path(PathBuf::from(
            "/nonexistent/ffmpeg-binary",
        )));
        let err = engine.validate().await.unwrap_err();
        assert!(matches!(err, EngineError::EngineNotFound { .. }));

        let command = TranscodeCommand::new(vec!["-y".to_string()]);
        let err = engine.execute(&command).await.unwrap_err();
        assert!(matches!(err, EngineError::EngineNotFound { .. }));
    }
}
