//! Conversion orchestrator implementation.
//!
//! Drives one request through the pipeline:
//! Idle -> Resolving -> Building -> Converting -> {Completed | Failed}.
//! No transition skips a state; terminal states hold nothing across requests
//! beyond the staging directory the janitor sweeps.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::{build_transcode_command, EngineRun, TranscodeEngine};
use crate::janitor::TempFileJanitor;
use crate::metrics;
use crate::resolver::{InputResolver, ResolvedInput};

use super::types::{ConversionError, ConversionProgress, ConversionRequest, ConversionResult};

/// Percent reported by the early heartbeat before the engine starts.
///
/// The engine exposes no fine-grained percentage, so this is the only
/// intermediate value the caller is guaranteed to see.
const HEARTBEAT_PERCENT: u8 = 10;

/// Composes resolver, command builder, engine and janitor into one pipeline.
pub struct ConversionOrchestrator<R, E>
where
    R: InputResolver,
    E: TranscodeEngine,
{
    resolver: Arc<R>,
    engine: Arc<E>,
    janitor: Arc<TempFileJanitor>,
}

impl<R, E> ConversionOrchestrator<R, E>
where
    R: InputResolver,
    E: TranscodeEngine,
{
    /// Creates a new orchestrator.
    pub fn new(resolver: Arc<R>, engine: Arc<E>, janitor: Arc<TempFileJanitor>) -> Self {
        Self {
            resolver,
            engine,
            janitor,
        }
    }

    /// The janitor owning this orchestrator's staging directory.
    pub fn janitor(&self) -> &Arc<TempFileJanitor> {
        &self.janitor
    }

    /// Converts without progress reporting.
    pub async fn convert(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        self.run(request, None).await
    }

    /// Converts with progress reporting.
    ///
    /// Updates are delivered with a non-blocking send; a slow or dropped
    /// receiver never aborts the conversion.
    pub async fn convert_with_progress(
        &self,
        request: &ConversionRequest,
        progress_tx: mpsc::Sender<ConversionProgress>,
    ) -> Result<ConversionResult, ConversionError> {
        self.run(request, Some(&progress_tx)).await
    }

    async fn run(
        &self,
        request: &ConversionRequest,
        progress_tx: Option<&mpsc::Sender<ConversionProgress>>,
    ) -> Result<ConversionResult, ConversionError> {
        let start = Instant::now();

        // Enforced output formats; the codec map knows more than we accept.
        if !request.output_format.is_supported_output() {
            let err = ConversionError::UnsupportedOutputFormat {
                format: request.output_format,
            };
            return Err(self.fail(err, progress_tx));
        }

        // Resolving
        debug!(reference = %request.input_reference, "Resolving input");
        let resolved = match self.resolver.resolve(&request.input_reference).await {
            Ok(resolved) => resolved,
            Err(e) => return Err(self.fail(e.into(), progress_tx)),
        };

        // Building
        if let Err(e) = self.ensure_output_dir(request).await {
            self.janitor.cleanup(&resolved).await;
            return Err(self.fail(e, progress_tx));
        }

        let command = build_transcode_command(
            &resolved.local_path,
            &request.output_path,
            request.output_format,
            &request.bitrate,
            request.sample_rate,
            request.channels,
        );

        // Converting: early heartbeat so the caller's UI does not appear
        // frozen before real work starts.
        emit(progress_tx, ConversionProgress::converting(HEARTBEAT_PERCENT));
        let run_result = self.engine.execute(&command).await;

        // The staged copy is released on every exit path from here on.
        self.janitor.cleanup(&resolved).await;

        let run = match run_result {
            Ok(run) => run,
            Err(e) => return Err(self.fail(e.into(), progress_tx)),
        };

        if !run.status.is_success() {
            let diagnostic_log = run.joined_log();
            warn!(
                reference = %request.input_reference,
                "Engine reported failure:\n{diagnostic_log}"
            );
            return Err(self.fail(
                ConversionError::EngineInvocationFailed { diagnostic_log },
                progress_tx,
            ));
        }

        self.finish(request, &resolved, run, start, progress_tx)
            .await
    }

    async fn finish(
        &self,
        request: &ConversionRequest,
        resolved: &ResolvedInput,
        run: EngineRun,
        start: Instant,
        progress_tx: Option<&mpsc::Sender<ConversionProgress>>,
    ) -> Result<ConversionResult, ConversionError> {
        // A zero exit status with no output file is still a failed transcode.
        let output_meta = match tokio::fs::metadata(&request.output_path).await {
            Ok(meta) => meta,
            Err(_) => {
                let mut diagnostic_log = run.joined_log();
                if diagnostic_log.is_empty() {
                    diagnostic_log = "output file not created".to_string();
                }
                return Err(self.fail(
                    ConversionError::EngineInvocationFailed { diagnostic_log },
                    progress_tx,
                ));
            }
        };

        let duration = start.elapsed();
        emit(progress_tx, ConversionProgress::completed());
        metrics::CONVERSIONS.with_label_values(&["success"]).inc();
        metrics::CONVERSION_DURATION.observe(duration.as_secs_f64());

        info!(
            output = %request.output_path.display(),
            size_bytes = output_meta.len(),
            duration_ms = duration.as_millis() as u64,
            staged = resolved.was_staged,
            "Conversion completed"
        );

        Ok(ConversionResult {
            output_path: request.output_path.clone(),
            output_size_bytes: output_meta.len(),
            duration_ms: duration.as_millis() as u64,
        })
    }

    async fn ensure_output_dir(&self, request: &ConversionRequest) -> Result<(), ConversionError> {
        if let Some(parent) = request.output_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|_| {
                ConversionError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                }
            })?;
        }
        Ok(())
    }

    /// Reports a terminal failure exactly once: error-phase progress, metrics,
    /// and the error for the caller.
    fn fail(
        &self,
        err: ConversionError,
        progress_tx: Option<&mpsc::Sender<ConversionProgress>>,
    ) -> ConversionError {
        emit(progress_tx, ConversionProgress::error(err.to_string()));
        metrics::CONVERSIONS.with_label_values(&["failed"]).inc();
        err
    }
}

/// Non-blocking progress delivery; callback failures never abort the
/// conversion.
fn emit(progress_tx: Option<&mpsc::Sender<ConversionProgress>>, progress: ConversionProgress) {
    if let Some(tx) = progress_tx {
        let _ = tx.try_send(progress);
    }
}
