use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use waveshift_core::{
    Config, ConversionError, ConversionOrchestrator, ConversionPhase, ConversionProgress,
    ConversionResult, FfmpegEngine, FsResolver, OutputFormat, OutputLayout, TempFileJanitor,
};

/// The concrete pipeline this server runs: filesystem resolver, ffmpeg engine.
pub type Orchestrator = ConversionOrchestrator<FsResolver, FfmpegEngine>;

/// One tracked conversion job.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionJob {
    pub id: String,
    pub input_reference: String,
    pub output_path: PathBuf,
    pub output_format: OutputFormat,
    pub created_at: DateTime<Utc>,
    pub progress: ConversionProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ConversionResult>,
}

impl ConversionJob {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.progress.phase,
            ConversionPhase::Completed | ConversionPhase::Error
        )
    }
}

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: Arc<Orchestrator>,
    output_layout: OutputLayout,
    jobs: RwLock<HashMap<String, ConversionJob>>,
}

impl AppState {
    pub fn new(config: Config, orchestrator: Arc<Orchestrator>, output_layout: OutputLayout) -> Self {
        Self {
            config,
            orchestrator,
            output_layout,
            jobs: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }

    pub fn janitor(&self) -> &Arc<TempFileJanitor> {
        self.orchestrator.janitor()
    }

    pub fn output_layout(&self) -> &OutputLayout {
        &self.output_layout
    }

    pub async fn insert_job(&self, job: ConversionJob) {
        self.jobs.write().await.insert(job.id.clone(), job);
    }

    /// Records a progress update for a job.
    ///
    /// Terminal jobs are never overwritten; a straggling update from the
    /// progress channel cannot resurrect a finished job.
    pub async fn update_progress(&self, id: &str, progress: ConversionProgress) {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(id) {
            if !job.is_terminal() {
                job.progress = progress;
            }
        }
    }

    /// Records a job's final outcome.
    pub async fn finish_job(&self, id: &str, outcome: Result<ConversionResult, ConversionError>) {
        let mut jobs = self.jobs.write().await;
        if let Some(job) = jobs.get_mut(id) {
            match outcome {
                Ok(result) => {
                    job.progress = ConversionProgress::completed();
                    job.result = Some(result);
                }
                Err(e) => {
                    job.progress = ConversionProgress::error(e.to_string());
                }
            }
        }
    }

    pub async fn get_job(&self, id: &str) -> Option<ConversionJob> {
        self.jobs.read().await.get(id).cloned()
    }

    /// All tracked jobs, newest first.
    pub async fn list_jobs(&self) -> Vec<ConversionJob> {
        let mut jobs: Vec<ConversionJob> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }
}
