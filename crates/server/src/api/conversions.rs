//! Conversion API handlers.
//!
//! Submitting a conversion returns immediately with a job record; the
//! pipeline runs in a background task and the job is polled for progress.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use waveshift_core::{
    ConversionPhase, ConversionProgress, ConversionRequest, OutputFormat,
};

use crate::state::{AppState, ConversionJob};

/// Buffer size for per-job progress channels.
const PROGRESS_BUFFER_SIZE: usize = 16;

/// Request body for submitting a conversion
#[derive(Debug, Deserialize)]
pub struct CreateConversionBody {
    /// Input reference: absolute path, `content://` or `file://` URI
    pub input_reference: String,
    /// Target format
    pub output_format: OutputFormat,
    /// Output file name; derived from the input reference when absent
    pub output_name: Option<String>,
    /// Target bitrate, e.g. "192k"
    pub bitrate: Option<String>,
    /// Target sample rate in Hz
    pub sample_rate: Option<u32>,
    /// Number of audio channels
    pub channels: Option<u8>,
}

/// Response for listing conversions
#[derive(Debug, Serialize)]
pub struct ListConversionsResponse {
    pub conversions: Vec<ConversionJob>,
    pub total: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ConversionErrorResponse {
    pub error: String,
}

/// Submit a conversion; returns 202 with the job record
pub async fn create_conversion(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateConversionBody>,
) -> Result<(StatusCode, Json<ConversionJob>), (StatusCode, Json<ConversionErrorResponse>)> {
    if !body.output_format.is_supported_output() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ConversionErrorResponse {
                error: format!("unsupported output format: {}", body.output_format),
            }),
        ));
    }

    if let Err(e) = state.output_layout().ensure_dir().await {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ConversionErrorResponse {
                error: format!(
                    "failed to create output directory {}: {}",
                    state.output_layout().dir().display(),
                    e
                ),
            }),
        ));
    }

    let output_name = body
        .output_name
        .clone()
        .unwrap_or_else(|| derive_output_name(&body.input_reference));
    let output_path = state
        .output_layout()
        .path_for(&output_name, body.output_format);

    let mut request =
        ConversionRequest::new(&body.input_reference, &output_path, body.output_format);
    if let Some(bitrate) = body.bitrate {
        request.bitrate = bitrate;
    }
    if let Some(sample_rate) = body.sample_rate {
        request.sample_rate = sample_rate;
    }
    if let Some(channels) = body.channels {
        request.channels = channels;
    }

    let job = ConversionJob {
        id: Uuid::new_v4().to_string(),
        input_reference: request.input_reference.clone(),
        output_path,
        output_format: request.output_format,
        created_at: Utc::now(),
        progress: ConversionProgress {
            percent: 0,
            phase: ConversionPhase::Idle,
            error_message: None,
        },
        result: None,
    };
    state.insert_job(job.clone()).await;

    let (progress_tx, mut progress_rx) = mpsc::channel(PROGRESS_BUFFER_SIZE);

    // Forward progress updates into the job record until the sender drops.
    let forwarder_state = Arc::clone(&state);
    let forwarder_id = job.id.clone();
    tokio::spawn(async move {
        while let Some(progress) = progress_rx.recv().await {
            forwarder_state
                .update_progress(&forwarder_id, progress)
                .await;
        }
    });

    let job_state = Arc::clone(&state);
    let job_id = job.id.clone();
    tokio::spawn(async move {
        let outcome = job_state
            .orchestrator()
            .convert_with_progress(&request, progress_tx)
            .await;
        job_state.finish_job(&job_id, outcome).await;
    });

    Ok((StatusCode::ACCEPTED, Json(job)))
}

/// Get a conversion job by ID
pub async fn get_conversion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ConversionJob>, (StatusCode, Json<ConversionErrorResponse>)> {
    match state.get_job(&id).await {
        Some(job) => Ok(Json(job)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ConversionErrorResponse {
                error: format!("Conversion not found: {}", id),
            }),
        )),
    }
}

/// List all tracked conversion jobs, newest first
pub async fn list_conversions(
    State(state): State<Arc<AppState>>,
) -> Json<ListConversionsResponse> {
    let conversions = state.list_jobs().await;
    let total = conversions.len();
    Json(ListConversionsResponse { conversions, total })
}

/// Derives an output file name from an input reference: the last path
/// segment with any query or fragment stripped.
fn derive_output_name(reference: &str) -> String {
    let tail = reference.rsplit('/').next().unwrap_or(reference);
    let tail = tail.split(['?', '#']).next().unwrap_or(tail);
    if tail.is_empty() {
        "converted".to_string()
    } else {
        tail.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tempfile::TempDir;
    use tower::ServiceExt;
    use waveshift_core::{
        Config, ConversionOrchestrator, EngineConfig, FfmpegEngine, FsResolver, OutputLayout,
        TempFileJanitor,
    };

    fn test_state(dir: &TempDir) -> Arc<AppState> {
        let staging = dir.path().join("staging");
        let output = dir.path().join("Output");

        // Point the engine at a path that cannot exist; submission tests
        // never reach a real invocation.
        let engine = FfmpegEngine::new(EngineConfig::with_ffmpeg_path(
            dir.path().join("no-such-ffmpeg"),
        ));
        let orchestrator = ConversionOrchestrator::new(
            Arc::new(FsResolver::with_fs_provider(staging.clone())),
            Arc::new(engine),
            Arc::new(TempFileJanitor::with_default_retention(staging)),
        );

        Arc::new(AppState::new(
            Config::default(),
            Arc::new(orchestrator),
            OutputLayout::new(output),
        ))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_derive_output_name() {
        assert_eq!(derive_output_name("/music/song.wav"), "song.wav");
        assert_eq!(
            derive_output_name("content://media/audio/track.mp3?id=42"),
            "track.mp3"
        );
        assert_eq!(derive_output_name("/music/"), "converted");
        assert_eq!(derive_output_name("bare-name"), "bare-name");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let dir = TempDir::new().unwrap();
        let app = create_router(test_state(&dir));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_formats_endpoint_lists_accepted_outputs() {
        let dir = TempDir::new().unwrap();
        let app = create_router(test_state(&dir));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/formats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let outputs: Vec<&str> = json["outputs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(outputs, vec!["mp3", "wav", "aac", "m4a"]);
        assert!(json["inputs"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v == "wma"));
    }

    #[tokio::test]
    async fn test_unsupported_format_is_unprocessable() {
        let dir = TempDir::new().unwrap();
        let app = create_router(test_state(&dir));

        let response = app
            .oneshot(post_json(
                "/api/v1/conversions",
                r#"{"input_reference": "/music/song.wav", "output_format": "ogg"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("ogg"));
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let dir = TempDir::new().unwrap();
        let app = create_router(test_state(&dir));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/conversions/no-such-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_submission_is_accepted_and_job_reaches_error_state() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let app = create_router(Arc::clone(&state));

        // The input does not exist, so the job fails during resolution.
        let response = app
            .oneshot(post_json(
                "/api/v1/conversions",
                &format!(
                    r#"{{"input_reference": "{}", "output_format": "mp3"}}"#,
                    dir.path().join("missing.wav").display()
                ),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let json = body_json(response).await;
        let id = json["id"].as_str().unwrap().to_string();
        assert_eq!(json["progress"]["phase"], "idle");

        let mut phase = String::new();
        for _ in 0..100 {
            if let Some(job) = state.get_job(&id).await {
                if job.is_terminal() {
                    phase = serde_json::to_value(job.progress.phase)
                        .unwrap()
                        .as_str()
                        .unwrap()
                        .to_string();
                    break;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(phase, "error");

        let job = state.get_job(&id).await.unwrap();
        assert!(job.progress.error_message.is_some());
        assert!(job.result.is_none());
    }

    #[tokio::test]
    async fn test_output_path_derived_from_input_reference() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);
        let app = create_router(Arc::clone(&state));

        let response = app
            .oneshot(post_json(
                "/api/v1/conversions",
                r#"{"input_reference": "/music/live session.flac", "output_format": "m4a"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let json = body_json(response).await;
        let output_path = json["output_path"].as_str().unwrap();
        assert!(output_path.ends_with("live session.m4a"));
    }

    #[tokio::test]
    async fn test_list_conversions_returns_submitted_jobs() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let response = create_router(Arc::clone(&state))
            .oneshot(post_json(
                "/api/v1/conversions",
                r#"{"input_reference": "/music/a.wav", "output_format": "mp3"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let response = create_router(Arc::clone(&state))
            .oneshot(
                Request::builder()
                    .uri("/api/v1/conversions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["total"], 1);
        assert_eq!(json["conversions"][0]["output_format"], "mp3");
    }
}
