use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use waveshift_core::engine::{OutputFormat, SUPPORTED_INPUT_EXTENSIONS};
use waveshift_core::Config;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<Config> {
    Json(state.config().clone())
}

/// Accepted conversion targets and advisory input extensions.
#[derive(Serialize)]
pub struct FormatsResponse {
    pub outputs: Vec<&'static str>,
    pub inputs: Vec<&'static str>,
}

pub async fn list_formats() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        outputs: OutputFormat::SUPPORTED_OUTPUTS
            .iter()
            .map(|f| f.extension())
            .collect(),
        inputs: SUPPORTED_INPUT_EXTENSIONS.to_vec(),
    })
}

pub async fn metrics() -> String {
    crate::metrics::encode_metrics()
}
