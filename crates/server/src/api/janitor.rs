//! Janitor API handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use waveshift_core::{StagedFileRecord, SweepReport};

use crate::state::AppState;

/// Response for listing staged files
#[derive(Debug, Serialize)]
pub struct ListStagedResponse {
    pub staged: Vec<StagedFileRecord>,
    pub total: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct JanitorErrorResponse {
    pub error: String,
}

/// List the files currently in the staging directory
pub async fn list_staged(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListStagedResponse>, (StatusCode, Json<JanitorErrorResponse>)> {
    match state.janitor().list_staged().await {
        Ok(staged) => {
            let total = staged.len();
            Ok(Json(ListStagedResponse { staged, total }))
        }
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(JanitorErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// Trigger an orphan sweep and report what it did
pub async fn sweep(State(state): State<Arc<AppState>>) -> Json<SweepReport> {
    Json(state.janitor().sweep_orphans().await)
}
