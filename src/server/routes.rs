//! Request handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use super::AppState;
use crate::issue::{BatchReport, BatchSummary, FileUnit};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub files: Vec<FileUnit>,
    #[serde(default)]
    pub options: AnalysisOptions,
}

#[derive(Deserialize, Default)]
pub struct AnalysisOptions {
    /// Analysis types, e.g. `["bugs", "security"]`. Defaults to `["bugs"]`.
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
    #[serde(rename = "userPrompt", default)]
    pub user_prompt: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "faultline",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<BatchReport>, (StatusCode, Json<ErrorResponse>)> {
    if request.files.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "no files provided".to_string(),
            }),
        ));
    }

    let types = if request.options.types.is_empty() {
        vec!["bugs".to_string()]
    } else {
        request.options.types
    };

    info!(
        files = request.files.len(),
        types = %types.join(","),
        "analyze request"
    );

    let results = state
        .analyzer
        .analyze_files(
            &request.files,
            &types,
            request.options.user_prompt.as_deref(),
        )
        .await;

    let summary = BatchSummary::from_results(&results);
    Ok(Json(BatchReport { summary, results }))
}
