//! Scan endpoint.

use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::scan::{self, ScanResults};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub code: String,
    pub provider: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    pub results: ScanResults,
}

/// POST /scan — analyze a code snippet with the selected backend.
pub async fn scan_code(
    State(state): State<AppState>,
    Form(request): Form<ScanRequest>,
) -> Result<Json<ScanResponse>, AppError> {
    let results = scan::run(&state, &request.code, request.provider.as_deref()).await?;
    Ok(Json(ScanResponse {
        success: true,
        results,
    }))
}
