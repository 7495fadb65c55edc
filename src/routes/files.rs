//! File-management endpoints around the upload folders.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::files;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
}

/// POST /upload_survey — store an uploaded CSV survey file.
pub async fn upload_survey(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("survey_file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();
        if file_name.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }
        if !file_name.ends_with(".csv") {
            return Err(AppError::Validation(
                "Only CSV files are allowed".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

        let stored = files::save(&state.config.survey_dir(), &file_name, &data).await?;
        return Ok(Json(UploadResponse {
            success: true,
            message: "Survey file uploaded successfully".to_string(),
            filename: stored,
        }));
    }

    Err(AppError::Validation("No file provided".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct SaveFileRequest {
    pub file_name: String,
    pub content: String,
    #[serde(default = "default_file_type")]
    pub file_type: String,
}

fn default_file_type() -> String {
    "source".to_string()
}

#[derive(Debug, Serialize)]
pub struct SaveFileResponse {
    pub success: bool,
    pub message: String,
    pub file_type: String,
    pub file_name: String,
}

/// POST /save_file — write editor contents into an upload folder.
pub async fn save_file(
    State(state): State<AppState>,
    Form(request): Form<SaveFileRequest>,
) -> Result<Json<SaveFileResponse>, AppError> {
    if request.file_name.is_empty() {
        return Err(AppError::Validation("File name is required".to_string()));
    }

    let dir = files::folder_for(&state.config, &request.file_type);
    let file_name = files::save(&dir, &request.file_name, request.content.as_bytes()).await?;

    Ok(Json(SaveFileResponse {
        success: true,
        message: "File saved successfully".to_string(),
        file_type: request.file_type,
        file_name,
    }))
}

/// GET /download_file/{file_type}/{file_name} — send a stored file back.
pub async fn download_file(
    State(state): State<AppState>,
    Path((file_type, file_name)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let dir = files::folder_for(&state.config, &file_type);
    let (name, bytes) = files::read(&dir, &file_name).await?;

    let headers = [
        (
            header::CONTENT_TYPE,
            "application/octet-stream".to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{name}\""),
        ),
    ];
    Ok((StatusCode::OK, headers, bytes).into_response())
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /delete_file/{file_type}/{file_name} — remove a stored file.
pub async fn delete_file(
    State(state): State<AppState>,
    Path((file_type, file_name)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>, AppError> {
    let dir = files::folder_for(&state.config, &file_type);
    files::delete(&dir, &file_name).await?;
    Ok(Json(DeleteResponse { success: true }))
}

#[derive(Debug, Serialize)]
pub struct ListFilesResponse {
    pub files: Vec<String>,
}

/// GET /list_files/{file_type} — list stored files in a folder.
pub async fn list_files(
    State(state): State<AppState>,
    Path(file_type): Path<String>,
) -> Result<Json<ListFilesResponse>, AppError> {
    let dir = files::folder_for(&state.config, &file_type);
    let files = files::list(&dir).await?;
    Ok(Json(ListFilesResponse { files }))
}
