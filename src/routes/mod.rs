//! Route definitions for the CodeScan API.

pub mod files;
pub mod health;
pub mod scan;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Largest accepted request body; snippets and survey files are small.
const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health/live", get(health::live))
        .route("/scan", post(scan::scan_code))
        .route("/upload_survey", post(files::upload_survey))
        .route("/save_file", post(files::save_file))
        .route(
            "/download_file/{file_type}/{file_name}",
            get(files::download_file),
        )
        .route(
            "/delete_file/{file_type}/{file_name}",
            get(files::delete_file),
        )
        .route("/list_files/{file_type}", get(files::list_files))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES)),
        )
        .with_state(state)
}
