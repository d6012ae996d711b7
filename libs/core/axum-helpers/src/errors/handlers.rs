use axum::response::{IntoResponse, Response};

use super::AppError;

/// Fallback for unknown paths and for known paths hit with an unsupported
/// method. Both are reported as 404 so clients see a single "not found" shape.
pub async fn not_found() -> Response {
    AppError::not_found().into_response()
}
