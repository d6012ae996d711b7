//! Malformed-JSON guard.
//!
//! Any request that declares a JSON content type and carries a body must parse
//! as a JSON object or array. Anything else is answered with
//! `400 {"success": false, "message": "malformed JSON"}` before routing, so
//! even unknown routes report the parse failure rather than a 404.
//! Bodies larger than [`MAX_JSON_BODY_BYTES`] get the same answer.
//! Bodies without a JSON content type are passed through untouched.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::errors::AppError;

/// Largest JSON body accepted (100 KiB).
pub const MAX_JSON_BODY_BYTES: usize = 100 * 1024;

/// `application/json` or any `application/*+json` media type.
pub fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Parse a non-empty body, rejecting top-level primitives.
pub fn parse_json_body(bytes: &[u8]) -> Result<Value, AppError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| AppError::MalformedJson(e.to_string()))?;

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        other => Err(AppError::MalformedJson(format!(
            "top-level JSON value must be an object or array, got {other}"
        ))),
    }
}

/// Middleware rejecting unparseable JSON bodies on every route.
///
/// # Example
/// ```ignore
/// let app = Router::new()
///     .route("/", post(handler))
///     .layer(axum::middleware::from_fn(reject_malformed_json));
/// ```
pub async fn reject_malformed_json(request: Request, next: Next) -> Response {
    if !has_json_content_type(request.headers()) {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    // Over-limit and truncated bodies are reported like any other parse failure
    let bytes: Bytes = match axum::body::to_bytes(body, MAX_JSON_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => return AppError::MalformedJson(e.to_string()).into_response(),
    };

    if !bytes.is_empty() {
        if let Err(error) = parse_json_body(&bytes) {
            return error.into_response();
        }
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
