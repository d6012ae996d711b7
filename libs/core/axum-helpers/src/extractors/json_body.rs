//! Lenient JSON body extractor.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    errors::AppError,
    http::json_guard::{MAX_JSON_BODY_BYTES, has_json_content_type, parse_json_body},
};

/// JSON body extractor that never rejects a missing body.
///
/// - JSON content type with a body: parsed, malformed or oversized input is `400 "malformed JSON"`.
/// - No body, a non-JSON content type, or a top-level array: treated as `{}`.
///
/// Field-level checks are left to the handler, so the target type should be
/// tolerant (e.g. `Option<serde_json::Value>` fields).
///
/// # Example
/// ```ignore
/// async fn create(JsonBody(input): JsonBody<CreateUserInput>) -> ApiResult<...> { ... }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::MalformedJson(rejection.body_text()))?;

        if is_json && bytes.len() > MAX_JSON_BODY_BYTES {
            return Err(AppError::MalformedJson(format!(
                "body of {} bytes exceeds the {MAX_JSON_BODY_BYTES} byte limit",
                bytes.len()
            )));
        }

        let value = if is_json && !bytes.is_empty() {
            match parse_json_body(&bytes)? {
                object @ Value::Object(_) => object,
                _ => Value::Object(Map::new()),
            }
        } else {
            Value::Object(Map::new())
        };

        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Input {
        #[serde(default)]
        name: Option<Value>,
    }

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<Input, AppError> {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        JsonBody::<Input>::from_request(req, &()).await.map(|b| b.0)
    }

    #[tokio::test]
    async fn test_parses_object() {
        let input = extract(Some("application/json"), r#"{"name":"abcd","extra":1}"#)
            .await
            .unwrap();
        assert_eq!(input.name, Some(Value::String("abcd".into())));
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_object() {
        let input = extract(Some("application/json"), "").await.unwrap();
        assert!(input.name.is_none());
    }

    #[tokio::test]
    async fn test_missing_content_type_ignores_body() {
        let input = extract(None, r#"{"name":"abcd"}"#).await.unwrap();
        assert!(input.name.is_none());
    }

    #[tokio::test]
    async fn test_array_body_has_no_fields() {
        let input = extract(Some("application/json"), "[1,2,3]").await.unwrap();
        assert!(input.name.is_none());
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let err = extract(Some("application/json"), "{\"name\":").await.unwrap_err();
        assert!(matches!(err, AppError::MalformedJson(_)));
    }

    #[tokio::test]
    async fn test_oversized_body_is_malformed() {
        let big: &'static str = Box::leak(
            format!("{{\"name\":\"{}\"}}", "x".repeat(MAX_JSON_BODY_BYTES)).into_boxed_str(),
        );
        let err = extract(Some("application/json"), big).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedJson(_)));
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_explicit_null_reads_as_none() {
        let input = extract(Some("application/json"), r#"{"name":null}"#)
            .await
            .unwrap();
        // `Option<Value>` with `default` maps null to None; callers that need
        // to tell null from absent use a custom deserializer.
        assert!(input.name.is_none());
    }
}
