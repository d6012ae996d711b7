//! Success envelope shared by every endpoint.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{ "success": true, "message": "", "result": ... }`
///
/// `result` is omitted entirely for operations that return no payload
/// (e.g. delete). Failures use [`ErrorResponse`](crate::ErrorResponse), which
/// shares the `success`/`message` fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Always empty on success
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(result: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            result: Some(result),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn empty() -> Self {
        Self {
            success: true,
            message: String::new(),
            result: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(body, json!({ "success": true, "message": "", "result": [1, 2] }));
    }

    #[test]
    fn test_empty_envelope_omits_result() {
        let body = serde_json::to_value(ApiResponse::empty()).unwrap();
        assert_eq!(body, json!({ "success": true, "message": "" }));
    }

    #[test]
    fn test_envelope_deserializes_payload_without_default() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Record {
            id: String,
        }

        let parsed: ApiResponse<Record> = serde_json::from_value(
            json!({ "success": true, "message": "", "result": { "id": "abc" } }),
        )
        .unwrap();
        assert_eq!(parsed.result, Some(Record { id: "abc".into() }));

        let empty: ApiResponse<Record> =
            serde_json::from_value(json!({ "success": true, "message": "" })).unwrap();
        assert!(empty.result.is_none());
    }

    #[test]
    fn test_envelope_deserializes_without_result() {
        let parsed: ApiResponse<String> =
            serde_json::from_value(json!({ "success": true, "message": "" })).unwrap();
        assert!(parsed.result.is_none());
    }
}
