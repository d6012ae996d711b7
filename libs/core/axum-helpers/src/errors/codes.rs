//! Error codes attached to every error log line.
//!
//! Clients only ever see the envelope message; the integer code exists so log
//! aggregation can group failures without parsing free text.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::MalformedJson;
//! assert_eq!(code.as_str(), "MALFORMED_JSON");
//! assert_eq!(code.code(), 1003);
//! assert_eq!(code.default_message(), "malformed JSON");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// A field failed validation
    ValidationError,

    /// Path id is not a well-formed identifier
    InvalidId,

    /// Request body declared as JSON but could not be parsed
    MalformedJson,

    /// Requested resource or route was not found
    NotFound,

    /// Request conflicts with current resource state
    Conflict,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    /// A dependency is temporarily unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::MalformedJson => "MALFORMED_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    pub const fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::MalformedJson => 1003,
            Self::NotFound => 1004,
            Self::Conflict => 1008,
            Self::InternalError => 1500,
            Self::ServiceUnavailable => 1503,
        }
    }

    /// Message placed in the envelope when the caller supplies none.
    pub const fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "validation failed",
            Self::InvalidId => "invalid id format",
            Self::MalformedJson => "malformed JSON",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::InternalError => "unknown error",
            Self::ServiceUnavailable => "service unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
