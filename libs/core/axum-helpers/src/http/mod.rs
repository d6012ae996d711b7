//! HTTP middleware module.
//!
//! - Malformed-JSON guard
//! - CORS configuration
//! - Security headers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{cors_layer, reject_malformed_json, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(reject_malformed_json))
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(cors_layer(&cors, &environment)?);
//! ```

pub mod cors;
pub mod json_guard;
pub mod security;

pub use cors::cors_layer;
pub use json_guard::{
    MAX_JSON_BODY_BYTES, has_json_content_type, parse_json_body, reject_malformed_json,
};
pub use security::security_headers;
