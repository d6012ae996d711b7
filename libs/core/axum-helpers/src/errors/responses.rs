//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Validation failed or the value is already in use",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "account must be 4-20 characters"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Path id is not a 24-character hex identifier",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "invalid id format"
    })
)]
pub struct InvalidIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Update collides with another record",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "email already in use"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "message": "unknown error"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
