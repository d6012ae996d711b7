use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use axum_helpers::{
    ApiResponse, ErrorResponse, JsonBody,
    errors::responses::{
        BadRequestResponse, ConflictResponse, InternalServerErrorResponse, InvalidIdResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUserInput, UpdateUserInput, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(UserResponse, CreateUserInput, UpdateUserInput, ErrorResponse),
        responses(
            BadRequestResponse,
            InvalidIdResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
///
/// Routes are declared at the root. Not-found and malformed-body handling
/// is added by `axum_helpers::with_api_fallbacks` once all routers are merged.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users::<R>).post(create_user::<R>))
        .route(
            "/{id}",
            get(get_user::<R>)
                .patch(update_user::<R>)
                .delete(delete_user::<R>),
        )
        .with_state(shared_service)
}

/// List all users
#[utoipa::path(
    get,
    path = "/",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = ApiResponse<Vec<UserResponse>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<ApiResponse<Vec<UserResponse>>> {
    let users = service.list_users().await?;
    Ok(ApiResponse::ok(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    request_body = CreateUserInput,
    responses(
        (status = 200, description = "User created", body = ApiResponse<UserResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(input): JsonBody<CreateUserInput>,
) -> UserResult<ApiResponse<UserResponse>> {
    let user = service.create_user(input).await?;
    Ok(ApiResponse::ok(user))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "24-character hex user id")
    ),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserResponse>),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> UserResult<ApiResponse<UserResponse>> {
    let user = service.get_user(&id).await?;
    Ok(ApiResponse::ok(user))
}

/// Partially update a user
///
/// Only the supplied fields are validated and changed.
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "24-character hex user id")
    ),
    request_body = UpdateUserInput,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateUserInput>,
) -> UserResult<ApiResponse<UserResponse>> {
    let user = service.update_user(&id, input).await?;
    Ok(ApiResponse::ok(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "24-character hex user id")
    ),
    responses(
        (status = 200, description = "User deleted; the envelope carries no result"),
        (status = 400, response = InvalidIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(id): Path<String>,
) -> UserResult<ApiResponse<()>> {
    service.delete_user(&id).await?;
    Ok(ApiResponse::empty())
}
