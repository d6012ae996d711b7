use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Field guarded by a unique index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum UniqueField {
    Account,
    Email,
}

#[derive(Debug, Error)]
pub enum UserError {
    /// First failing field rule, already phrased for the client.
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation on create.
    #[error("{0} already in use")]
    AlreadyInUse(UniqueField),

    /// Uniqueness violation on update.
    #[error("{0} already in use")]
    Conflict(UniqueField),

    #[error("Malformed id: {0}")]
    MalformedId(String),

    #[error("not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl UserError {
    /// Re-tag a create-style uniqueness error as an update conflict.
    pub fn into_conflict(self) -> Self {
        match self {
            UserError::AlreadyInUse(field) => UserError::Conflict(field),
            other => other,
        }
    }
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) => AppError::BadRequest(msg),
            e @ UserError::AlreadyInUse(_) => AppError::BadRequest(e.to_string()),
            e @ UserError::Conflict(_) => AppError::Conflict(e.to_string()),
            UserError::MalformedId(raw) => AppError::InvalidId(raw),
            UserError::NotFound => AppError::not_found(),
            UserError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
