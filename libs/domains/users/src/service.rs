use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUserInput, UpdateUserInput, UserId, UserResponse};
use crate::repository::UserRepository;
use crate::validation::{validate_changes, validate_new_user};

/// Service layer for User business logic
///
/// Every operation is: parse id, validate input, one repository call.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: CreateUserInput) -> UserResult<UserResponse> {
        let new_user = validate_new_user(&input)?;
        let created = self.repository.create(new_user).await?;
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> UserResult<UserResponse> {
        let id = UserId::parse(id)?;
        self.repository
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or(UserError::NotFound)
    }

    /// Partial update. A uniqueness collision here is a conflict (409), not a
    /// plain bad request as on create.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: &str, input: UpdateUserInput) -> UserResult<UserResponse> {
        let id = UserId::parse(id)?;
        let changes = validate_changes(&input)?;

        self.repository
            .update_by_id(id, changes)
            .await
            .map_err(UserError::into_conflict)?
            .map(UserResponse::from)
            .ok_or(UserError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> UserResult<()> {
        let id = UserId::parse(id)?;
        self.repository
            .delete_by_id(id)
            .await?
            .map(|_| ())
            .ok_or(UserError::NotFound)
    }
}
