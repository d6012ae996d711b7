use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UniqueField, UserError, UserResult};
use crate::models::{NewUser, User, UserChanges, UserId};

/// Repository trait for User persistence
///
/// Uniqueness of `account` and `email` is the store's job: a colliding write
/// fails with [`UserError::AlreadyInUse`] naming the field.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record; the store assigns the id.
    async fn create(&self, input: NewUser) -> UserResult<User>;

    /// All records, in storage order.
    async fn find_all(&self) -> UserResult<Vec<User>>;

    async fn find_by_id(&self, id: UserId) -> UserResult<Option<User>>;

    /// Apply `changes` and return the post-update record, `None` if no record matched.
    async fn update_by_id(&self, id: UserId, changes: UserChanges) -> UserResult<Option<User>>;

    /// Remove a record and return it, `None` if no record matched.
    async fn delete_by_id(&self, id: UserId) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Uniqueness is checked and the write applied under one write lock, so
/// concurrent writers cannot both claim the same value.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// First unique field of `candidate` already held by a record other than `exclude`.
    fn collision(users: &[User], candidate: &User, exclude: Option<ObjectId>) -> Option<UniqueField> {
        let others = || users.iter().filter(move |u| Some(u.id) != exclude);

        if others().any(|u| u.account == candidate.account) {
            return Some(UniqueField::Account);
        }
        if others().any(|u| u.email == candidate.email) {
            return Some(UniqueField::Email);
        }
        None
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;
        let user = User::new(input);

        if let Some(field) = Self::collision(&users, &user, None) {
            return Err(UserError::AlreadyInUse(field));
        }

        users.push(user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.clone())
    }

    async fn find_by_id(&self, id: UserId) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id.object_id()).cloned())
    }

    async fn update_by_id(&self, id: UserId, changes: UserChanges) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(index) = users.iter().position(|u| u.id == id.object_id()) else {
            return Ok(None);
        };

        let mut updated = users[index].clone();
        updated.apply_changes(changes);

        if let Some(field) = Self::collision(&users, &updated, Some(updated.id)) {
            return Err(UserError::AlreadyInUse(field));
        }

        users[index] = updated.clone();

        tracing::info!(user_id = %id, "Updated user");
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: UserId) -> UserResult<Option<User>> {
        let mut users = self.users.write().await;

        let Some(index) = users.iter().position(|u| u.id == id.object_id()) else {
            return Ok(None);
        };

        let removed = users.remove(index);
        tracing::info!(user_id = %id, "Deleted user");
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(account: &str, email: &str) -> NewUser {
        NewUser {
            account: account.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(new_user("alice01", "alice@example.com")).await.unwrap();
        let found = repo.find_by_id(created.user_id()).await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice01", "alice@example.com")).await.unwrap();
        repo.create(new_user("bobby01", "bob@example.com")).await.unwrap();

        let accounts: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.account)
            .collect();
        assert_eq!(accounts, ["alice01", "bobby01"]);
    }

    #[tokio::test]
    async fn test_duplicate_account_and_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice01", "alice@example.com")).await.unwrap();

        let err = repo
            .create(new_user("alice01", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::AlreadyInUse(UniqueField::Account)));

        let err = repo
            .create(new_user("other01", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::AlreadyInUse(UniqueField::Email)));
    }

    #[tokio::test]
    async fn test_account_uniqueness_is_case_sensitive() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice01", "alice@example.com")).await.unwrap();
        assert!(repo.create(new_user("ALICE01", "b@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("alice01", "alice@example.com")).await.unwrap();

        let updated = repo
            .update_by_id(
                created.user_id(),
                UserChanges {
                    account: None,
                    email: Some("new@example.com".into()),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.account, "alice01");
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(repo.find_by_id(created.user_id()).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_to_own_value_is_not_a_collision() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("alice01", "alice@example.com")).await.unwrap();

        let result = repo
            .update_by_id(
                created.user_id(),
                UserChanges {
                    account: Some("alice01".into()),
                    email: None,
                },
            )
            .await;
        assert!(result.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_collision_leaves_record_untouched() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice01", "alice@example.com")).await.unwrap();
        let bob = repo.create(new_user("bobby01", "bob@example.com")).await.unwrap();

        let err = repo
            .update_by_id(
                bob.user_id(),
                UserChanges {
                    account: None,
                    email: Some("alice@example.com".into()),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UserError::AlreadyInUse(UniqueField::Email)));
        assert_eq!(repo.find_by_id(bob.user_id()).await.unwrap(), Some(bob));
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let repo = InMemoryUserRepository::new();
        let result = repo
            .update_by_id(UserId::new(), UserChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_then_none() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("alice01", "alice@example.com")).await.unwrap();

        let removed = repo.delete_by_id(created.user_id()).await.unwrap();
        assert_eq!(removed, Some(created.clone()));
        assert!(repo.delete_by_id(created.user_id()).await.unwrap().is_none());
    }
}
