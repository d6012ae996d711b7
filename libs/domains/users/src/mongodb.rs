//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    error::{CommandError, Error as MongoError, ErrorKind, WriteError, WriteFailure},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::{UniqueField, UserError, UserResult};
use crate::models::{NewUser, User, UserChanges, UserId};
use crate::repository::UserRepository;

/// Default collection name
pub const USERS_COLLECTION: &str = "users";

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// MongoDB implementation of the UserRepository
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoUserRepository::new(client.database("users"));
    /// repo.init_indexes().await?;
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, USERS_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<User>(collection_name);
        Self { collection }
    }

    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }

    /// Create the unique indexes on `account` and `email`. Idempotent.
    #[instrument(skip(self))]
    pub async fn init_indexes(&self) -> UserResult<()> {
        let unique = IndexOptions::builder().unique(true).build();
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "account": 1 })
                .options(unique.clone())
                .build(),
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique)
                .build(),
        ];

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(map_mongo_error)?;

        tracing::info!(collection = %self.collection.name(), "Unique indexes ensured");
        Ok(())
    }

    fn by_id(id: UserId) -> Document {
        doc! { "_id": id.object_id() }
    }
}

/// Translate a driver error, recognising unique index violations.
fn map_mongo_error(err: MongoError) -> UserError {
    let duplicate_message = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(WriteError { code, message, .. }))
        | ErrorKind::Command(CommandError { code, message, .. })
            if *code == DUPLICATE_KEY =>
        {
            Some(message.as_str())
        }
        _ => None,
    };

    match duplicate_message {
        Some(message) => UserError::AlreadyInUse(duplicate_field(message)),
        None => UserError::Database(err.to_string()),
    }
}

/// Which unique field a duplicate-key message is about.
///
/// The server reports e.g. `E11000 duplicate key error collection: db.users
/// index: account_1 dup key: { account: "alice01" }`. The index name decides;
/// anything that is not the account index is attributed to email.
fn duplicate_field(message: &str) -> UniqueField {
    let index_name = message
        .split("index: ")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next());

    match index_name {
        Some(name) if name.starts_with("account") => UniqueField::Account,
        Some(_) => UniqueField::Email,
        None if message.contains("{ account:") => UniqueField::Account,
        None => UniqueField::Email,
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, input), fields(account = %input.account))]
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let user = User::new(input);

        self.collection
            .insert_one(&user)
            .await
            .map_err(map_mongo_error)?;

        tracing::info!(user_id = %user.id, "User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> UserResult<Vec<User>> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(map_mongo_error)?;

        cursor.try_collect().await.map_err(map_mongo_error)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_by_id(&self, id: UserId) -> UserResult<Option<User>> {
        self.collection
            .find_one(Self::by_id(id))
            .await
            .map_err(map_mongo_error)
    }

    #[instrument(skip(self, changes), fields(user_id = %id))]
    async fn update_by_id(&self, id: UserId, changes: UserChanges) -> UserResult<Option<User>> {
        // `$set: {}` is rejected by the server
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut set = Document::new();
        if let Some(account) = changes.account {
            set.insert("account", account);
        }
        if let Some(email) = changes.email {
            set.insert("email", email);
        }

        let updated = self
            .collection
            .find_one_and_update(Self::by_id(id), doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_error)?;

        if updated.is_some() {
            tracing::info!(user_id = %id, "User updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn delete_by_id(&self, id: UserId) -> UserResult<Option<User>> {
        let deleted = self
            .collection
            .find_one_and_delete(Self::by_id(id))
            .await
            .map_err(map_mongo_error)?;

        if deleted.is_some() {
            tracing::info!(user_id = %id, "User deleted successfully");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_field_from_index_name() {
        let msg = r#"E11000 duplicate key error collection: app.users index: account_1 dup key: { account: "alice01" }"#;
        assert_eq!(duplicate_field(msg), UniqueField::Account);

        let msg = r#"E11000 duplicate key error collection: app.users index: email_1 dup key: { email: "alice@example.com" }"#;
        assert_eq!(duplicate_field(msg), UniqueField::Email);
    }

    #[test]
    fn test_email_value_mentioning_account_is_still_email() {
        let msg = r#"E11000 duplicate key error collection: app.users index: email_1 dup key: { email: "account@example.com" }"#;
        assert_eq!(duplicate_field(msg), UniqueField::Email);
    }

    #[test]
    fn test_duplicate_field_without_index_name() {
        assert_eq!(
            duplicate_field(r#"E11000 dup key: { account: "x" }"#),
            UniqueField::Account
        );
        assert_eq!(duplicate_field("E11000 duplicate key error"), UniqueField::Email);
    }

    #[test]
    fn test_by_id_filter() {
        let id = UserId::new();
        let filter = MongoUserRepository::by_id(id);
        assert_eq!(filter.get_object_id("_id").unwrap(), id.object_id());
    }
}
