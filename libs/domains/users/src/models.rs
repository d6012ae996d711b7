use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

use crate::error::{UserError, UserResult};

/// Store-generated record identifier (a MongoDB ObjectId).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(ObjectId);

impl UserId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a 24-character hex id taken from a request path.
    pub fn parse(raw: &str) -> UserResult<Self> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| UserError::MalformedId(raw.to_string()))
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for UserId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// Stored user document: exactly `_id`, `account`, `email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub account: String,
    pub email: String,
}

impl User {
    pub fn new(input: NewUser) -> Self {
        Self {
            id: ObjectId::new(),
            account: input.account,
            email: input.email,
        }
    }

    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }

    /// Overwrite only the supplied fields.
    pub fn apply_changes(&mut self, changes: UserChanges) {
        if let Some(account) = changes.account {
            self.account = account;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
    }
}

/// Validated input for a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub account: String,
    pub email: String,
}

/// Validated partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub account: Option<String>,
    pub email: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.account.is_none() && self.email.is_none()
    }
}

/// Record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// 24-character hex identifier
    #[schema(example = "64b7f0c2a1d3e4f5a6b7c8d9")]
    pub id: String,
    #[schema(example = "alice01")]
    pub account: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            account: user.account,
            email: user.email,
        }
    }
}

/// Body of `POST /`.
///
/// Fields are kept as raw JSON so validation can report type errors with
/// field-specific messages. `null` and absent both read as `None`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateUserInput {
    #[serde(default)]
    #[schema(value_type = String, example = "alice01")]
    pub account: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, example = "alice@example.com")]
    pub email: Option<Value>,
}

/// Body of `PATCH /{id}`.
///
/// Absent fields are `None`; an explicit `null` is `Some(Value::Null)` and is
/// reported as missing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserInput {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "alice02")]
    pub account: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "alice@example.org")]
    pub email: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
