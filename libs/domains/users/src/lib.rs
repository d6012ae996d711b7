//! Users Domain
//!
//! A single "users" resource (account + email) stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, envelope responses
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← id parsing, validation, one store call
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Documents, DTOs, ids
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let router = axum_helpers::with_api_fallbacks(handlers::router(service));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod validation;

pub use crate::mongodb::MongoUserRepository;
pub use error::{UniqueField, UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateUserInput, NewUser, UpdateUserInput, User, UserChanges, UserId, UserResponse,
};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
