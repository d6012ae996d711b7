//! HTTP routes for the users service.
//!
//! Everything is mounted at the root; `axum_helpers::create_router` adds the
//! docs, fallbacks and middleware on top.

pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(users::router(state))
        .merge(health::router(state.clone()))
}
