use axum_helpers::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    // A missing .env is fine; real deployments set the variables directly.
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = database::mongodb::resolve_database(&mongo_client, &config.mongodb);

    info!("Using MongoDB database: {}", db.name());

    api::users::init_indexes(&db).await?;

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let routes = api::routes(&state).merge(health_router(state.config.app));
    let router = create_router::<openapi::ApiDoc>(
        routes,
        &state.config.cors,
        &state.config.environment,
    )?;

    info!(
        "Starting {} v{} (30s shutdown timeout)",
        state.config.app.name, state.config.app.version
    );

    let server = state.config.server.clone();
    create_production_app(router, &server, Duration::from_secs(30), state.close())
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
