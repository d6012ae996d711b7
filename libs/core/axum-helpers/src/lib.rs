//! # Axum Helpers
//!
//! Utilities shared by the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`response`]**: the `{success, message, result?}` envelope returned by every endpoint
//! - **[`errors`]**: [`AppError`] and its envelope rendering, fallback handlers
//! - **[`extractors`]**: [`JsonBody`], a lenient JSON body extractor
//! - **[`http`]**: middleware (malformed-JSON guard, CORS, security headers)
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let router = create_router::<ApiDoc>(api_routes, &cors, &environment)?;
//! let app = router.merge(health_router(app_info!()));
//! create_production_app(app, &server_config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, with_api_fallbacks,
};

// Re-export HTTP middleware
pub use http::{cors_layer, reject_malformed_json, security_headers};

// Re-export error and response types
pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use response::ApiResponse;

// Re-export extractors
pub use extractors::JsonBody;
