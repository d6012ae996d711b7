use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{cors_layer, reject_malformed_json, security_headers};
use axum::{Json, Router, middleware, routing::get};
use core_config::{Environment, cors::CorsConfig, server::ServerConfig};
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

/// Give an API router its error-envelope behaviour.
///
/// - Unknown paths and unsupported methods answer `404 {"success":false,"message":"not found"}`.
/// - Bodies declared as JSON that fail to parse answer `400 "malformed JSON"`.
///
/// Call this once, after every route has been merged in.
pub fn with_api_fallbacks(router: Router) -> Router {
    router
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(middleware::from_fn(reject_malformed_json))
}

/// Creates the service router with documentation and common middleware.
///
/// - OpenAPI document at `/docs/openapi.json`, ReDoc at `/docs/redoc`, Scalar at `/docs/scalar`
/// - API routes mounted at the root
/// - [`with_api_fallbacks`] applied to everything
/// - Tracing, security headers, CORS and response compression
///
/// `apis` must already have its state applied and should include the health
/// routes, so they get the same middleware.
///
/// # Errors
/// Returns an error if a configured CORS origin is not a valid header value.
///
/// # Example
/// ```ignore
/// let routes = handlers::router(service).merge(health_router(app_info!()));
/// let router = create_router::<ApiDoc>(routes, &CorsConfig::from_env()?, &Environment::from_env())?;
/// ```
pub fn create_router<T>(
    apis: Router,
    cors: &CorsConfig,
    environment: &Environment,
) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors = cors_layer(cors, environment)?;
    let spec = T::openapi();

    let docs = Router::new()
        .route(
            "/docs/openapi.json",
            get(move || {
                let spec = spec.clone();
                async move { Json(spec) }
            }),
        )
        .merge(Redoc::with_url("/docs/redoc", T::openapi()))
        .merge(Scalar::with_url("/docs/scalar", T::openapi()));

    let router = with_api_fallbacks(Router::new().merge(docs).merge(apis))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` (bounded by
/// `shutdown_timeout`) once in-flight requests have drained.
///
/// # Example
/// ```ignore
/// let cleanup = async move { drop(client) };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(()) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { coordinator.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct EmptyDoc;

    fn routes() -> Router {
        Router::new().route("/", post(|| async { "created" }))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_path_is_enveloped_404() {
        let app = with_api_fallbacks(routes());
        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "not found");
    }

    #[tokio::test]
    async fn test_wrong_method_is_404_not_405() {
        let app = with_api_fallbacks(routes());
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_on_unknown_route() {
        let app = with_api_fallbacks(routes());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/nope")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{oops"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "malformed JSON");
    }

    #[tokio::test]
    async fn test_create_router_serves_openapi_document() {
        let app = create_router::<EmptyDoc>(
            routes(),
            &CorsConfig::default(),
            &Environment::Development,
        )
        .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["info"]["title"], "test");
    }
}
