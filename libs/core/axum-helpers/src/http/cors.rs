use axum::http::{HeaderValue, Method, header};
use core_config::{Environment, cors::CorsConfig};
use std::{io, time::Duration};
use tower_http::cors::CorsLayer;

/// Build the CORS layer for the service.
///
/// - Origins configured: only those origins, common methods and headers, 1 hour max age.
/// - Nothing configured in development: any origin.
/// - Nothing configured in production: no cross-origin access.
pub fn cors_layer(config: &CorsConfig, environment: &Environment) -> io::Result<CorsLayer> {
    if !config.is_configured() {
        return Ok(if environment.is_development() {
            tracing::debug!("CORS: no origins configured, allowing any origin in development");
            CorsLayer::permissive()
        } else {
            tracing::warn!("CORS: no origins configured, cross-origin requests are refused");
            CorsLayer::new()
        });
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS origin '{origin}': {e}"),
                )
            })
        })
        .collect::<io::Result<Vec<_>>>()?;

    tracing::info!(origins = ?config.allowed_origins, "CORS configured");

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:3000".into()],
        };
        assert!(cors_layer(&config, &Environment::Production).is_ok());
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let config = CorsConfig {
            allowed_origins: vec!["bad\norigin".into()],
        };
        let err = cors_layer(&config, &Environment::Development).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_unconfigured_builds_in_both_environments() {
        let config = CorsConfig::default();
        assert!(cors_layer(&config, &Environment::Development).is_ok());
        assert!(cors_layer(&config, &Environment::Production).is_ok());
    }
}
