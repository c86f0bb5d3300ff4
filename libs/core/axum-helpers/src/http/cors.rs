use axum::http::{HeaderValue, Method, header};
use core_config::{Environment, cors::CorsConfig};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates the CORS layer for the configured origins.
///
/// With origins configured the layer allows exactly those, the CRUD methods,
/// and the usual request headers, with a 1 hour max age.
///
/// Without origins, development falls back to [`create_permissive_cors_layer`]
/// and production refuses to start.
///
/// # Errors
/// - No origins configured in production
/// - An origin that is not a valid header value
pub fn create_cors_layer(config: &CorsConfig, environment: &Environment) -> io::Result<CorsLayer> {
    if !config.is_restricted() {
        if environment.is_production() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "CORS_ALLOWED_ORIGIN is required in production. Example: CORS_ALLOWED_ORIGIN=https://example.com",
            ));
        }
        tracing::warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(create_permissive_cors_layer());
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    tracing::info!(origins = ?config.allowed_origins, "CORS configured");

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .expose_headers([header::LOCATION])
        .max_age(Duration::from_secs(3600)))
}

/// Creates a permissive CORS layer for development.
///
/// Allows any origin - **DO NOT USE IN PRODUCTION**.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrestricted_is_rejected_in_production() {
        let result = create_cors_layer(&CorsConfig::default(), &Environment::Production);
        assert!(result.is_err());
    }

    #[test]
    fn test_unrestricted_is_permissive_in_development() {
        let result = create_cors_layer(&CorsConfig::default(), &Environment::Development);
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let config = CorsConfig::new(["http://ok.example", "bad\norigin"]);
        let err = create_cors_layer(&config, &Environment::Development).unwrap_err();
        assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
    }
}
