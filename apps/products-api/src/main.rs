//! Products API - REST server over a JSON-seeded product catalog

use axum::Router;
use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Full application router: docs, `/api` routes, `/health` and `/ready`.
fn app(state: &AppState) -> eyre::Result<Router> {
    let router = create_router::<openapi::ApiDoc>(
        api::routes(state),
        &state.config.cors,
        &state.config.environment,
    )?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone())))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        path = %config.catalog.data_path.display(),
        "Loading product catalog"
    );
    let state = AppState::load(config)?;

    let app = app(&state)?;

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );
    create_app(app, &state.config.server).await?;

    info!("Products API shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use core_config::{Environment, app_info, cors::CorsConfig, server::ServerConfig};
    use domain_products::{JsonProductRepository, ProductService};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let repository = JsonProductRepository::from_json_str(
            r#"{"productos": [
                {"id": 1, "nombre": "Laptop", "precio": 999.99, "categoria": "Electronica",
                 "stock": 3, "disponible": true}
            ]}"#,
        )
        .unwrap();

        AppState {
            config: Config {
                app: app_info!(),
                server: ServerConfig::default(),
                cors: CorsConfig::default(),
                catalog: config::CatalogConfig {
                    data_path: "unused.json".into(),
                },
                environment: Environment::Development,
            },
            products: ProductService::new(repository),
        }
    }

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_products_are_mounted_under_api_v1() {
        let app = app(&test_state()).unwrap();

        let response = app
            .oneshot(
                Request::get("/api/v1/productos/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response.into_body()).await["nombre"], "Laptop");
    }

    #[tokio::test]
    async fn test_location_header_uses_full_path() {
        let app = app(&test_state()).unwrap();

        let request = Request::post("/api/v1/productos")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({"nombre": "Mouse", "precio": 20.0, "categoria": "Electronica"}).to_string(),
            ))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/api/v1/productos/1000"
        );
    }

    #[tokio::test]
    async fn test_health_and_ready() {
        let app = app(&test_state()).unwrap();

        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response.into_body()).await["name"], "products_api");

        let response = app
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response.into_body()).await["products"], 1);
    }

    #[tokio::test]
    async fn test_openapi_lists_product_paths() {
        let app = app(&test_state()).unwrap();

        let response = app
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let doc = json_body(response.into_body()).await;
        assert!(doc["paths"]["/api/v1/productos/{id}"].is_object());
        assert!(doc["paths"]["/api/v1/productos/buscar"].is_object());
    }

    #[test]
    fn test_missing_catalog_fails_to_load() {
        let mut config = test_state().config;
        config.catalog.data_path = "does/not/exist.json".into();
        assert!(AppState::load(config).is_err());
    }
}
