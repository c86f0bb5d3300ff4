//! Handler tests for Products domain
//!
//! These drive the products router directly (no `/api` prefix, no
//! middleware) against a store seeded from an inline JSON document:
//! - Status codes and the error envelope
//! - Spanish field names on the wire
//! - Pagination metadata
//! - Location header on create

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

const SEED: &str = r#"{
    "productos": [
        {"id": 1, "nombre": "Laptop Gamer", "descripcion": "16GB RAM", "precio": 1500.0,
         "categoria": "Electronica", "stock": 10, "disponible": true,
         "fechaCreacion": "2024-01-15T10:30:00", "fechaActualizacion": "2024-01-15T10:30:00"},
        {"id": 2, "nombre": "Mesa de Centro", "precio": 250.5, "categoria": "Muebles",
         "stock": 0, "disponible": false},
        {"id": 3, "nombre": "Mouse Inalambrico", "precio": 35.99, "categoria": "electronica",
         "stock": 50, "disponible": true}
    ]
}"#;

fn app() -> Router {
    let repo = JsonProductRepository::from_json_str(SEED).unwrap();
    handlers::router(ProductService::new(repo))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn valid_body() -> Value {
    json!({
        "nombre": "Teclado Mecanico",
        "descripcion": "Switches azules",
        "precio": 89.99,
        "categoria": "Electronica",
        "stock": 15,
        "disponible": true
    })
}

#[tokio::test]
async fn test_list_products_paginates() {
    let response = app().oneshot(get("/?page=0&size=2")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: Value = json_body(response.into_body()).await;
    assert_eq!(page["content"].as_array().unwrap().len(), 2);
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["numberOfElements"], 2);
    assert_eq!(page["first"], true);
    assert_eq!(page["last"], false);

    let response = app().oneshot(get("/?page=1&size=2")).await.unwrap();
    let page: Value = json_body(response.into_body()).await;
    assert_eq!(page["content"].as_array().unwrap().len(), 1);
    assert_eq!(page["last"], true);
}

#[tokio::test]
async fn test_list_products_defaults_to_page_of_20() {
    let response = app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page: ProductPage = json_body(response.into_body()).await;
    assert_eq!(page.size, 20);
    assert_eq!(page.number, 0);
    assert_eq!(page.content.len(), 3);
}

#[tokio::test]
async fn test_list_products_rejects_bad_paging() {
    for uri in ["/?size=0", "/?page=-1", "/?size=abc"] {
        let response = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_get_product_returns_spanish_fields() {
    let response = app().oneshot(get("/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["nombre"], "Laptop Gamer");
    assert_eq!(body["categoria"], "Electronica");
    assert_eq!(body["disponible"], true);
    assert!(body["fechaCreacion"].is_string());
}

#[tokio::test]
async fn test_get_unknown_product_returns_404() {
    let response = app().oneshot(get("/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let response = app().oneshot(get("/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_category_filter_ignores_case() {
    let response = app().oneshot(get("/categoria/ELECTRONICA")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<ProductResponse> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn test_search_by_name_ignores_case() {
    let response = app().oneshot(get("/buscar?nombre=MOUSE")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<ProductResponse> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, Some(3));
}

#[tokio::test]
async fn test_search_without_name_returns_400() {
    let response = app().oneshot(get("/buscar")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_available_lists_only_available() {
    let response = app().oneshot(get("/disponibles")).await.unwrap();

    let products: Vec<ProductResponse> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p.available));
}

#[tokio::test]
async fn test_create_product_returns_201_with_location() {
    let response = app()
        .oneshot(with_json("POST", "/", valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/1000");

    let product: ProductResponse = json_body(response.into_body()).await;
    assert_eq!(product.id, Some(1000));
    assert_eq!(product.name, "Teclado Mecanico");
    assert!(product.created_at.is_some());
    assert_eq!(product.created_at, product.updated_at);
}

#[tokio::test]
async fn test_created_product_is_readable() {
    let app = app();
    app.clone()
        .oneshot(with_json("POST", "/", valid_body()))
        .await
        .unwrap();

    let response = app.oneshot(get("/1000")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_product_validation_errors() {
    let cases = [
        json!({"nombre": "X", "precio": 10.0, "categoria": "A"}),
        json!({"nombre": "Valid", "precio": 0, "categoria": "A"}),
        json!({"nombre": "Valid", "precio": -5.0, "categoria": "A"}),
        json!({"nombre": "Valid", "precio": 10.123, "categoria": "A"}),
        json!({"nombre": "Valid", "categoria": "A"}),
        json!({"nombre": "Valid", "precio": 10.0}),
        json!({"nombre": "Valid", "precio": 10.0, "categoria": "A", "stock": -1}),
    ];

    for body in cases {
        let response = app()
            .oneshot(with_json("POST", "/", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);

        let error: Value = json_body(response.into_body()).await;
        assert_eq!(error["error"], "VALIDATION_ERROR", "{}", body);
    }
}

#[tokio::test]
async fn test_create_product_malformed_json_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"nombre\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_product_keeps_creation_time() {
    let app = app();
    let response = app
        .clone()
        .oneshot(with_json("PUT", "/1", valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let product: ProductResponse = json_body(response.into_body()).await;
    assert_eq!(product.id, Some(1));
    assert_eq!(product.name, "Teclado Mecanico");
    assert_eq!(
        product.created_at.unwrap().to_rfc3339(),
        "2024-01-15T10:30:00+00:00"
    );
    assert!(product.updated_at > product.created_at);

    let response = app.oneshot(get("/?size=10")).await.unwrap();
    let page: Value = json_body(response.into_body()).await;
    assert_eq!(page["totalElements"], 3);
}

#[tokio::test]
async fn test_update_unknown_product_returns_404() {
    let response = app()
        .oneshot(with_json("PUT", "/999", valid_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_invalid_body_returns_400() {
    let response = app()
        .oneshot(with_json("PUT", "/1", json!({"nombre": "", "precio": 1.0, "categoria": "A"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_product_then_404() {
    let app = app();
    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri("/2")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(get("/2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_creates_get_unique_ids() {
    let app = app();
    let mut handles = Vec::new();
    for _ in 0..20 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let response = app
                .oneshot(with_json("POST", "/", valid_body()))
                .await
                .unwrap();
            let product: ProductResponse = json_body(response.into_body()).await;
            product.id.unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
    assert!(ids.iter().all(|id| *id >= 1000));
}
