//! HTTP handlers for Products API

use axum::{
    extract::{OriginalUri, Path, Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestQueryResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    AppError, IdPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;
use validator::Validate;

use crate::error::ProductError;
use crate::mapper;
use crate::models::{NameQuery, PageQuery, Product, ProductPage, ProductRequest, ProductResponse};
use crate::repository::ProductRepository;
use crate::service::ProductService;

type ApiResult<T> = Result<T, AppError>;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        list_by_category,
        search_by_name,
        list_available,
    ),
    components(
        schemas(ProductRequest, ProductResponse, ProductPage),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            BadRequestQueryResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Productos", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router.
///
/// Routes are relative, so the router can be nested under any prefix.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/disponibles", get(list_available))
        .route("/buscar", get(search_by_name))
        .route("/categoria/{categoria}", get(list_by_category))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Slice `products` into the requested page.
fn paginate(products: Vec<Product>, page: usize, size: usize) -> ProductPage {
    let total = products.len();
    let total_pages = total.div_ceil(size);
    let content: Vec<ProductResponse> = products
        .iter()
        .skip(page.saturating_mul(size))
        .take(size)
        .map(mapper::to_response)
        .collect();

    ProductPage {
        total_elements: total as u64,
        total_pages: total_pages as u64,
        number: page,
        size,
        number_of_elements: content.len(),
        first: page == 0,
        last: page.saturating_add(1) >= total_pages,
        empty: content.is_empty(),
        content,
    }
}

fn to_responses(products: &[Product]) -> Vec<ProductResponse> {
    products.iter().map(mapper::to_response).collect()
}

/// List products one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = "Productos",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of products", body = ProductPage),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<ProductPage>> {
    let Query(query) = query?;
    query.validate()?;

    let products = service.list_all().await?;
    Ok(Json(paginate(products, query.page, query.size)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Productos",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ProductResponse>> {
    let product = service
        .get_by_id(id)
        .await?
        .ok_or(ProductError::NotFound(id))?;
    Ok(Json(mapper::to_response(&product)))
}

/// List products in a category (case-insensitive)
#[utoipa::path(
    get,
    path = "/categoria/{categoria}",
    tag = "Productos",
    params(("categoria" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Products in the category", body = Vec<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
) -> ApiResult<Json<Vec<ProductResponse>>> {
    let products = service.find_by_category(&category).await?;
    Ok(Json(to_responses(&products)))
}

/// Search products by a fragment of their name (case-insensitive)
#[utoipa::path(
    get,
    path = "/buscar",
    tag = "Productos",
    params(NameQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<ProductResponse>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_by_name<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ProductResponse>>> {
    let Query(query) = query?;
    let products = service.search_by_name(&query.nombre).await?;
    Ok(Json(to_responses(&products)))
}

/// List products flagged as available
#[utoipa::path(
    get,
    path = "/disponibles",
    tag = "Productos",
    responses(
        (status = 200, description = "Available products", body = Vec<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_available<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ApiResult<Json<Vec<ProductResponse>>> {
    let products = service.find_available().await?;
    Ok(Json(to_responses(&products)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Productos",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> ApiResult<impl IntoResponse> {
    let product = service.create(mapper::to_domain(request)?).await?;
    let id = product
        .id()
        .ok_or_else(|| AppError::InternalServerError("saved product has no id".to_string()))?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(mapper::to_response(&product)),
    ))
}

/// Replace an existing product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Productos",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<ProductRequest>,
) -> ApiResult<Json<ProductResponse>> {
    let existing = service
        .get_by_id(id)
        .await?
        .ok_or(ProductError::NotFound(id))?;
    let replacement = mapper::update_from_request(&existing, request)?;

    match service.update(id, replacement).await? {
        Some(updated) => Ok(Json(mapper::to_response(&updated))),
        None => {
            tracing::warn!(product_id = id, "Product removed while it was being updated");
            Err(ProductError::NotFound(id).into())
        }
    }
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Productos",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ApiResult<StatusCode> {
    if service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ProductError::NotFound(id).into())
    }
}
