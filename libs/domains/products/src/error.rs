use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Failed to load products from {path}: {reason}")]
    DataLoad { path: String, reason: String },

    #[error("Product id sequence exhausted")]
    SequenceExhausted,
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::InvalidProduct(msg) => AppError::BadRequest(msg),
            err @ (ProductError::DataLoad { .. } | ProductError::SequenceExhausted) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
