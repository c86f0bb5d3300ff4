//! Products Domain
//!
//! Product catalog backed by an in-memory store that is seeded from a JSON
//! document at startup.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, pagination
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Mapper    │  ← Request/response ⇄ entity
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Query and update operations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + JSON-seeded implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, JsonProductRepository, ProductService};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = JsonProductRepository::from_path("data/productos.json")?;
//! let service = ProductService::new(repository);
//!
//! // Mount wherever the app wants, e.g. under /api/v1/productos
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod json;
pub mod mapper;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use json::JsonProductRepository;
pub use models::{Product, ProductDraft, ProductPage, ProductRequest, ProductResponse};
pub use repository::ProductRepository;
pub use service::ProductService;
