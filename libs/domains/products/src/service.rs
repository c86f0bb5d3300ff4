//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::ProductRepository;

/// Product service providing the query and update operations used by the
/// HTTP layer.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        self.repository.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.repository.find_by_category(category).await
    }

    /// Products flagged as available
    #[instrument(skip(self))]
    pub async fn find_available(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_by_availability(true).await
    }

    #[instrument(skip(self))]
    pub async fn search_by_name(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        self.repository.find_by_name_contains(fragment).await
    }

    #[instrument(skip(self, product), fields(product_name = %product.name()))]
    pub async fn create(&self, product: Product) -> ProductResult<Product> {
        self.repository.save(product).await
    }

    /// Replace the product stored under `id`.
    ///
    /// Returns `None` without touching the store when `id` is unknown. The
    /// saved product always carries `id`, whatever id `product` had.
    #[instrument(skip(self, product))]
    pub async fn update(&self, id: i64, product: Product) -> ProductResult<Option<Product>> {
        if !self.exists(id).await? {
            return Ok(None);
        }
        self.repository.save(product.with_id(id)).await.map(Some)
    }

    /// Returns whether a product was removed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ProductResult<bool> {
        if !self.exists(id).await? {
            return Ok(false);
        }
        self.repository.delete_by_id(id).await?;
        Ok(true)
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, id: i64) -> ProductResult<bool> {
        self.repository.exists_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> ProductResult<u64> {
        self.repository.count().await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
