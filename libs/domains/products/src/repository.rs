use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::Product;

/// Repository trait for Product persistence
///
/// Finder results come back ordered by id. Implementations must be safe to
/// share across concurrent requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All stored products
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Products whose category equals `category`, ignoring case
    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    /// Products whose availability flag equals `available`
    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>>;

    /// Products whose name contains `fragment`, ignoring case
    async fn find_by_name_contains(&self, fragment: &str) -> ProductResult<Vec<Product>>;

    /// Insert or replace a product.
    ///
    /// A product without id gets the next one from the store's sequence.
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Remove a product. Unknown ids are a no-op.
    async fn delete_by_id(&self, id: i64) -> ProductResult<()>;

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool>;

    async fn count(&self) -> ProductResult<u64>;
}
