//! In-memory product store seeded from a JSON document.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::ProductRepository;

/// First id handed out when the seed data has no higher one.
pub const INITIAL_SEQUENCE: i64 = 1000;

/// Seed document layout: `{ "productos": [ ... ] }`
#[derive(Deserialize)]
struct Catalog {
    #[serde(rename = "productos", default)]
    products: Option<Vec<Product>>,
}

/// Product store held in memory and seeded once from JSON.
///
/// Ids come from an atomic sequence that always stays above every id
/// stored so far. Changes are not written back to the seed file.
#[derive(Debug, Clone)]
pub struct JsonProductRepository {
    products: Arc<RwLock<HashMap<i64, Product>>>,
    sequence: Arc<AtomicI64>,
}

impl JsonProductRepository {
    /// Empty store
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            sequence: Arc::new(AtomicI64::new(INITIAL_SEQUENCE)),
        }
    }

    /// Load the store from a JSON file on disk.
    ///
    /// # Errors
    /// [`ProductError::DataLoad`] when the file cannot be read or parsed, or
    /// when a record is not a valid product.
    pub fn from_path(path: impl AsRef<Path>) -> ProductResult<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| ProductError::DataLoad {
            path: source.clone(),
            reason: e.to_string(),
        })?;
        Self::load(&raw, &source)
    }

    /// Load the store from an in-memory JSON document.
    pub fn from_json_str(raw: &str) -> ProductResult<Self> {
        Self::load(raw, "<inline>")
    }

    fn load(raw: &str, source: &str) -> ProductResult<Self> {
        let data_load = |reason: String| ProductError::DataLoad {
            path: source.to_string(),
            reason,
        };

        let catalog: Catalog = serde_json::from_str(raw).map_err(|e| data_load(e.to_string()))?;

        let mut products = HashMap::new();
        let mut next_id = INITIAL_SEQUENCE;
        for product in catalog.products.unwrap_or_default() {
            let id = product
                .id()
                .ok_or_else(|| data_load(format!("product '{}' has no id", product.name())))?;
            let after = id
                .checked_add(1)
                .ok_or_else(|| data_load(format!("product id {} leaves no room for new ids", id)))?;
            next_id = next_id.max(after);
            if products.insert(id, product).is_some() {
                tracing::warn!(product_id = id, "Duplicate product id in seed data, keeping the last one");
            }
        }

        let in_stock = products.values().filter(|p| p.has_stock()).count();
        tracing::info!(
            source,
            count = products.len(),
            in_stock,
            next_id,
            "Loaded products"
        );

        Ok(Self {
            products: Arc::new(RwLock::new(products)),
            sequence: Arc::new(AtomicI64::new(next_id)),
        })
    }

    async fn filtered(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
        let products = self.products.read().await;
        let mut matches: Vec<Product> = products.values().filter(|p| predicate(p)).cloned().collect();
        matches.sort_by_key(|p| p.id());
        matches
    }
}

impl Default for JsonProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for JsonProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.is_in_category(category)).await)
    }

    async fn find_by_availability(&self, available: bool) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.is_available() == available).await)
    }

    async fn find_by_name_contains(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(|p| p.name_contains(fragment)).await)
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let (id, product) = match product.id() {
            Some(id) => {
                let after = id.checked_add(1).ok_or(ProductError::SequenceExhausted)?;
                self.sequence.fetch_max(after, Ordering::SeqCst);
                (id, product)
            }
            None => {
                // The sequence value itself is the next id, so i64::MAX is never handed out.
                let id = self
                    .sequence
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |next| {
                        next.checked_add(1)
                    })
                    .map_err(|_| ProductError::SequenceExhausted)?;
                (id, product.with_id(id))
            }
        };

        self.products.write().await.insert(id, product.clone());
        tracing::info!(product_id = id, "Saved product");
        Ok(product)
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        if self.products.write().await.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool> {
        Ok(self.products.read().await.contains_key(&id))
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(self.products.read().await.len() as u64)
    }
}
