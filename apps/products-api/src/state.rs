//! Application state management

use domain_products::{JsonProductRepository, ProductService};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub products: ProductService<JsonProductRepository>,
}

impl AppState {
    /// Load the product catalog named in `config`.
    pub fn load(config: Config) -> eyre::Result<Self> {
        let repository = JsonProductRepository::from_path(&config.catalog.data_path)?;
        Ok(Self {
            config,
            products: ProductService::new(repository),
        })
    }
}
