//! Configuration for Products API

use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, cors::CorsConfig, env_or_default,
    server::ServerConfig,
};
use std::path::PathBuf;

pub use core_config::Environment;

const DEFAULT_DATA_PATH: &str = "data/productos.json";

/// Where the product seed document lives
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub data_path: PathBuf,
}

impl FromEnv for CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            data_path: PathBuf::from(env_or_default("PRODUCTS_DATA_PATH", DEFAULT_DATA_PATH)),
        })
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub catalog: CatalogConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env()?,
            cors: CorsConfig::from_env()?,
            catalog: CatalogConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
