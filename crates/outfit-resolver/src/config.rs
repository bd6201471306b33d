//! Service configuration parsed from environment variables

use shopbop_api::ShopbopClient;
use std::env;

/// Which store implementation backs the caches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// S3 bucket (production)
    S3,
    /// In-memory stores (local development)
    Memory,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bucket: String,
    /// Overrides the default `https://{bucket}/{key}` public URL base
    pub public_base_url: Option<String>,
    /// Metadata cache TTL in seconds; absent means entries never expire
    pub cache_ttl_secs: Option<u64>,
    pub catalog_base_url: String,
    pub image_base_url: String,
    pub storage_backend: StorageBackend,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3002);

        let bucket = env::var("S3_BUCKET").unwrap_or_else(|_| "shopbop-bucket".to_string());

        let public_base_url = env::var("PUBLIC_BASE_URL").ok();

        let cache_ttl_secs = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok());

        let catalog_base_url = env::var("CATALOG_BASE_URL")
            .unwrap_or_else(|_| ShopbopClient::CATALOG_BASE_URL.to_string());

        let image_base_url = env::var("IMAGE_BASE_URL")
            .unwrap_or_else(|_| ShopbopClient::IMAGE_BASE_URL.to_string());

        let storage_backend = match env::var("STORAGE_BACKEND").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            _ => StorageBackend::S3,
        };

        Self {
            port,
            bucket,
            public_base_url,
            cache_ttl_secs,
            catalog_base_url,
            image_base_url,
            storage_backend,
        }
    }
}
