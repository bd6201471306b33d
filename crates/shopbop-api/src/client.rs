//! Shopbop API HTTP client

use crate::error::{CatalogError, Result};
use crate::types::{CatalogProduct, ProductsResponse};
use std::time::Duration;

/// Client for the Shopbop retail catalog API and its image origin
///
/// The catalog serves product listings per category; product images live on
/// a separate fixed origin host and are addressed by the source fragments
/// embedded in catalog records.
pub struct ShopbopClient {
    http: reqwest::Client,
    catalog_base: String,
    image_base: String,
}

impl ShopbopClient {
    /// Base URL for the catalog API
    pub const CATALOG_BASE_URL: &'static str = "https://api.shopbop.com";
    /// Base URL prefix for the image origin
    pub const IMAGE_BASE_URL: &'static str =
        "https://m.media-amazon.com/images/G/01/Shopbop/p";

    /// Client identification headers required by the catalog
    pub const CLIENT_ID: &'static str = "Shopbop-UW-Team2-2024";
    pub const CLIENT_VERSION: &'static str = "1.0.0";

    /// Create a new client with default settings (30 second timeout)
    pub fn new() -> Self {
        Self::with_base_urls(
            Self::CATALOG_BASE_URL.to_string(),
            Self::IMAGE_BASE_URL.to_string(),
        )
    }

    /// Create a new client against custom base URLs (30 second timeout)
    pub fn with_base_urls(catalog_base: String, image_base: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            catalog_base,
            image_base,
        }
    }

    /// List products for a category
    ///
    /// Issues `GET {base}/categories/{category}/products` with the fixed
    /// client-identification headers. Returns an error on transport failure
    /// or a non-success status; an empty list is a valid response.
    pub async fn category_products(&self, category: &str) -> Result<Vec<CatalogProduct>> {
        let url = format!(
            "{}/categories/{}/products",
            self.catalog_base,
            urlencoding::encode(category)
        );

        let response = self
            .http
            .get(&url)
            .header("Client-Id", Self::CLIENT_ID)
            .header("Client-Version", Self::CLIENT_VERSION)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }

        let data: ProductsResponse = response.json().await?;
        Ok(data.products)
    }

    /// Build the public origin URL for an image source fragment
    pub fn image_url(&self, src: &str) -> String {
        format!("{}{}", self.image_base, src)
    }

    /// Fetch raw image bytes from the image origin
    pub async fn fetch_image(&self, src: &str) -> Result<Vec<u8>> {
        let url = self.image_url(src);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for ShopbopClient {
    fn default() -> Self {
        Self::new()
    }
}
