//! Shared test fixtures

use crate::orchestrator::CatalogSource;
use async_trait::async_trait;
use shopbop_api::{CatalogError, CatalogProduct, ColorWay, ImageRef, Price};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Build a catalog product with `image_count` jpg refs in its first colorway
pub(crate) fn product(id: &str, image_count: usize) -> CatalogProduct {
    CatalogProduct {
        product_sin: id.to_string(),
        short_description: format!("Product {}", id),
        designer_name: Some("Test Designer".to_string()),
        price: Price {
            retail: "$100.00".to_string(),
        },
        colors: vec![ColorWay {
            images: (0..image_count)
                .map(|i| ImageRef {
                    src: format!("/prod/{}/{}.jpg", id, i),
                })
                .collect(),
        }],
    }
}

/// Canned catalog with call counters
pub(crate) struct FakeCatalog {
    pub products: Vec<CatalogProduct>,
    pub catalog_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
    pub fail_catalog: bool,
    pub fail_images: bool,
}

impl FakeCatalog {
    pub fn with_products(products: Vec<CatalogProduct>) -> Self {
        Self {
            products,
            catalog_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            fail_catalog: false,
            fail_images: false,
        }
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn category_products(
        &self,
        _category: &str,
    ) -> shopbop_api::Result<Vec<CatalogProduct>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_catalog {
            return Err(CatalogError::Status(503));
        }
        Ok(self.products.clone())
    }

    async fn fetch_image(&self, src: &str) -> shopbop_api::Result<Vec<u8>> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_images {
            return Err(CatalogError::Status(404));
        }
        Ok(src.as_bytes().to_vec())
    }
}
