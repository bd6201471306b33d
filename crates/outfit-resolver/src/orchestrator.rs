//! CacheOrchestrator: check cache, call upstream on miss, write cache, respond
//!
//! Holds its collaborators by explicit injection and drives the whole
//! resolution policy: category/product selection, metadata cache lookup with
//! advisory expiry, and conditional image caching with per-role public URLs.

use crate::error::{ResolveError, Result};
use crate::keys::{self, ImageRole};
use crate::selection;
use crate::types::{ProductRecord, ResolveRequest};
use async_trait::async_trait;
use chrono::Utc;
use outfit_store::{BlobStore, MetadataStore};
use shopbop_api::{CatalogProduct, ShopbopClient};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cache lifetime stamped on stored image assets (one year)
const IMAGE_CACHE_CONTROL: &str = "max-age=31536000";

/// The catalog surface the orchestrator reads from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// List products for a category
    async fn category_products(&self, category: &str)
        -> shopbop_api::Result<Vec<CatalogProduct>>;

    /// Fetch raw image bytes for a source fragment
    async fn fetch_image(&self, src: &str) -> shopbop_api::Result<Vec<u8>>;
}

#[async_trait]
impl CatalogSource for ShopbopClient {
    async fn category_products(
        &self,
        category: &str,
    ) -> shopbop_api::Result<Vec<CatalogProduct>> {
        ShopbopClient::category_products(self, category).await
    }

    async fn fetch_image(&self, src: &str) -> shopbop_api::Result<Vec<u8>> {
        ShopbopClient::fetch_image(self, src).await
    }
}

/// Resolves selection requests against the caches, falling back to the
/// catalog and image origin on miss
pub struct CacheOrchestrator {
    catalog: Arc<dyn CatalogSource>,
    blobs: Arc<dyn BlobStore>,
    metadata: Arc<dyn MetadataStore>,
    /// Metadata cache TTL; `None` means entries never expire
    cache_ttl_secs: Option<u64>,
}

impl CacheOrchestrator {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        blobs: Arc<dyn BlobStore>,
        metadata: Arc<dyn MetadataStore>,
        cache_ttl_secs: Option<u64>,
    ) -> Self {
        Self {
            catalog,
            blobs,
            metadata,
            cache_ttl_secs,
        }
    }

    /// Resolve a selection request to a product with cached public image URLs
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<ProductRecord> {
        if request.categories.is_empty() {
            return Err(ResolveError::BadRequest(
                "categoryArray is required".to_string(),
            ));
        }

        // Disambiguators pin the category to the first candidate so the
        // draw is replayable; without them the category itself is random.
        let category = match &request.disambiguators {
            Some(_) => request.categories[0].as_str(),
            None => request.categories[selection::random_index(request.categories.len())].as_str(),
        };

        let cache_key = keys::metadata_cache_key(category, request.disambiguators.as_ref());

        if let Some(entry) = self.metadata.get(&cache_key).await? {
            if entry.is_expired(Utc::now()) {
                debug!(key = %cache_key, "Metadata entry expired, refetching");
            } else {
                match serde_json::from_value::<ProductRecord>(entry.payload) {
                    Ok(record) => {
                        debug!(key = %cache_key, category = %category, "Metadata cache hit");
                        return Ok(record);
                    }
                    Err(e) => {
                        warn!(key = %cache_key, error = %e, "Cached payload unreadable, refetching");
                    }
                }
            }
        }

        let products = self.catalog.category_products(category).await.map_err(|e| {
            warn!(category = %category, error = %e, "Catalog query failed");
            ResolveError::from(e)
        })?;

        if products.is_empty() {
            return Err(ResolveError::NoProductsFound {
                category: category.to_string(),
            });
        }

        let index = match &request.disambiguators {
            Some(d) => selection::deterministic_index(products.len(), d.timestamp, &d.seed),
            None => selection::random_index(products.len()),
        };
        let product = &products[index];

        let refs = product.image_refs();
        if refs.len() < 2 {
            return Err(ResolveError::MalformedProduct {
                product_id: product.product_sin.clone(),
            });
        }

        let mut image_urls = Vec::with_capacity(ImageRole::ALL.len());
        for role in ImageRole::ALL {
            let src = refs[role.ref_index(refs.len())].src.as_str();
            let image_key = keys::image_cache_key(&product.product_sin, role, src);

            // Exists-then-put is racy across concurrent requests: two misses
            // may both upload this key. The second write overwrites the
            // first with identical bytes, so the race is tolerated.
            if self.blobs.exists(&image_key).await? {
                debug!(key = %image_key, "Image already cached");
                image_urls.push(self.blobs.public_url(&image_key));
                continue;
            }

            match self.catalog.fetch_image(src).await {
                Ok(bytes) => {
                    let content_type = keys::content_type_for_key(&image_key);
                    self.blobs
                        .put(&image_key, bytes, content_type, IMAGE_CACHE_CONTROL)
                        .await?;
                    info!(key = %image_key, product_id = %product.product_sin, "Cached image");
                    image_urls.push(self.blobs.public_url(&image_key));
                }
                Err(e) => {
                    // Non-fatal: this role's URL is omitted and the request
                    // still succeeds.
                    warn!(
                        key = %image_key,
                        product_id = %product.product_sin,
                        error = %e,
                        "Image fetch failed, omitting role"
                    );
                }
            }
        }

        let record = ProductRecord {
            product_id: product.product_sin.clone(),
            product_name: product.short_description.clone(),
            designer_name: product.designer_name.clone(),
            product_price: product.price.retail.clone(),
            image_urls,
        };

        let payload = serde_json::to_value(&record).map_err(outfit_store::StoreError::from)?;
        self.metadata
            .put(&cache_key, payload, self.cache_ttl_secs)
            .await?;
        debug!(key = %cache_key, product_id = %record.product_id, "Cached product metadata");

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{product, FakeCatalog};
    use crate::types::Disambiguators;
    use outfit_store::{MemoryBlobStore, MemoryMetadataStore, MetadataEntry};
    use std::sync::atomic::Ordering;

    struct Harness {
        catalog: Arc<FakeCatalog>,
        blobs: Arc<MemoryBlobStore>,
        metadata: Arc<MemoryMetadataStore>,
        orchestrator: CacheOrchestrator,
    }

    fn harness(catalog: FakeCatalog, cache_ttl_secs: Option<u64>) -> Harness {
        let catalog = Arc::new(catalog);
        let blobs = Arc::new(MemoryBlobStore::new("https://shopbop-bucket"));
        let metadata = Arc::new(MemoryMetadataStore::new());
        let orchestrator = CacheOrchestrator::new(
            catalog.clone(),
            blobs.clone(),
            metadata.clone(),
            cache_ttl_secs,
        );
        Harness {
            catalog,
            blobs,
            metadata,
            orchestrator,
        }
    }

    fn request(categories: &[&str], disambiguators: Option<(i64, &str)>) -> ResolveRequest {
        ResolveRequest {
            categories: categories.iter().map(|c| c.to_string()).collect(),
            disambiguators: disambiguators.map(|(timestamp, seed)| Disambiguators {
                timestamp,
                seed: seed.to_string(),
            }),
        }
    }

    #[tokio::test]
    async fn test_empty_categories_is_bad_request_with_no_external_calls() {
        let h = harness(FakeCatalog::with_products(vec![product("1", 4)]), None);

        let err = h.orchestrator.resolve(&request(&[], None)).await.unwrap_err();
        assert!(matches!(err, ResolveError::BadRequest(_)));
        assert_eq!(h.catalog.catalog_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_miss_resolves_and_caches_product_with_two_image_urls() {
        let h = harness(FakeCatalog::with_products(vec![product("77", 4)]), None);

        let record = h
            .orchestrator
            .resolve(&request(&["dresses"], Some((1000, "abc"))))
            .await
            .unwrap();

        assert_eq!(record.product_id, "77");
        assert_eq!(
            record.image_urls,
            vec![
                "https://shopbop-bucket/product-images/77-image1.jpg".to_string(),
                "https://shopbop-bucket/product-images/77-image2.jpg".to_string(),
            ]
        );
        assert_eq!(h.catalog.catalog_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.catalog.image_calls.load(Ordering::SeqCst), 2);
        assert_eq!(h.blobs.len().await, 2);
        assert_eq!(h.metadata.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_hit_short_circuits_catalog() {
        let h = harness(FakeCatalog::with_products(vec![product("77", 4)]), None);
        let req = request(&["dresses"], Some((1000, "abc")));

        let first = h.orchestrator.resolve(&req).await.unwrap();
        let second = h.orchestrator.resolve(&req).await.unwrap();

        assert_eq!(first, second);
        // Second call must be served from the metadata cache alone.
        assert_eq!(h.catalog.catalog_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.catalog.image_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_identical_disambiguators_select_identical_product() {
        let products: Vec<_> = (0..10).map(|i| product(&i.to_string(), 4)).collect();

        // Fresh stores each time, so both runs miss the cache and re-select.
        let a = harness(FakeCatalog::with_products(products.clone()), None)
            .orchestrator
            .resolve(&request(&["dresses"], Some((1000, "abc"))))
            .await
            .unwrap();
        let b = harness(FakeCatalog::with_products(products), None)
            .orchestrator
            .resolve(&request(&["dresses"], Some((1000, "abc"))))
            .await
            .unwrap();

        assert_eq!(a.product_id, b.product_id);
        assert_eq!(a.image_urls, b.image_urls);
    }

    #[tokio::test]
    async fn test_images_cached_once_across_distinct_metadata_keys() {
        // One product, so every draw lands on it regardless of seed.
        let h = harness(FakeCatalog::with_products(vec![product("77", 4)]), None);

        h.orchestrator
            .resolve(&request(&["dresses"], Some((1000, "a"))))
            .await
            .unwrap();
        h.orchestrator
            .resolve(&request(&["dresses"], Some((2000, "b"))))
            .await
            .unwrap();

        // Two metadata entries, but the product's images were only fetched
        // and stored once per role.
        assert_eq!(h.metadata.len().await, 2);
        assert_eq!(h.catalog.image_calls.load(Ordering::SeqCst), 2);
        assert_eq!(h.blobs.len().await, 2);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let h = harness(FakeCatalog::with_products(vec![product("77", 4)]), Some(3600));

        let created = Utc::now() - chrono::Duration::hours(2);
        h.metadata
            .insert_entry(
                "products/dresses.json",
                MetadataEntry {
                    payload: serde_json::json!({
                        "productId": "stale",
                        "productName": "Stale",
                        "productPrice": "$1.00",
                        "imageUrls": []
                    }),
                    created_at: created,
                    expires_at: Some(created + chrono::Duration::hours(1)),
                },
            )
            .await;

        let record = h
            .orchestrator
            .resolve(&request(&["dresses"], None))
            .await
            .unwrap();

        assert_eq!(record.product_id, "77");
        assert_eq!(h.catalog.catalog_calls.load(Ordering::SeqCst), 1);

        // The entry was rewritten with a fresh expiry.
        let entry = h.metadata.get("products/dresses.json").await.unwrap().unwrap();
        assert!(!entry.is_expired(Utc::now()));
    }

    #[tokio::test]
    async fn test_unexpired_entry_served_without_catalog_call() {
        let h = harness(FakeCatalog::with_products(vec![product("77", 4)]), None);

        let cached = ProductRecord {
            product_id: "cached".to_string(),
            product_name: "Cached Dress".to_string(),
            designer_name: None,
            product_price: "$50.00".to_string(),
            image_urls: vec![],
        };
        h.metadata
            .put(
                "products/dresses.json",
                serde_json::to_value(&cached).unwrap(),
                None,
            )
            .await
            .unwrap();

        let record = h
            .orchestrator
            .resolve(&request(&["dresses"], None))
            .await
            .unwrap();

        assert_eq!(record, cached);
        assert_eq!(h.catalog.catalog_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.catalog.image_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_catalog_is_no_products_found() {
        let h = harness(FakeCatalog::with_products(vec![]), None);

        let err = h
            .orchestrator
            .resolve(&request(&["dresses"], None))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoProductsFound { .. }));
    }

    #[tokio::test]
    async fn test_catalog_failure_is_upstream_unavailable() {
        let mut catalog = FakeCatalog::with_products(vec![product("77", 4)]);
        catalog.fail_catalog = true;
        let h = harness(catalog, None);

        let err = h
            .orchestrator
            .resolve(&request(&["dresses"], None))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_product_writes_nothing() {
        let h = harness(FakeCatalog::with_products(vec![product("77", 1)]), None);

        let err = h
            .orchestrator
            .resolve(&request(&["dresses"], Some((1000, "abc"))))
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::MalformedProduct { .. }));
        assert!(h.metadata.is_empty().await);
        assert!(h.blobs.is_empty().await);
    }

    #[tokio::test]
    async fn test_image_fetch_failure_is_non_fatal() {
        let mut catalog = FakeCatalog::with_products(vec![product("77", 4)]);
        catalog.fail_images = true;
        let h = harness(catalog, None);

        let record = h
            .orchestrator
            .resolve(&request(&["dresses"], Some((1000, "abc"))))
            .await
            .unwrap();

        assert_eq!(record.product_id, "77");
        assert!(record.image_urls.is_empty());
        assert!(h.blobs.is_empty().await);
        // The record is still cached, with the failed roles omitted.
        assert_eq!(h.metadata.len().await, 1);
    }

    #[tokio::test]
    async fn test_short_image_list_uses_last_ref_for_detail() {
        let h = harness(FakeCatalog::with_products(vec![product("77", 2)]), None);

        let record = h
            .orchestrator
            .resolve(&request(&["dresses"], Some((1000, "abc"))))
            .await
            .unwrap();

        assert_eq!(record.image_urls.len(), 2);
        assert!(h.blobs.exists("product-images/77-image1.jpg").await.unwrap());
        assert!(h.blobs.exists("product-images/77-image2.jpg").await.unwrap());
    }
}
