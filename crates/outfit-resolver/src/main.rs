//! Outfit Resolver - caching product resolver service
//!
//! Fronts the Shopbop catalog with an S3-backed metadata cache and image
//! cache and serves resolved products over HTTP.

use aws_config::BehaviorVersion;
use outfit_resolver::{
    start_server, CacheOrchestrator, Config, ServerState, SharedState, StorageBackend,
};
use outfit_store::{
    BlobStore, MemoryBlobStore, MemoryMetadataStore, MetadataStore, S3BlobStore, S3MetadataStore,
};
use shopbop_api::ShopbopClient;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let env_filter =
        EnvFilter::from_default_env().add_directive("outfit_resolver=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Outfit Resolver...");

    let config = Config::from_env();
    info!("Port: {}", config.port);
    info!("Bucket: {}", config.bucket);
    info!("Storage backend: {:?}", config.storage_backend);
    match config.cache_ttl_secs {
        Some(secs) => info!("Metadata cache TTL: {} seconds", secs),
        None => info!("Metadata cache TTL: none (entries never expire)"),
    }

    let catalog = Arc::new(ShopbopClient::with_base_urls(
        config.catalog_base_url.clone(),
        config.image_base_url.clone(),
    ));

    let (blobs, metadata): (Arc<dyn BlobStore>, Arc<dyn MetadataStore>) =
        match config.storage_backend {
            StorageBackend::S3 => {
                let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
                let s3 = aws_sdk_s3::Client::new(&sdk_config);
                (
                    Arc::new(S3BlobStore::new(
                        s3.clone(),
                        config.bucket.clone(),
                        config.public_base_url.clone(),
                    )),
                    Arc::new(S3MetadataStore::new(s3, config.bucket.clone())),
                )
            }
            StorageBackend::Memory => {
                let public_base = config
                    .public_base_url
                    .clone()
                    .unwrap_or_else(|| format!("https://{}", config.bucket));
                (
                    Arc::new(MemoryBlobStore::new(public_base)),
                    Arc::new(MemoryMetadataStore::new()),
                )
            }
        };

    let orchestrator = CacheOrchestrator::new(catalog, blobs, metadata, config.cache_ttl_secs);
    let state: SharedState = Arc::new(ServerState::new(orchestrator));

    start_server(state, config.port).await?;

    Ok(())
}
