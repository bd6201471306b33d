//! Metadata store: structured records keyed by string with advisory expiry

use crate::error::{Result, StoreError};
use crate::types::MetadataEntry;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Structured key-value storage with optional advisory expiry
///
/// `put` stamps the entry with `created_at` and, when a TTL is supplied,
/// `expires_at = created_at + ttl`. Expiry is metadata only: `get` returns
/// expired entries and the caller enforces the policy. Nothing is ever
/// deleted server-side by this system.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Fetch the entry at `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<MetadataEntry>>;

    /// Write `payload` at `key`, overwriting any existing entry.
    async fn put(&self, key: &str, payload: serde_json::Value, ttl_secs: Option<u64>)
        -> Result<()>;
}

fn stamp(payload: serde_json::Value, ttl_secs: Option<u64>) -> MetadataEntry {
    let created_at = Utc::now();
    MetadataEntry {
        payload,
        created_at,
        expires_at: ttl_secs.map(|secs| created_at + Duration::seconds(secs as i64)),
    }
}

/// S3-backed metadata store: one JSON envelope object per key
#[derive(Clone)]
pub struct S3MetadataStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3MetadataStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl MetadataStore for S3MetadataStore {
    async fn get(&self, key: &str) -> Result<Option<MetadataEntry>> {
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                if e.as_service_error().map(|se| se.is_no_such_key()).unwrap_or(false) {
                    return Ok(None);
                }
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "S3 get_object failed"
                );
                return Err(StoreError::Transport(e.to_string()));
            }
        };

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?
            .into_bytes();

        let entry: MetadataEntry = serde_json::from_slice(&bytes)?;
        tracing::debug!(bucket = %self.bucket, key = %key, "Metadata entry read");
        Ok(Some(entry))
    }

    async fn put(
        &self,
        key: &str,
        payload: serde_json::Value,
        ttl_secs: Option<u64>,
    ) -> Result<()> {
        let entry = stamp(payload, ttl_secs);
        let body = serde_json::to_vec(&entry)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from(body))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "S3 put_object failed"
                );
                StoreError::Transport(e.to_string())
            })?;

        tracing::debug!(bucket = %self.bucket, key = %key, "Metadata entry written");
        Ok(())
    }
}

/// In-memory metadata store for tests and local development
#[derive(Default)]
pub struct MemoryMetadataStore {
    entries: RwLock<HashMap<String, MetadataEntry>>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed entry, bypassing timestamping. Lets tests plant
    /// entries with arbitrary `created_at`/`expires_at`.
    pub async fn insert_entry(&self, key: &str, entry: MetadataEntry) {
        self.entries.write().await.insert(key.to_string(), entry);
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn get(&self, key: &str) -> Result<Option<MetadataEntry>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(
        &self,
        key: &str,
        payload: serde_json::Value,
        ttl_secs: Option<u64>,
    ) -> Result<()> {
        let entry = stamp(payload, ttl_secs);
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }
}
