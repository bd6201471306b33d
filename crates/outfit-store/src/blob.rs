//! Blob store: binary objects addressable by key and public URL

use crate::error::{Result, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Binary object storage keyed by string, addressable via public URL
///
/// `put` is an unconditional overwrite; callers wanting write-once semantics
/// do their own `exists` check first. Concurrent writers racing on the same
/// key therefore just overwrite each other, which is harmless when the
/// content is identical.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Whether an object exists at `key`. Errors only on genuine
    /// transport/auth failures, never on not-found.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Write an object, overwriting any existing one.
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        cache_control: &str,
    ) -> Result<()>;

    /// Deterministic public URL for `key`. Pure construction, no network.
    fn public_url(&self, key: &str) -> String;
}

/// S3-backed blob store
#[derive(Clone)]
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base: Option<String>,
}

impl S3BlobStore {
    /// Create a store against an existing S3 client
    ///
    /// `public_base` overrides the default `https://{bucket}/{key}` URL
    /// convention, for buckets fronted by a CDN.
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base: Option<String>) -> Self {
        Self {
            client,
            bucket,
            public_base,
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                if e.as_service_error().map(|se| se.is_not_found()).unwrap_or(false) {
                    return Ok(false);
                }
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "S3 head_object failed"
                );
                Err(StoreError::Transport(e.to_string()))
            }
        }
    }

    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        cache_control: &str,
    ) -> Result<()> {
        let size = bytes.len() as u64;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from(bytes))
            .content_type(content_type)
            .cache_control(cache_control)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    "S3 put_object failed"
                );
                StoreError::Transport(e.to_string())
            })?;

        tracing::debug!(bucket = %self.bucket, key = %key, size_bytes = size, "Stored blob");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        match &self.public_base {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!("https://{}/{}", self.bucket, key),
        }
    }
}

struct StoredBlob {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory blob store for tests and local development
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: RwLock<HashMap<String, StoredBlob>>,
    public_base: String,
}

impl MemoryBlobStore {
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            public_base: public_base.into(),
        }
    }

    /// Content type recorded for a stored object, if any
    pub async fn content_type(&self, key: &str) -> Option<String> {
        let objects = self.objects.read().await;
        objects.get(key).map(|b| b.content_type.clone())
    }

    /// Number of stored objects
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }

    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        _cache_control: &str,
    ) -> Result<()> {
        let mut objects = self.objects.write().await;
        objects.insert(
            key.to_string(),
            StoredBlob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base.trim_end_matches('/'), key)
    }
}
