//! Store adapters for the outfit resolver
//!
//! Two external stores, both behind trait seams so the orchestrator takes
//! them by injection:
//!
//! - [`BlobStore`]: binary image assets, keyed by string, addressable via a
//!   deterministic public URL
//! - [`MetadataStore`]: JSON records in a `created_at`/`expires_at` envelope
//!   with advisory expiry enforced by the caller
//!
//! The production implementations ([`S3BlobStore`], [`S3MetadataStore`])
//! share one `aws_sdk_s3::Client` built at startup. The in-memory
//! implementations back tests and local development.

mod blob;
mod error;
mod metadata;
mod types;

pub use blob::{BlobStore, MemoryBlobStore, S3BlobStore};
pub use error::{Result, StoreError};
pub use metadata::{MemoryMetadataStore, MetadataStore, S3MetadataStore};
pub use types::MetadataEntry;
