//! Outfit Resolver - caching front for the Shopbop catalog
//!
//! Resolves "pick me a product from these categories" requests against an
//! S3-backed metadata cache and image cache, calling the catalog and image
//! origin only on miss. Callers may supply a timestamp/seed pair to make
//! the draw deterministic and replayable.

pub mod config;
pub mod error;
pub mod keys;
pub mod orchestrator;
pub mod selection;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{Config, StorageBackend};
pub use error::{ResolveError, Result};
pub use orchestrator::{CacheOrchestrator, CatalogSource};
pub use server::{create_router, start_server, ServerState, SharedState};
pub use types::{Disambiguators, HealthResponse, ProductRecord, ResolveRequest};
