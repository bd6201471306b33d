//! Core types for the outfit resolver

use serde::{Deserialize, Serialize};

/// The resolved product returned to callers and cached in the metadata
/// store. Image URLs point at cached, publicly retrievable copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub product_id: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designer_name: Option<String>,
    pub product_price: String,
    pub image_urls: Vec<String>,
}

/// Caller-supplied values that make product selection deterministic and
/// replayable. Identical disambiguators always select the identical product
/// from the same catalog response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disambiguators {
    pub timestamp: i64,
    pub seed: String,
}

/// A parsed selection request
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub categories: Vec<String>,
    pub disambiguators: Option<Disambiguators>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}
