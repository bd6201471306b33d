//! Error taxonomy for the outfit resolver
//!
//! Every failure mode maps to a structured HTTP status + JSON body; nothing
//! propagates to the caller unshaped. A failed image fetch is not an error
//! here at all: the orchestrator omits that image role and the request
//! still succeeds.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum ResolveError {
    /// Missing or empty category input
    BadRequest(String),
    /// Catalog returned an empty product list for the category
    NoProductsFound { category: String },
    /// Catalog call failed or returned a non-success status
    UpstreamUnavailable(String),
    /// Selected product lacks the required image references
    MalformedProduct { product_id: String },
    /// Underlying store transport failure
    StoreUnavailable(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::NoProductsFound { category } => {
                write!(f, "No products found for category {}", category)
            }
            Self::UpstreamUnavailable(msg) => write!(f, "Catalog unavailable: {}", msg),
            Self::MalformedProduct { product_id } => {
                write!(f, "Product {} is missing required image data", product_id)
            }
            Self::StoreUnavailable(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<outfit_store::StoreError> for ResolveError {
    fn from(e: outfit_store::StoreError) -> Self {
        Self::StoreUnavailable(e.to_string())
    }
}

impl From<shopbop_api::CatalogError> for ResolveError {
    fn from(e: shopbop_api::CatalogError) -> Self {
        Self::UpstreamUnavailable(e.to_string())
    }
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NoProductsFound { category } => (
                StatusCode::NOT_FOUND,
                format!("No products found for category {}", category),
            ),
            Self::UpstreamUnavailable(msg) => {
                tracing::error!(error = %msg, "Catalog unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error fetching data".to_string(),
                )
            }
            Self::MalformedProduct { product_id } => {
                tracing::error!(product_id = %product_id, "Malformed catalog product");
                (
                    StatusCode::BAD_GATEWAY,
                    "Catalog product is missing required image data".to_string(),
                )
            }
            Self::StoreUnavailable(msg) => {
                tracing::error!(error = %msg, "Store unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error fetching data".to_string(),
                )
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// Result type for resolver operations
pub type Result<T> = std::result::Result<T, ResolveError>;
