//! Error types for the Shopbop API client

use std::fmt;

/// Errors that can occur when talking to the Shopbop catalog or image origin
#[derive(Debug)]
pub enum CatalogError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Upstream returned a non-success status
    Status(u16),
    /// Failed to parse JSON response
    Json(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Shopbop HTTP error: {}", e),
            Self::Status(code) => write!(f, "Shopbop returned status {}", code),
            Self::Json(e) => write!(f, "Shopbop JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for Shopbop API operations
pub type Result<T> = std::result::Result<T, CatalogError>;
