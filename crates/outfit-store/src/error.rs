//! Error types for the store adapters

use std::fmt;

/// Errors surfaced by the blob and metadata store adapters
///
/// Not-found is never an error: lookups report absence through their return
/// value. `Transport` covers genuine transport/auth failures only.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying store transport or auth failure
    Transport(String),
    /// Stored payload could not be encoded or decoded
    Serialization(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Store transport error: {}", msg),
            Self::Serialization(e) => write!(f, "Store serialization error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialization(e) => Some(e),
            Self::Transport(_) => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
