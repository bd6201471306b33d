//! Store types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope for a cached metadata record
///
/// `expires_at`, when present, is always `created_at` plus the TTL the entry
/// was written with. Expiry is advisory: the store returns expired entries
/// as-is and the caller decides whether to honor them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEntry {
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl MetadataEntry {
    /// Whether the entry is past its expiry at `now`. Entries with no
    /// expiry never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }
}
