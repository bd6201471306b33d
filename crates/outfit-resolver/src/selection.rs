//! Selection policy
//!
//! Two draw modes. Without disambiguators, draws are uniformly random per
//! request. With disambiguators, the index comes from a SHA-256 digest of
//! the pair, so the same inputs pick the same element on every run and on
//! every platform — unlike language-provided hashers, which are not stable
//! across processes.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Uniformly random index into a collection of `len` elements.
///
/// `len` must be non-zero; callers check emptiness first.
pub fn random_index(len: usize) -> usize {
    rand::rng().random_range(0..len)
}

/// Deterministic index into a collection of `len` elements.
///
/// The index is the big-endian u64 of the first 8 bytes of
/// `SHA-256("{timestamp}:{seed}")`, reduced modulo `len`. Pure function of
/// its inputs. `len` must be non-zero; callers check emptiness first.
pub fn deterministic_index(len: usize, timestamp: i64, seed: &str) -> usize {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}", timestamp, seed).as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(prefix) % len as u64) as usize
}
