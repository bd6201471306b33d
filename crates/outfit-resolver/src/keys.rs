//! Cache key derivation
//!
//! Metadata keys are scoped by category (and, when supplied, by a digest of
//! the caller's disambiguators). Image keys are scoped by product id and
//! image role only, never by category, so a product surfaced through two
//! different category queries still caches its images exactly once.

use crate::types::Disambiguators;
use sha2::{Digest, Sha256};

/// Prefix for cached product metadata records
const METADATA_PREFIX: &str = "products";
/// Prefix for cached image assets
const IMAGE_PREFIX: &str = "product-images";

/// The two image roles every resolved product carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRole {
    Primary,
    Detail,
}

impl ImageRole {
    pub const ALL: [ImageRole; 2] = [ImageRole::Primary, ImageRole::Detail];

    /// Key suffix for this role
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Primary => "image1",
            Self::Detail => "image2",
        }
    }

    /// Index into a product's image ref list (`len` >= 2). The primary role
    /// is the first shot; the detail role is the fourth when the catalog
    /// provides one, otherwise the last.
    pub fn ref_index(self, len: usize) -> usize {
        match self {
            Self::Primary => 0,
            Self::Detail => 3.min(len - 1),
        }
    }
}

/// Hex digest of the disambiguator pair, stable across runs
fn disambiguator_digest(disambiguators: &Disambiguators) -> String {
    let mut hasher = Sha256::new();
    hasher.update(
        format!("{}:{}", disambiguators.timestamp, disambiguators.seed).as_bytes(),
    );
    hex::encode(hasher.finalize())
}

/// Metadata cache key for a category selection
///
/// Without disambiguators the key is shared per category, so all callers
/// hitting that category share one entry. With disambiguators, the key also
/// carries a truncated digest of the pair, giving each distinct draw its
/// own entry.
pub fn metadata_cache_key(
    category: &str,
    disambiguators: Option<&Disambiguators>,
) -> String {
    match disambiguators {
        None => format!("{}/{}.json", METADATA_PREFIX, category),
        Some(d) => {
            let digest = disambiguator_digest(d);
            format!("{}/{}-{}.json", METADATA_PREFIX, category, &digest[..16])
        }
    }
}

/// Image cache key for a product's image role
///
/// The extension is carried over from the source fragment (`.png` stays,
/// anything else becomes `.jpg`) so content type can be inferred from the
/// key alone.
pub fn image_cache_key(product_id: &str, role: ImageRole, src: &str) -> String {
    format!(
        "{}/{}-{}{}",
        IMAGE_PREFIX,
        product_id,
        role.suffix(),
        image_ext(src)
    )
}

fn image_ext(src: &str) -> &'static str {
    match src.rsplit_once('.') {
        Some((_, ext)) if ext.eq_ignore_ascii_case("png") => ".png",
        _ => ".jpg",
    }
}

/// Content type for an image key, inferred from its suffix
pub fn content_type_for_key(key: &str) -> &'static str {
    if key.to_ascii_lowercase().ends_with(".jpg") {
        "image/jpeg"
    } else {
        "image/png"
    }
}
