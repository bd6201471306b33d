//! Data types for Shopbop catalog responses
//!
//! These structs mirror the catalog's browse API. The catalog is not under
//! our control, so everything beyond the fields we read is left loose.

use serde::{Deserialize, Serialize};

/// Response from `GET /categories/{id}/products`
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

/// A single product as returned by the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub product_sin: String,
    pub short_description: String,
    #[serde(default)]
    pub designer_name: Option<String>,
    pub price: Price,
    #[serde(default)]
    pub colors: Vec<ColorWay>,
}

/// Retail price block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub retail: String,
}

/// One colorway of a product, carrying its image list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorWay {
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// An image source fragment, relative to the image origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
}

impl CatalogProduct {
    /// Image refs for this product: the first colorway's image list.
    pub fn image_refs(&self) -> &[ImageRef] {
        self.colors.first().map(|c| c.images.as_slice()).unwrap_or(&[])
    }
}
