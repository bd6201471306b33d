//! Rust client for the Shopbop retail catalog API
//!
//! Covers the two upstream surfaces this system reads from:
//!
//! - `GET /categories/{id}/products` on the catalog API, with the fixed
//!   client-identification headers the catalog requires
//! - raw image bytes from the fixed image origin host, addressed by the
//!   source fragments embedded in catalog product records
//!
//! # Example
//!
//! ```no_run
//! use shopbop_api::ShopbopClient;
//!
//! # async fn example() -> Result<(), shopbop_api::CatalogError> {
//! let client = ShopbopClient::new();
//! let products = client.category_products("dresses").await?;
//! for product in &products {
//!     println!("{}: {}", product.product_sin, product.short_description);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::ShopbopClient;
pub use error::{CatalogError, Result};
pub use types::{CatalogProduct, ColorWay, ImageRef, Price, ProductsResponse};
