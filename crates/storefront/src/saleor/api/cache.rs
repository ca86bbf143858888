//! Cache types for Saleor API responses.

use crate::saleor::types::{Product, ProductListItem};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    ProductList(Vec<ProductListItem>),
}

/// Cache key for a product in a channel.
pub fn product_key(slug: &str, channel: &str) -> String {
    format!("product:{channel}:{slug}")
}

/// Cache key for a product listing page.
pub fn product_list_key(first: i64, channel: &str) -> String {
    format!("products:{channel}:{first}")
}
