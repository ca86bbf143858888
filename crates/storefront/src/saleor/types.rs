//! Domain types for the Saleor API.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! types in `api::queries`.

use serde::{Deserialize, Serialize};

use driftwood_core::{
    Availability, CategoryId, CheckoutId, CheckoutLineId, MediaId, Money, MoneyRange, ProductId,
    VariantId,
};

// =============================================================================
// Media Types
// =============================================================================

/// A standalone image (thumbnails).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt: Option<String>,
}

/// Kind of product media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Video,
}

/// An entry in the product gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub id: MediaId,
    pub url: String,
    /// Alt text; the API returns an empty string when unset.
    pub alt: Option<String>,
    pub kind: MediaKind,
}

// =============================================================================
// Product Types
// =============================================================================

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Product-level pricing in a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPricing {
    /// Gross price range across variants.
    pub price_range: Option<MoneyRange>,
}

/// Variant-level pricing in a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPricing {
    /// Current gross price.
    pub price: Option<Money>,
    /// Gross price before discounts.
    pub price_undiscounted: Option<Money>,
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub name: String,
    /// Stock the channel can sell; `None` when the API hides it.
    pub quantity_available: Option<i64>,
    pub pricing: Option<VariantPricing>,
}

impl ProductVariant {
    /// Whether the API reports sellable stock for this variant.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        Availability::from_quantity(self.quantity_available).is_in_stock()
    }

    /// Current gross price, if priced in this channel.
    #[must_use]
    pub fn price(&self) -> Option<&Money> {
        self.pricing.as_ref().and_then(|p| p.price.as_ref())
    }
}

/// A product as needed by the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    /// Raw Editor.js document as a JSON string.
    pub description: Option<String>,
    pub thumbnail: Option<Image>,
    pub media: Vec<Media>,
    pub category: Option<Category>,
    /// `None` when the API withholds variants (e.g., not visible in channel).
    pub variants: Option<Vec<ProductVariant>>,
    pub pricing: Option<ProductPricing>,
}

impl Product {
    /// Variants, or an empty slice when none were returned.
    #[must_use]
    pub fn variants(&self) -> &[ProductVariant] {
        self.variants.as_deref().unwrap_or_default()
    }

    /// Gross price range across variants.
    #[must_use]
    pub fn price_range(&self) -> Option<&MoneyRange> {
        self.pricing.as_ref().and_then(|p| p.price_range.as_ref())
    }
}

/// A product entry in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListItem {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub thumbnail: Option<Image>,
}

// =============================================================================
// Checkout Types
// =============================================================================

/// A line in a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub id: CheckoutLineId,
    pub quantity: i64,
    pub variant_id: VariantId,
    pub variant_name: String,
    pub product_name: String,
    pub total_price: Option<Money>,
}

/// A cart/order-in-progress held by the commerce backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub id: CheckoutId,
    pub lines: Vec<CheckoutLine>,
    pub total_price: Option<Money>,
}

impl Checkout {
    /// Total number of items across lines.
    #[must_use]
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}
