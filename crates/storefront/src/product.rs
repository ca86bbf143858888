//! Product detail page logic.
//!
//! Everything here is pure: it takes an already-fetched [`Product`] plus the
//! request's query parameters and decides what the page shows.

use driftwood_core::VariantId;

use crate::saleor::{Product, ProductVariant};

/// Find the variant named by the `variant` query parameter.
///
/// Matching is exact on the opaque ID. An unknown ID selects nothing.
#[must_use]
pub fn resolve_selected_variant<'a>(
    variants: &'a [ProductVariant],
    requested: Option<&str>,
) -> Option<&'a ProductVariant> {
    let requested = requested?;
    variants.iter().find(|v| v.id.as_str() == requested)
}

/// Whether any variant has sellable stock.
#[must_use]
pub fn is_available(variants: &[ProductVariant]) -> bool {
    variants.iter().any(ProductVariant::in_stock)
}

/// The price line shown under the product name.
///
/// A priced, selected variant shows its own price. Otherwise an available
/// product shows its price range, and an unavailable one shows nothing.
#[must_use]
pub fn display_price(
    product: &Product,
    selected: Option<&ProductVariant>,
    available: bool,
) -> String {
    if let Some(price) = selected.and_then(ProductVariant::price) {
        return price.format();
    }

    if available {
        return product
            .price_range()
            .map(driftwood_core::MoneyRange::format)
            .unwrap_or_default();
    }

    String::new()
}

/// Whether the add-to-cart button is enabled.
///
/// Requires a requested variant that resolved and has stock.
#[must_use]
pub fn can_add_to_cart(requested: Option<&str>, selected: Option<&ProductVariant>) -> bool {
    requested.is_some_and(|id| !id.is_empty()) && selected.is_some_and(ProductVariant::in_stock)
}

/// The variant to redirect to when nothing is selected.
///
/// A product with exactly one in-stock variant has nothing to choose, so the
/// page selects it for the shopper.
#[must_use]
pub fn single_variant_redirect<'a>(
    variants: &'a [ProductVariant],
    selected: Option<&ProductVariant>,
) -> Option<&'a VariantId> {
    if selected.is_some() {
        return None;
    }
    match variants {
        [only] if only.in_stock() => Some(&only.id),
        _ => None,
    }
}

/// Path of the product page in a channel.
#[must_use]
pub fn product_href(channel: &str, slug: &str) -> String {
    format!(
        "/{}/products/{}",
        urlencoding::encode(channel),
        urlencoding::encode(slug)
    )
}

/// Path of the product page with a variant selected.
#[must_use]
pub fn variant_href(channel: &str, slug: &str, variant_id: &VariantId) -> String {
    format!(
        "{}?variant={}",
        product_href(channel, slug),
        urlencoding::encode(variant_id.as_str())
    )
}

/// One choice in the variant selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOption {
    pub name: String,
    /// Link that selects this variant; `#` when it can't be chosen.
    pub href: String,
    pub checked: bool,
    pub disabled: bool,
}

/// Build the variant selector.
///
/// Returns an empty list when there is at most one variant, in which case
/// the selector is not shown.
#[must_use]
pub fn variant_options(
    channel: &str,
    slug: &str,
    variants: &[ProductVariant],
    selected: Option<&ProductVariant>,
) -> Vec<VariantOption> {
    if variants.len() <= 1 {
        return Vec::new();
    }

    variants
        .iter()
        .map(|variant| {
            let disabled = !variant.in_stock();
            VariantOption {
                name: variant.name.clone(),
                href: if disabled {
                    "#".to_string()
                } else {
                    variant_href(channel, slug, &variant.id)
                },
                checked: selected.is_some_and(|s| s.id == variant.id),
                disabled,
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use driftwood_core::{Money, MoneyRange, ProductId};
    use rust_decimal::Decimal;

    use crate::saleor::{Image, Product, ProductPricing, ProductVariant, VariantPricing};

    use super::VariantId;

    pub fn usd(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), "USD")
    }

    pub fn variant(id: &str, name: &str, stock: Option<i64>, cents: Option<i64>) -> ProductVariant {
        ProductVariant {
            id: VariantId::new(id),
            name: name.to_string(),
            quantity_available: stock,
            pricing: Some(VariantPricing {
                price: cents.map(usd),
                price_undiscounted: None,
            }),
        }
    }

    pub fn product(variants: Vec<ProductVariant>) -> Product {
        Product {
            id: ProductId::new("UHJvZHVjdDox"),
            name: "Monospace Tee".to_string(),
            slug: "monospace-tee".to_string(),
            seo_title: None,
            seo_description: None,
            description: None,
            thumbnail: Some(Image {
                url: "https://cdn.example.com/tee.webp".to_string(),
                alt: None,
            }),
            media: Vec::new(),
            category: None,
            variants: Some(variants),
            pricing: Some(ProductPricing {
                price_range: Some(MoneyRange::new(Some(usd(1500)), Some(usd(2500)))),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::fixtures::{product, variant};
    use super::*;

    #[test]
    fn test_resolve_selected_variant() {
        let variants = vec![variant("a", "S", Some(1), None), variant("b", "M", Some(1), None)];

        let selected = resolve_selected_variant(&variants, Some("b"));
        assert_eq!(selected.map(|v| v.name.as_str()), Some("M"));
        assert!(resolve_selected_variant(&variants, Some("zzz")).is_none());
        assert!(resolve_selected_variant(&variants, None).is_none());
    }

    #[test]
    fn test_is_available() {
        assert!(!is_available(&[]));
        assert!(!is_available(&[variant("a", "S", Some(0), None)]));
        assert!(!is_available(&[variant("a", "S", None, None)]));
        assert!(is_available(&[
            variant("a", "S", Some(0), None),
            variant("b", "M", Some(2), None),
        ]));
    }

    #[test]
    fn test_display_price_prefers_selected_variant() {
        let variants = vec![variant("a", "S", Some(1), Some(1500))];
        let product = product(variants.clone());

        assert_eq!(display_price(&product, variants.first(), true), "$15.00");
    }

    #[test]
    fn test_display_price_falls_back_to_range() {
        let unpriced = variant("a", "S", Some(1), None);
        let product = product(vec![unpriced.clone()]);

        assert_eq!(display_price(&product, None, true), "$15.00 - $25.00");
        assert_eq!(display_price(&product, Some(&unpriced), true), "$15.00 - $25.00");
    }

    #[test]
    fn test_display_price_empty_when_unavailable() {
        let product = product(vec![variant("a", "S", Some(0), None)]);
        assert_eq!(display_price(&product, None, false), "");
    }

    #[test]
    fn test_can_add_to_cart() {
        let in_stock = variant("a", "S", Some(3), None);
        let sold_out = variant("b", "M", Some(0), None);

        assert!(can_add_to_cart(Some("a"), Some(&in_stock)));
        assert!(!can_add_to_cart(Some("b"), Some(&sold_out)));
        assert!(!can_add_to_cart(Some("zzz"), None));
        assert!(!can_add_to_cart(None, None));
    }

    #[test]
    fn test_single_variant_redirect() {
        let only = vec![variant("a", "Default", Some(5), None)];
        assert_eq!(
            single_variant_redirect(&only, None).map(VariantId::as_str),
            Some("a")
        );

        // Already selected
        assert!(single_variant_redirect(&only, only.first()).is_none());

        // Sold out
        let sold_out = vec![variant("a", "Default", Some(0), None)];
        assert!(single_variant_redirect(&sold_out, None).is_none());

        // Several to choose from
        let several = vec![variant("a", "S", Some(1), None), variant("b", "M", Some(1), None)];
        assert!(single_variant_redirect(&several, None).is_none());
    }

    #[test]
    fn test_variant_href_encodes_components() {
        let href = variant_href(
            "default-channel",
            "café tee",
            &VariantId::new("UHJvZHVjdFZhcmlhbnQ6MQ=="),
        );
        assert_eq!(
            href,
            "/default-channel/products/caf%C3%A9%20tee?variant=UHJvZHVjdFZhcmlhbnQ6MQ%3D%3D"
        );
    }

    #[test]
    fn test_variant_options() {
        let variants = vec![variant("a", "S", Some(1), None), variant("b", "M", Some(0), None)];
        let options = variant_options("ch", "tee", &variants, variants.first());

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].href, "/ch/products/tee?variant=a");
        assert!(options[0].checked);
        assert!(!options[0].disabled);
        assert_eq!(options[1].href, "#");
        assert!(!options[1].checked);
        assert!(options[1].disabled);
    }

    #[test]
    fn test_variant_options_hidden_for_single_variant() {
        let variants = vec![variant("a", "S", Some(1), None)];
        assert!(variant_options("ch", "tee", &variants, None).is_empty());
    }
}
