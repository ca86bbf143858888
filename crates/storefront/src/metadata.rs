//! Page metadata and schema.org structured data for product pages.

use serde_json::{Map, Value, json};

use driftwood_core::Availability;

use crate::saleor::{Product, ProductVariant};

/// Open Graph image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OgImage {
    pub url: String,
    pub alt: String,
}

/// Values for the document `<head>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    /// Absolute canonical URL; only set when a storefront URL is configured.
    pub canonical: Option<String>,
    pub og_image: Option<OgImage>,
}

/// Build the `<head>` metadata for a product page.
///
/// `selected` is the variant resolved from the query string, if any.
#[must_use]
pub fn page_metadata(
    product: &Product,
    selected: Option<&ProductVariant>,
    site_name: &str,
    storefront_url: Option<&str>,
) -> PageMetadata {
    let base = product.seo_title.as_deref().unwrap_or(&product.name);
    let base = match selected {
        Some(variant) => format!("{base} - {}", variant.name),
        None => base.to_string(),
    };

    let description = product.seo_description.clone().unwrap_or_else(|| base.clone());

    let canonical = storefront_url.map(|url| {
        format!(
            "{}/products/{}",
            url.trim_end_matches('/'),
            urlencoding::encode(&product.slug)
        )
    });

    let og_image = product.thumbnail.as_ref().map(|image| OgImage {
        url: image.url.clone(),
        alt: product.name.clone(),
    });

    PageMetadata {
        title: format!("{base} | {site_name}"),
        description,
        canonical,
        og_image,
    }
}

/// Build the schema.org `Product` document.
///
/// A selected variant yields a single `Offer`; otherwise the product's
/// price range becomes an `AggregateOffer`. Missing values are omitted.
#[must_use]
pub fn product_json_ld(
    product: &Product,
    selected: Option<&ProductVariant>,
    available: bool,
) -> Value {
    let mut doc = Map::new();
    doc.insert("@context".into(), json!("https://schema.org"));
    doc.insert("@type".into(), json!("Product"));

    if let Some(image) = &product.thumbnail {
        doc.insert("image".into(), json!(image.url));
    }

    let mut offers = Map::new();

    if let Some(variant) = selected {
        let name = format!("{} - {}", product.name, variant.name);
        let description = product.seo_description.clone().unwrap_or_else(|| name.clone());
        doc.insert("name".into(), json!(name));
        doc.insert("description".into(), json!(description));

        offers.insert("@type".into(), json!("Offer"));
        offers.insert(
            "availability".into(),
            json!(Availability::from_flag(variant.in_stock()).schema_org_url()),
        );
        if let Some(price) = variant.price() {
            offers.insert("priceCurrency".into(), json!(price.currency));
            offers.insert("price".into(), json!(price.decimal_string()));
        }
    } else {
        let description = product
            .seo_description
            .clone()
            .unwrap_or_else(|| product.name.clone());
        doc.insert("name".into(), json!(product.name));
        doc.insert("description".into(), json!(description));

        offers.insert("@type".into(), json!("AggregateOffer"));
        offers.insert(
            "availability".into(),
            json!(Availability::from_flag(available).schema_org_url()),
        );
        if let Some(range) = product.price_range() {
            let currency = range
                .start
                .as_ref()
                .or(range.stop.as_ref())
                .map(|m| m.currency.clone());
            if let Some(currency) = currency {
                offers.insert("priceCurrency".into(), json!(currency));
            }
            if let Some(low) = &range.start {
                offers.insert("lowPrice".into(), json!(low.decimal_string()));
            }
            if let Some(high) = &range.stop {
                offers.insert("highPrice".into(), json!(high.decimal_string()));
            }
        }
    }

    doc.insert("offers".into(), Value::Object(offers));
    Value::Object(doc)
}

/// Serialize JSON for embedding in a `<script>` element.
///
/// `<`, `>` and `&` are emitted as unicode escapes so that product text
/// can't close the script tag.
#[must_use]
pub fn json_ld_script_body(value: &Value) -> String {
    let mut out = String::new();
    for c in value.to_string().chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            c => out.push(c),
        }
    }
    out
}
