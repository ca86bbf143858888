//! Conversions from wire types to domain types.

use driftwood_core::{
    CategoryId, CheckoutId, CheckoutLineId, MediaId, Money, MoneyRange, ProductId, VariantId,
};

use crate::saleor::SaleorError;
use crate::saleor::types::{
    Category, Checkout, CheckoutLine, Image, Media, MediaKind, Product, ProductListItem,
    ProductPricing, ProductVariant, VariantPricing,
};

use super::queries::{
    CheckoutDetails, CheckoutErrorFields, ImageFields, MoneyFields, ProductMediaType,
    TaxedMoneyFields, product_details, product_list,
};

fn convert_money(money: MoneyFields) -> Result<Money, SaleorError> {
    Money::from_f64(money.amount, &money.currency)
        .map_err(|e| SaleorError::InvalidResponse(e.to_string()))
}

fn convert_gross(money: Option<TaxedMoneyFields>) -> Result<Option<Money>, SaleorError> {
    money.map(|m| convert_money(m.gross)).transpose()
}

fn convert_image(image: ImageFields) -> Image {
    Image {
        url: image.url,
        alt: non_empty(image.alt),
    }
}

/// Saleor returns `""` for unset alt text and SEO fields.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Product Conversions
// =============================================================================

/// Convert a `ProductDetails` product.
///
/// Video media is kept out of the gallery, which only renders images.
pub fn convert_product(
    product: product_details::ProductDetailsProduct,
) -> Result<Product, SaleorError> {
    let variants = product
        .variants
        .map(|variants| {
            variants
                .into_iter()
                .map(convert_variant)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let pricing = product
        .pricing
        .map(|pricing| {
            let price_range = pricing
                .price_range
                .map(|range| {
                    Ok::<_, SaleorError>(MoneyRange::new(
                        convert_gross(range.start)?,
                        convert_gross(range.stop)?,
                    ))
                })
                .transpose()?;
            Ok::<_, SaleorError>(ProductPricing { price_range })
        })
        .transpose()?;

    let media = product
        .media
        .unwrap_or_default()
        .into_iter()
        .filter_map(|media| {
            let kind = match media.kind {
                ProductMediaType::Image => MediaKind::Image,
                ProductMediaType::Video => MediaKind::Video,
                ProductMediaType::Other => return None,
            };
            Some(Media {
                id: MediaId::new(media.id),
                url: media.url,
                alt: non_empty(Some(media.alt)),
                kind,
            })
        })
        .filter(|media| media.kind == MediaKind::Image)
        .collect();

    Ok(Product {
        id: ProductId::new(product.id),
        name: product.name,
        slug: product.slug,
        seo_title: non_empty(product.seo_title),
        seo_description: non_empty(product.seo_description),
        description: non_empty(product.description),
        thumbnail: product.thumbnail.map(convert_image),
        media,
        category: product.category.map(|c| Category {
            id: CategoryId::new(c.id),
            name: c.name,
        }),
        variants,
        pricing,
    })
}

fn convert_variant(
    variant: product_details::ProductDetailsVariant,
) -> Result<ProductVariant, SaleorError> {
    let pricing = variant
        .pricing
        .map(|pricing| {
            Ok::<_, SaleorError>(VariantPricing {
                price: convert_gross(pricing.price)?,
                price_undiscounted: convert_gross(pricing.price_undiscounted)?,
            })
        })
        .transpose()?;

    Ok(ProductVariant {
        id: VariantId::new(variant.id),
        name: variant.name,
        quantity_available: variant.quantity_available,
        pricing,
    })
}

/// Convert a `ProductList` connection.
pub fn convert_product_list(data: product_list::ResponseData) -> Vec<ProductListItem> {
    data.products
        .map(|connection| {
            connection
                .edges
                .into_iter()
                .map(|edge| ProductListItem {
                    id: ProductId::new(edge.node.id),
                    name: edge.node.name,
                    slug: edge.node.slug,
                    thumbnail: edge.node.thumbnail.map(convert_image),
                })
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// Checkout Conversions
// =============================================================================

pub fn convert_checkout(checkout: CheckoutDetails) -> Result<Checkout, SaleorError> {
    let lines = checkout
        .lines
        .into_iter()
        .map(|line| {
            Ok::<_, SaleorError>(CheckoutLine {
                id: CheckoutLineId::new(line.id),
                quantity: line.quantity,
                variant_id: VariantId::new(line.variant.id),
                variant_name: line.variant.name,
                product_name: line.variant.product.name,
                total_price: convert_gross(line.total_price)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Checkout {
        id: CheckoutId::new(checkout.id),
        lines,
        total_price: convert_gross(checkout.total_price)?,
    })
}

/// Join mutation errors into a single `UserError`.
pub fn convert_checkout_errors(errors: Vec<CheckoutErrorFields>) -> SaleorError {
    SaleorError::UserError(
        errors
            .into_iter()
            .map(|e| {
                let message = e.message.unwrap_or(e.code);
                match e.field {
                    Some(field) => format!("{field}: {message}"),
                    None => message,
                }
            })
            .collect::<Vec<_>>()
            .join("; "),
    )
}
