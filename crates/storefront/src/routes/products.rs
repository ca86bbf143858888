//! Product route handlers.
//!
//! Checkout IDs are stored in the session, one per channel, and point at
//! Saleor checkouts.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use driftwood_core::VariantId;

use crate::description::render_description;
use crate::error::{AppError, Result, add_breadcrumb, set_sentry_channel};
use crate::filters;
use crate::gallery::GalleryView;
use crate::metadata::{PageMetadata, json_ld_script_body, page_metadata, product_json_ld};
use crate::middleware::{CspNonce, session};
use crate::product::{
    VariantOption, can_add_to_cart, display_price, is_available, product_href,
    resolve_selected_variant, single_variant_redirect, variant_href, variant_options,
};
use crate::state::AppState;

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters of the product page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub variant: Option<String>,
    /// Gallery image index. Kept as text so junk falls back to the first image.
    pub image: Option<String>,
}

impl ProductQuery {
    fn variant(&self) -> Option<&str> {
        self.variant.as_deref().filter(|v| !v.is_empty())
    }

    fn image(&self) -> Option<usize> {
        self.image.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Query parameters of the add-to-cart action.
#[derive(Debug, Default, Deserialize)]
pub struct AddItemQuery {
    pub variant: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Shared header state.
pub struct LayoutView {
    pub site_name: String,
    pub channel: String,
    pub nonce: String,
    pub cart_quantity: i64,
}

/// Product list entry for templates.
pub struct ProductCardView {
    pub name: String,
    pub href: String,
    pub thumbnail_url: Option<String>,
    pub thumbnail_alt: String,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub layout: LayoutView,
    pub title: String,
    pub products: Vec<ProductCardView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub layout: LayoutView,
    pub meta: PageMetadata,
    pub name: String,
    pub category: Option<String>,
    pub price: String,
    pub available: bool,
    pub gallery: GalleryView,
    pub variant_options: Vec<VariantOption>,
    pub can_add_to_cart: bool,
    pub add_action: String,
    pub description: Option<Vec<String>>,
    pub json_ld: String,
}

// =============================================================================
// Helpers
// =============================================================================

/// Number of items in the shopper's checkout for a channel.
///
/// Failures only hide the badge; they never fail the page.
async fn cart_quantity(state: &AppState, session: &Session, channel: &str) -> i64 {
    let id = match session::checkout_id(session, channel).await {
        Ok(Some(id)) => id,
        Ok(None) => return 0,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read checkout ID from session");
            return 0;
        }
    };

    match state.saleor().checkout_find(&id).await {
        Ok(checkout) => checkout.map_or(0, |c| c.total_quantity()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load checkout for cart badge");
            0
        }
    }
}

async fn layout(state: &AppState, session: &Session, channel: &str, nonce: CspNonce) -> LayoutView {
    LayoutView {
        site_name: state.config().site_name.clone(),
        channel: channel.to_string(),
        nonce: nonce.0,
        cart_quantity: cart_quantity(state, session, channel).await,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product listing for a channel.
#[instrument(skip(state, session, nonce))]
pub async fn index(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    session: Session,
    nonce: CspNonce,
) -> Result<impl IntoResponse> {
    set_sentry_channel(&channel);

    let first = state.config().saleor.prerender_count;
    let products = state
        .saleor()
        .product_list(first, &channel)
        .await?
        .into_iter()
        .map(|item| ProductCardView {
            href: product_href(&channel, &item.slug),
            thumbnail_alt: item
                .thumbnail
                .as_ref()
                .and_then(|t| t.alt.clone())
                .unwrap_or_else(|| item.name.clone()),
            thumbnail_url: item.thumbnail.map(|t| t.url),
            name: item.name,
        })
        .collect();

    let layout = layout(&state, &session, &channel, nonce).await;

    Ok(ProductsIndexTemplate {
        title: format!("Products | {}", layout.site_name),
        layout,
        products,
    })
}

/// Display the product detail page.
///
/// Redirects to the only variant when there is nothing to choose.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Path((channel, slug)): Path<(String, String)>,
    Query(query): Query<ProductQuery>,
    session: Session,
    nonce: CspNonce,
) -> Result<Response> {
    set_sentry_channel(&channel);

    let product = state
        .saleor()
        .product_details(&slug, &channel)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    let variants = product.variants();
    let requested = query.variant();
    let selected = resolve_selected_variant(variants, requested);

    if let Some(only) = single_variant_redirect(variants, selected) {
        return Ok(Redirect::temporary(&variant_href(&channel, &product.slug, only)).into_response());
    }

    let available = is_available(variants);
    let config = state.config();

    let add_action = match selected {
        Some(variant) => format!(
            "{}/add?variant={}",
            product_href(&channel, &product.slug),
            urlencoding::encode(variant.id.as_str())
        ),
        None => format!("{}/add", product_href(&channel, &product.slug)),
    };

    let template = ProductShowTemplate {
        meta: page_metadata(
            &product,
            selected,
            &config.site_name,
            config.storefront_url.as_deref(),
        ),
        name: product.name.clone(),
        category: product.category.as_ref().map(|c| c.name.clone()),
        price: display_price(&product, selected, available),
        available,
        gallery: GalleryView::build(
            &product.media,
            query.image(),
            &channel,
            &product.slug,
            selected.map(|v| &v.id),
        ),
        variant_options: variant_options(&channel, &product.slug, variants, selected),
        can_add_to_cart: can_add_to_cart(requested, selected),
        add_action,
        description: render_description(product.description.as_deref()),
        json_ld: json_ld_script_body(&product_json_ld(&product, selected, available)),
        layout: layout(&state, &session, &channel, nonce).await,
    };

    Ok(template.into_response())
}

/// Add the selected variant to the shopper's checkout.
///
/// The checkout is found or created, and its ID saved to the session, even
/// when no variant was selected. Always redirects back to the product page.
#[instrument(skip(state, session))]
pub async fn add_item(
    State(state): State<AppState>,
    Path((channel, slug)): Path<(String, String)>,
    Query(query): Query<AddItemQuery>,
    session: Session,
) -> Result<Redirect> {
    set_sentry_channel(&channel);

    let existing = session::checkout_id(&session, &channel).await?;
    let checkout = state
        .saleor()
        .find_or_create_checkout(existing.as_ref(), &channel)
        .await?;

    session::set_checkout_id(&session, &channel, &checkout.id).await?;

    let Some(variant) = query.variant.filter(|v| !v.is_empty()) else {
        return Ok(Redirect::to(&product_href(&channel, &slug)));
    };
    let variant = VariantId::new(variant);

    let checkout = state
        .saleor()
        .checkout_add_line(&checkout.id, &variant)
        .await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[
            ("variant_id", variant.as_str()),
            ("checkout_id", checkout.id.as_str()),
        ]),
    );
    tracing::info!(
        checkout_id = %checkout.id,
        quantity = checkout.total_quantity(),
        "Added line to checkout"
    );

    Ok(Redirect::to(&variant_href(&channel, &slug, &variant)))
}
