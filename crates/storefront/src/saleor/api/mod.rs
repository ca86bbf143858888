//! Saleor GraphQL API client implementation.
//!
//! Uses `graphql_client` query bodies with `reqwest` 0.13 for HTTP.
//! Caches product reads using `moka` (TTL from `SALEOR_REVALIDATE_SECS`).

mod cache;
mod conversions;
pub mod queries;

use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use driftwood_core::{CheckoutId, VariantId};

use crate::config::SaleorConfig;
use crate::saleor::types::{Checkout, Product, ProductListItem};
use crate::saleor::{GraphQLError, GraphQLErrorLocation, SaleorError};

use cache::{CacheValue, product_key, product_list_key};
use conversions::{convert_checkout, convert_checkout_errors, convert_product, convert_product_list};
use queries::{
    CheckoutAddLine, CheckoutCreate, CheckoutFind, ProductDetails, ProductList, checkout_add_line,
    checkout_create, checkout_find, product_details, product_list,
};

/// Maximum characters of an upstream body kept in logs and error messages.
const BODY_SNIPPET_LEN: usize = 500;

/// Whether a request carries the app token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    App,
    Anonymous,
}

// =============================================================================
// SaleorClient
// =============================================================================

/// Client for the Saleor GraphQL API.
///
/// Provides type-safe access to products and checkout operations.
/// Product reads are cached; checkout operations always hit the API.
#[derive(Clone)]
pub struct SaleorClient {
    inner: Arc<SaleorClientInner>,
}

struct SaleorClientInner {
    client: reqwest::Client,
    endpoint: String,
    app_token: Option<SecretString>,
    cache: Cache<String, CacheValue>,
}

impl SaleorClient {
    /// Create a new Saleor API client.
    #[must_use]
    pub fn new(config: &SaleorConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.revalidate)
            .build();

        Self {
            inner: Arc::new(SaleorClientInner {
                client: reqwest::Client::new(),
                endpoint: config.api_url.clone(),
                app_token: config.app_token.clone(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
        auth: Auth,
    ) -> Result<Q::ResponseData, SaleorError> {
        let request_body = Q::build_query(variables);

        let mut request = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("Content-Type", "application/json")
            .json(&request_body);

        if auth == Auth::App
            && let Some(token) = &self.inner.app_token
        {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(SaleorError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                operation = request_body.operation_name,
                body = %snippet(&response_text, BODY_SNIPPET_LEN),
                "Saleor API returned non-success status"
            );
            return Err(SaleorError::message(format!(
                "HTTP {status}: {}",
                snippet(&response_text, 200)
            )));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    operation = request_body.operation_name,
                    body = %snippet(&response_text, BODY_SNIPPET_LEN),
                    "Failed to parse Saleor GraphQL response"
                );
                return Err(SaleorError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");

            return Err(SaleorError::GraphQL(
                errors.into_iter().map(convert_graphql_error).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation = request_body.operation_name,
                body = %snippet(&response_text, BODY_SNIPPET_LEN),
                "Saleor GraphQL response has no data and no errors"
            );
            SaleorError::message("No data in response")
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a product by its slug in a channel.
    ///
    /// `slug` must already be percent-decoded (axum's `Path` extractor does
    /// this). Returns `Ok(None)` when the product doesn't exist or isn't
    /// visible in the channel. Misses are not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(slug = %slug, channel = %channel))]
    pub async fn product_details(
        &self,
        slug: &str,
        channel: &str,
    ) -> Result<Option<Product>, SaleorError> {
        let cache_key = product_key(slug, channel);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(Some(*product));
        }

        let variables = product_details::Variables {
            slug: slug.to_string(),
            channel: channel.to_string(),
        };

        let data = self
            .execute::<ProductDetails>(variables, Auth::App)
            .await?;

        let Some(product_data) = data.product else {
            debug!("Product not found");
            return Ok(None);
        };

        let product = convert_product(product_data)?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(Some(product))
    }

    /// Get the first `first` products in a channel.
    ///
    /// Listing is public data and never sends the app token.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn product_list(
        &self,
        first: i64,
        channel: &str,
    ) -> Result<Vec<ProductListItem>, SaleorError> {
        let cache_key = product_list_key(first, channel);

        if let Some(CacheValue::ProductList(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let variables = product_list::Variables {
            first,
            channel: channel.to_string(),
        };

        let data = self
            .execute::<ProductList>(variables, Auth::Anonymous)
            .await?;

        let products = convert_product_list(data);

        self.inner
            .cache
            .insert(cache_key, CacheValue::ProductList(products.clone()))
            .await;

        Ok(products)
    }

    /// Prime the product cache with the first `first` products of a channel.
    ///
    /// Returns how many product pages were cached. Individual failures are
    /// logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if the product list itself can't be fetched.
    #[instrument(skip(self))]
    pub async fn warm_cache(&self, channel: &str, first: i64) -> Result<usize, SaleorError> {
        let products = self.product_list(first, channel).await?;

        let mut warmed = 0;
        for item in products {
            match self.product_details(&item.slug, channel).await {
                Ok(Some(_)) => warmed += 1,
                Ok(None) => debug!(slug = %item.slug, "Listed product has no detail page"),
                Err(e) => warn!(slug = %item.slug, error = %e, "Failed to warm product"),
            }
        }

        Ok(warmed)
    }

    // =========================================================================
    // Checkout Methods (not cached - mutable state)
    // =========================================================================

    /// Look up a checkout by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(checkout_id = %id))]
    pub async fn checkout_find(&self, id: &CheckoutId) -> Result<Option<Checkout>, SaleorError> {
        let variables = checkout_find::Variables {
            id: id.to_string(),
        };

        let data = self.execute::<CheckoutFind>(variables, Auth::App).await?;

        data.checkout.map(convert_checkout).transpose()
    }

    /// Create an empty checkout in a channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation reports
    /// validation errors.
    #[instrument(skip(self))]
    pub async fn checkout_create(&self, channel: &str) -> Result<Checkout, SaleorError> {
        let variables = checkout_create::Variables {
            channel: channel.to_string(),
        };

        let data = self.execute::<CheckoutCreate>(variables, Auth::App).await?;

        let payload = data
            .checkout_create
            .ok_or_else(|| SaleorError::message("Failed to create checkout"))?;

        if !payload.errors.is_empty() {
            return Err(convert_checkout_errors(payload.errors));
        }

        let checkout = payload
            .checkout
            .ok_or_else(|| SaleorError::message("Failed to create checkout"))?;

        convert_checkout(checkout)
    }

    /// Add one unit of a variant to a checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation reports
    /// validation errors (e.g., insufficient stock).
    #[instrument(skip(self), fields(checkout_id = %id, variant_id = %variant_id))]
    pub async fn checkout_add_line(
        &self,
        id: &CheckoutId,
        variant_id: &VariantId,
    ) -> Result<Checkout, SaleorError> {
        let variables = checkout_add_line::Variables {
            id: id.to_string(),
            product_variant_id: variant_id.to_string(),
        };

        let data = self
            .execute::<CheckoutAddLine>(variables, Auth::App)
            .await?;

        let payload = data
            .checkout_lines_add
            .ok_or_else(|| SaleorError::message("Failed to add checkout line"))?;

        if !payload.errors.is_empty() {
            return Err(convert_checkout_errors(payload.errors));
        }

        let checkout = payload
            .checkout
            .ok_or_else(|| SaleorError::message("Failed to add checkout line"))?;

        convert_checkout(checkout)
    }

    /// Reuse an existing checkout or start a new one.
    ///
    /// A missing ID, an ID that no longer resolves, or a failed lookup all
    /// lead to a fresh checkout in `channel`.
    ///
    /// # Errors
    ///
    /// Returns an error if a new checkout had to be created and creation
    /// failed.
    #[instrument(skip(self))]
    pub async fn find_or_create_checkout(
        &self,
        existing: Option<&CheckoutId>,
        channel: &str,
    ) -> Result<Checkout, SaleorError> {
        if let Some(id) = existing {
            match self.checkout_find(id).await {
                Ok(Some(checkout)) => return Ok(checkout),
                Ok(None) => debug!("Stored checkout no longer exists"),
                Err(e) => warn!(error = %e, "Failed to look up stored checkout"),
            }
        }

        self.checkout_create(channel).await
    }
}

fn snippet(body: &str, max: usize) -> String {
    body.chars().take(max).collect()
}

fn convert_graphql_error(e: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: e.message,
        locations: e.locations.map_or_else(Vec::new, |locs| {
            locs.into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect()
        }),
        path: e.path.map_or_else(Vec::new, |p| {
            p.into_iter()
                .map(|fragment| match fragment {
                    graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                    graphql_client::PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect()
        }),
    }
}
