//! Integration tests for the Driftwood storefront.
//!
//! Every test stands up a `wiremock` server in place of the Saleor GraphQL
//! API, so no real network traffic is made.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p driftwood-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `saleor_client` - `SaleorClient` against a mocked GraphQL endpoint
//! - `product_page` - full router (sessions, middleware, templates) via
//!   `tower::ServiceExt::oneshot`

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use driftwood_storefront::config::{SaleorConfig, SentryConfig, StorefrontConfig};
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Channel used by all fixtures.
pub const CHANNEL: &str = "default-channel";

/// App token sent by the client under test.
pub const APP_TOKEN: &str = "saleor-app-token-Xk29fQ7mLp";

/// Storefront configuration pointing at a mock Saleor server.
#[must_use]
pub fn test_config(api_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        storefront_url: Some("https://shop.example.com".to_string()),
        site_name: "Driftwood".to_string(),
        default_channel: CHANNEL.to_string(),
        saleor: SaleorConfig {
            api_url: api_url.to_string(),
            app_token: Some(SecretString::from(APP_TOKEN.to_string())),
            revalidate: Duration::from_secs(60),
            prerender_count: 3,
        },
        sentry: SentryConfig::default(),
    }
}

/// Mount a mock answering one GraphQL operation with a `data` payload.
pub async fn mock_operation(server: &MockServer, operation: &str, data: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": operation })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .mount(server)
        .await;
}

/// Gross money as the API returns it.
#[must_use]
pub fn gross(amount: f64) -> Value {
    json!({ "gross": { "amount": amount, "currency": "USD" } })
}

/// A variant with a price and stock level.
#[must_use]
pub fn variant_json(id: &str, name: &str, quantity: i64, amount: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "quantityAvailable": quantity,
        "pricing": { "price": gross(amount), "priceUndiscounted": gross(amount) }
    })
}

/// A product payload for the `ProductDetails` query.
#[must_use]
pub fn product_json(variants: Vec<Value>) -> Value {
    json!({
        "id": "UHJvZHVjdDox",
        "name": "Monospace Tee",
        "slug": "monospace-tee",
        "seoTitle": null,
        "seoDescription": "Heavyweight cotton tee",
        "description": r#"{"blocks":[{"type":"paragraph","data":{"text":"Soft <b>cotton</b><script>alert(1)</script>"}}]}"#,
        "thumbnail": { "url": "https://cdn.example.com/tee.webp", "alt": null },
        "media": [
            { "id": "m1", "url": "https://cdn.example.com/front.webp", "alt": "Front", "type": "IMAGE" },
            { "id": "m2", "url": "https://cdn.example.com/back.webp", "alt": "", "type": "IMAGE" }
        ],
        "category": { "id": "Q2F0ZWdvcnk6MQ==", "name": "Apparel" },
        "variants": variants,
        "pricing": {
            "priceRange": { "start": gross(15.0), "stop": gross(25.0) }
        }
    })
}

/// A checkout payload with the given line quantities.
#[must_use]
pub fn checkout_json(id: &str, quantities: &[i64]) -> Value {
    let lines: Vec<Value> = quantities
        .iter()
        .enumerate()
        .map(|(i, quantity)| {
            json!({
                "id": format!("line-{i}"),
                "quantity": quantity,
                "totalPrice": gross(15.0),
                "variant": {
                    "id": format!("variant-{i}"),
                    "name": "Large",
                    "product": { "name": "Monospace Tee" }
                }
            })
        })
        .collect();

    json!({ "id": id, "lines": lines, "totalPrice": gross(15.0) })
}
