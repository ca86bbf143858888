//! Integration tests for the storefront router.
//!
//! Drives `routes::app` with `tower::ServiceExt::oneshot` against a mocked
//! Saleor API, covering page rendering, redirects and the add-to-cart flow.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::net::SocketAddr;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use driftwood_integration_tests::{
    checkout_json, mock_operation, product_json, test_config, variant_json,
};
use driftwood_storefront::{routes, state::AppState};

fn app(server: &MockServer) -> Router {
    routes::app(AppState::new(test_config(&server.uri())))
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

fn add_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-forwarded-for", "203.0.113.9");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn two_variants() -> Vec<serde_json::Value> {
    vec![
        variant_json("v-small", "Small", 3, 15.0),
        variant_json("v-large", "Large", 0, 25.0),
    ]
}

// ---------------------------------------------------------------------------
// Basic routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_is_ok() {
    let server = MockServer::start().await;
    let (status, headers, body) = get(app(&server), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn root_redirects_to_default_channel() {
    let server = MockServer::start().await;
    let (status, headers, _) = get(app(&server), "/").await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(headers[header::LOCATION], "/default-channel");
}

#[tokio::test]
async fn channel_index_lists_products() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "ProductList",
        json!({
            "products": { "edges": [
                { "node": { "id": "p1", "name": "Monospace Tee", "slug": "monospace-tee",
                    "thumbnail": { "url": "https://cdn.example.com/tee.webp", "alt": "" } } }
            ] }
        }),
    )
    .await;

    let (status, _, body) = get(app(&server), "/default-channel").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"href="/default-channel/products/monospace-tee""#));
    assert!(body.contains("Monospace Tee"));
}

// ---------------------------------------------------------------------------
// Product detail page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn product_page_renders_without_selection() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "ProductDetails",
        json!({ "product": product_json(two_variants()) }),
    )
    .await;

    let (status, headers, body) =
        get(app(&server), "/default-channel/products/monospace-tee").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Monospace Tee | Driftwood</title>"));
    assert!(body.contains(r#"<meta name="description" content="Heavyweight cotton tee">"#));
    assert!(body.contains(
        r#"<link rel="canonical" href="https://shop.example.com/products/monospace-tee">"#
    ));
    assert!(body.contains("$15.00 - $25.00"));
    assert!(body.contains("In stock"));
    assert!(body.contains(r#""@type":"AggregateOffer""#));
    assert!(body.contains("<b>cotton</b>"));
    assert!(!body.contains("alert(1)"));
    // Nothing selected, so the button is disabled
    assert!(body.contains(r#"class="button button--primary" disabled"#));
    // Sold-out variant is not linkable
    assert!(body.contains(r#"href="/default-channel/products/monospace-tee?variant=v-small""#));
    assert!(!body.contains("variant=v-large"));

    let nonce_csp = headers[header::CONTENT_SECURITY_POLICY].to_str().unwrap();
    assert!(nonce_csp.contains("'nonce-"));
}

#[tokio::test]
async fn product_page_with_selected_variant() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "ProductDetails",
        json!({ "product": product_json(two_variants()) }),
    )
    .await;

    let (status, _, body) = get(
        app(&server),
        "/default-channel/products/monospace-tee?variant=v-small&image=1",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Monospace Tee - Small | Driftwood</title>"));
    assert!(body.contains(r#""@type":"Offer""#));
    assert!(body.contains(r#"action="/default-channel/products/monospace-tee/add?variant=v-small""#));
    assert!(body.contains(r#"src="https://cdn.example.com/back.webp" alt="Product image""#));
    assert!(body.contains(r#"alt="Thumbnail 2""#));
    assert!(body.contains(r#"class="button button--primary">"#));
}

#[tokio::test]
async fn product_page_out_of_range_image_falls_back() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "ProductDetails",
        json!({ "product": product_json(two_variants()) }),
    )
    .await;

    let (status, _, body) = get(
        app(&server),
        "/default-channel/products/monospace-tee?image=99",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"src="https://cdn.example.com/front.webp" alt="Front""#));
}

#[tokio::test]
async fn product_page_non_numeric_image_falls_back() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "ProductDetails",
        json!({ "product": product_json(two_variants()) }),
    )
    .await;

    let (status, _, body) = get(
        app(&server),
        "/default-channel/products/monospace-tee?image=abc",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"src="https://cdn.example.com/front.webp" alt="Front""#));
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let server = MockServer::start().await;
    mock_operation(&server, "ProductDetails", json!({ "product": null })).await;

    let (status, _, _) = get(app(&server), "/default-channel/products/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn single_in_stock_variant_redirects() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "ProductDetails",
        json!({ "product": product_json(vec![variant_json("v-only", "Default", 5, 15.0)]) }),
    )
    .await;

    let (status, headers, _) =
        get(app(&server), "/default-channel/products/monospace-tee").await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        headers[header::LOCATION],
        "/default-channel/products/monospace-tee?variant=v-only"
    );
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, _, body) = get(app(&server), "/default-channel/products/monospace-tee").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, "External service error");
}

// ---------------------------------------------------------------------------
// Add to cart
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_item_creates_checkout_and_adds_line() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "CheckoutCreate",
        json!({ "checkoutCreate": { "checkout": checkout_json("c-new", &[]), "errors": [] } }),
    )
    .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "CheckoutAddLine",
            "variables": { "id": "c-new", "productVariantId": "v-small" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "checkoutLinesAdd": { "checkout": checkout_json("c-new", &[1]), "errors": [] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(add_request(
            "/default-channel/products/monospace-tee/add?variant=v-small",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/default-channel/products/monospace-tee?variant=v-small"
    );
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("driftwood_session="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn add_item_from_direct_connection_uses_peer_address() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "CheckoutCreate",
        json!({ "checkoutCreate": { "checkout": checkout_json("c-direct", &[]), "errors": [] } }),
    )
    .await;
    mock_operation(
        &server,
        "CheckoutAddLine",
        json!({ "checkoutLinesAdd": { "checkout": checkout_json("c-direct", &[1]), "errors": [] } }),
    )
    .await;

    let mut request = Request::builder()
        .method("POST")
        .uri("/default-channel/products/monospace-tee/add?variant=v-small")
        .body(Body::empty())
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 50123))));

    let response = app(&server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/default-channel/products/monospace-tee?variant=v-small"
    );
}

#[tokio::test]
async fn add_item_without_variant_only_saves_checkout() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "CheckoutCreate",
        json!({ "checkoutCreate": { "checkout": checkout_json("c-new", &[]), "errors": [] } }),
    )
    .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": "CheckoutAddLine" })))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(add_request("/default-channel/products/monospace-tee/add", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/default-channel/products/monospace-tee"
    );
    assert!(response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn session_checkout_is_reused_and_shown_in_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": "CheckoutCreate" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "checkoutCreate": { "checkout": checkout_json("c-1", &[]), "errors": [] } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    mock_operation(
        &server,
        "CheckoutFind",
        json!({ "checkout": checkout_json("c-1", &[2]) }),
    )
    .await;
    mock_operation(
        &server,
        "CheckoutAddLine",
        json!({ "checkoutLinesAdd": { "checkout": checkout_json("c-1", &[2]), "errors": [] } }),
    )
    .await;
    mock_operation(
        &server,
        "ProductDetails",
        json!({ "product": product_json(two_variants()) }),
    )
    .await;

    let app = app(&server);
    let uri = "/default-channel/products/monospace-tee/add?variant=v-small";

    let first = app.clone().oneshot(add_request(uri, None)).await.unwrap();
    let set_cookie = first.headers()[header::SET_COOKIE].to_str().unwrap();
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    // Second add reuses the stored checkout instead of creating another
    let second = app.clone().oneshot(add_request(uri, Some(&cookie))).await.unwrap();
    assert_eq!(second.status(), StatusCode::SEE_OTHER);

    let request = Request::builder()
        .uri("/default-channel/products/monospace-tee")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();

    assert!(body.contains("2 items"));
}

#[tokio::test]
async fn add_item_reports_checkout_errors() {
    let server = MockServer::start().await;
    mock_operation(
        &server,
        "CheckoutCreate",
        json!({ "checkoutCreate": { "checkout": checkout_json("c-new", &[]), "errors": [] } }),
    )
    .await;
    mock_operation(
        &server,
        "CheckoutAddLine",
        json!({
            "checkoutLinesAdd": {
                "checkout": null,
                "errors": [{ "field": "quantity", "code": "INSUFFICIENT_STOCK", "message": null }]
            }
        }),
    )
    .await;

    let response = app(&server)
        .oneshot(add_request(
            "/default-channel/products/monospace-tee/add?variant=v-large",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"quantity: INSUFFICIENT_STOCK");
}
