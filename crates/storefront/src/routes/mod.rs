//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                  - Redirect to the default channel
//! GET  /health                            - Health check
//! GET  /static/*                          - Static assets
//!
//! # Products
//! GET  /{channel}                         - Product listing
//! GET  /{channel}/products/{slug}         - Product detail (?variant=&image=)
//! POST /{channel}/products/{slug}/add     - Add to cart (?variant=), rate limited
//! ```

pub mod home;
pub mod products;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    checkout_rate_limiter, create_session_layer, csp_nonce_middleware, request_id_middleware,
    security_headers_middleware,
};
use crate::state::AppState;

/// Directory served under `/static`, relative to the workspace root.
const STATIC_DIR: &str = "crates/storefront/static";

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    let cart = Router::new()
        .route("/{channel}/products/{slug}/add", post(products::add_item))
        .layer(checkout_rate_limiter());

    Router::new()
        .route("/{channel}", get(products::index))
        .route("/{channel}/products/{slug}", get(products::show))
        .merge(cart)
}

/// Create the main routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(home::health))
        .merge(product_routes())
}

/// Build the full application with middleware and state applied.
///
/// Sentry layers are added by the binary so tests don't need a client.
pub fn app(state: AppState) -> axum::Router {
    let session_layer = create_session_layer(state.config());

    routes()
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(axum_middleware::from_fn(security_headers_middleware))
        .layer(axum_middleware::from_fn(csp_nonce_middleware))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}
