//! Session middleware configuration.
//!
//! Sessions hold the shopper's checkout IDs, one per channel. The commerce
//! backend owns the checkout itself, so an in-memory store is enough: losing
//! a session only means the next add-to-cart starts a new checkout.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use driftwood_core::CheckoutId;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "driftwood_session";

/// Session expiry time in seconds (30 days).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Session key holding the checkout ID for a channel.
#[must_use]
pub fn checkout_key(channel: &str) -> String {
    format!("checkout_id:{channel}")
}

/// Read the checkout ID stored for a channel.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn checkout_id(
    session: &Session,
    channel: &str,
) -> Result<Option<CheckoutId>, tower_sessions::session::Error> {
    session.get(&checkout_key(channel)).await
}

/// Store the checkout ID for a channel.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_checkout_id(
    session: &Session,
    channel: &str,
    id: &CheckoutId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(&checkout_key(channel), id).await
}

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
