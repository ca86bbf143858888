//! Root and health check handlers.

use axum::{extract::State, response::Redirect};

use crate::state::AppState;

/// Send shoppers to the default channel's product listing.
pub async fn home(State(state): State<AppState>) -> Redirect {
    let channel = &state.config().default_channel;
    Redirect::temporary(&format!("/{}", urlencoding::encode(channel)))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}
