//! Web server module for handling inbound webhooks.
//!
//! This module provides a thin web server that:
//! - Receives message payloads on `/webhook/{token}`
//! - Receives Telegram updates on `/telegram/update/{token}`
//! - Verifies the shared-secret path token
//! - Forwards to the Bot API and passes its response straight through
//!
//! Each request is an independent pipeline; the only shared state is
//! the read-only configuration and the outbound client.

pub mod auth;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use auth::token_matches;
pub use handlers::{health, relay_webhook, telegram_update, AppState, HealthResponse};

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook/:token", post(relay_webhook))
        .route("/telegram/update/:token", post(telegram_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
