//! Webhook endpoint handlers.
//!
//! Both handlers are stateless per-request pipelines:
//! 1. Verify the shared-secret path token
//! 2. Parse and inspect the JSON body
//! 3. Issue at most one outbound call to the Bot API
//! 4. Pass the Bot API response through verbatim
//!
//! Validation and authorization failures are reported before any
//! outbound call; nothing is retried.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::telegram::{
    ChatId, OutboundMessage, RelayPayload, TelegramClient, PARSE_MODE_HTML,
};
use crate::web::auth::token_matches;

/// Trigger command that marks an update as a subscription event.
pub const START_COMMAND: &str = "/start";

const EMPTY_PAYLOAD_DETAIL: &str = "Empty payload received, no action taken.";
const NO_EVENT_DETAIL: &str = "No subscription event detected";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub telegram: TelegramClient,
}

impl AppState {
    pub fn new(config: Config, telegram: TelegramClient) -> Self {
        Self {
            config: Arc::new(config),
            telegram,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Relay Webhook
// =============================================================================

/// Relay endpoint: validate the payload and forward it to the Bot API.
///
/// This endpoint:
/// 1. Verifies the path token against the configured secret
/// 2. Parses the body as JSON (empty body counts as an empty object)
/// 3. Returns 200 without forwarding when the object has no keys
/// 4. Validates the payload against the sendMessage shape
/// 5. Forwards once and returns the Bot API status and body unchanged
pub async fn relay_webhook(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    info!(body_length = body.len(), "relay_webhook_received");

    if !token_matches(&token, &state.config.relay_secret_token) {
        warn!("relay_token_invalid");
        return Err(ApiError::InvalidToken);
    }

    let value = parse_body(&body).map_err(|e| {
        warn!("relay_body_not_json");
        e
    })?;

    if is_empty_object(&value) {
        info!("relay_empty_payload");
        return Ok(ok_detail(EMPTY_PAYLOAD_DETAIL));
    }

    let payload: RelayPayload = serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "relay_payload_invalid");
        ApiError::InvalidPayload
    })?;

    let message = payload.into_message();
    let reply = state.telegram.send_message(&message).await?;

    info!(status_code = reply.status, "relay_forwarded");

    Ok(pass_through(reply.status, reply.body))
}

// =============================================================================
// Telegram Update Webhook
// =============================================================================

/// Update endpoint: watch for the `/start` command and notify the
/// configured subscriber group.
///
/// This endpoint:
/// 1. Verifies the path token against the configured secret
/// 2. Parses the body as JSON
/// 3. Returns 200 without forwarding unless `message.text` equals the
///    trigger command exactly
/// 4. Composes a notification from `message.from` and sends it to the
///    configured group, passing the Bot API response through
pub async fn telegram_update(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    info!(body_length = body.len(), "update_webhook_received");

    if !token_matches(&token, &state.config.relay_secret_token) {
        warn!("update_token_invalid");
        return Err(ApiError::InvalidToken);
    }

    let value = parse_body(&body).map_err(|e| {
        warn!("update_body_not_json");
        e
    })?;

    let Some(message) = value.get("message") else {
        info!("update_no_message");
        return Ok(ok_detail(NO_EVENT_DETAIL));
    };

    // Exact match only: no trimming, no case folding
    if message.get("text").and_then(Value::as_str) != Some(START_COMMAND) {
        info!("update_no_trigger");
        return Ok(ok_detail(NO_EVENT_DETAIL));
    }

    let from = message.get("from");
    let id = from_field(from, "id");
    let first_name = from_field(from, "first_name");
    let username = from_field(from, "username");

    info!(
        subscriber_id = %id,
        has_username = !username.is_empty(),
        "subscription_trigger_detected"
    );

    let notification = OutboundMessage {
        chat_id: ChatId::Name(state.config.subscriber_group_id.clone()),
        text: compose_subscriber_notification(&id, &first_name, &username),
        parse_mode: Some(PARSE_MODE_HTML.to_string()),
        reply_markup: None,
    };

    let reply = state.telegram.send_message(&notification).await?;

    info!(status_code = reply.status, "subscription_notified");

    Ok(pass_through(reply.status, reply.body))
}

// =============================================================================
// Helpers
// =============================================================================

/// Parse a raw request body as JSON. An absent body counts as an
/// empty object; anything else must parse.
fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(body).map_err(|_| ApiError::InvalidJson)
}

fn is_empty_object(value: &Value) -> bool {
    value.as_object().is_some_and(|obj| obj.is_empty())
}

/// Read a field from `message.from`, rendering numbers as their
/// decimal string and defaulting to the empty string when absent.
fn from_field(from: Option<&Value>, key: &str) -> String {
    match from.and_then(|f| f.get(key)) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn compose_subscriber_notification(id: &str, first_name: &str, username: &str) -> String {
    format!(
        "<b>New subscriber</b>\nID: {id}\nName: {first_name}\nUsername: {username}"
    )
}

fn ok_detail(detail: &'static str) -> Response {
    (StatusCode::OK, Json(json!({ "detail": detail }))).into_response()
}

/// Mirror the Bot API response to the original caller.
fn pass_through(status: u16, body: Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(body)).into_response()
}
