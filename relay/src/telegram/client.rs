//! Async client for the Telegram Bot API sendMessage call.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{error, info};

use crate::config::Config;
use crate::telegram::types::{ApiReply, OutboundMessage};

/// Client holding the reqwest connection pool and the sendMessage URL
/// built once from the configured bot credential.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    send_message_url: String,
}

impl TelegramClient {
    /// Build a client from configuration.
    ///
    /// Applies the outbound timeout only when one is configured;
    /// otherwise the call waits as long as the connection does.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        let send_message_url = format!(
            "{}/bot{}/sendMessage",
            config.telegram_api_base.trim_end_matches('/'),
            config.telegram_bot_token
        );

        Ok(Self {
            http: builder.build()?,
            send_message_url,
        })
    }

    /// POST a message to the Bot API, exactly once, and capture the
    /// response status and JSON body for pass-through.
    ///
    /// Transport failures and non-JSON response bodies surface as
    /// errors; there is no retry.
    pub async fn send_message(&self, message: &OutboundMessage) -> Result<ApiReply, reqwest::Error> {
        info!(
            text_length = message.text.len(),
            has_parse_mode = message.parse_mode.is_some(),
            has_reply_markup = message.reply_markup.is_some(),
            "telegram_send_starting"
        );

        let response = self
            .http
            .post(&self.send_message_url)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "telegram_send_transport_error");
                e
            })?;

        let status = response.status().as_u16();
        let body: Value = response.json().await.map_err(|e| {
            error!(status_code = status, error = %e, "telegram_send_body_error");
            e
        })?;

        info!(status_code = status, "telegram_send_complete");

        Ok(ApiReply { status, body })
    }
}
