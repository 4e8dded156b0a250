//! Configuration module for environment variable parsing.
//!
//! All configuration is read once at startup. Required values abort
//! startup with a contextual error; optional values fall back to
//! defaults. A local `.env` file is honored when present.

use std::env;

use anyhow::{Context, Result};

/// Default origin for the Telegram Bot API.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret compared against the webhook path token
    pub relay_secret_token: String,

    /// Bot credential used to build the sendMessage URL
    pub telegram_bot_token: String,

    /// Fixed destination chat for /start subscriber notifications
    pub subscriber_group_id: String,

    /// Port for the web server to listen on
    pub port: u16,

    /// Bot API origin; overridden in tests to point at a mock server
    pub telegram_api_base: String,

    /// Optional outbound request timeout in milliseconds.
    /// Unset means no explicit timeout on the Bot API call.
    pub request_timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails if any of the required secrets is missing, so the process
    /// never starts half-configured.
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            relay_secret_token: env::var("RELAY_SECRET_TOKEN")
                .context("RELAY_SECRET_TOKEN must be set")?,

            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN")
                .context("TELEGRAM_BOT_TOKEN must be set")?,

            subscriber_group_id: env::var("SUBSCRIBER_GROUP_ID")
                .context("SUBSCRIBER_GROUP_ID must be set")?,

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            telegram_api_base: env::var("TELEGRAM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_TELEGRAM_API_BASE.to_string()),

            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok()),
        })
    }
}
