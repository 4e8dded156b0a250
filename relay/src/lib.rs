//! Telegram webhook relay.
//!
//! A thin web service that:
//! - Receives webhook POSTs carrying message payloads
//! - Verifies a shared-secret path token
//! - Validates the payload against the Telegram sendMessage shape
//! - Forwards it to the Telegram Bot API
//! - Returns the Bot API response (status and body) verbatim
//!
//! A second endpoint watches Telegram updates for the `/start` command
//! and posts a subscriber notification into a fixed group chat.
//!
//! ## Architecture
//!
//! ```text
//! Caller → /webhook/{token} ────────→ Bot API sendMessage → response passed through
//! Telegram → /telegram/update/{token} → /start detected → notification to group
//! ```

pub mod config;
pub mod error;
pub mod telegram;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::ApiError;
pub use telegram::{ApiReply, ChatId, OutboundMessage, ReplyMarkup, TelegramClient};
pub use web::{build_router, AppState};
