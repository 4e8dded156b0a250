//! Telegram Bot API module.
//!
//! This module provides:
//! - Wire types for the sendMessage call
//! - An async client that issues the outbound POST and captures the
//!   Bot API response for verbatim pass-through

pub mod client;
pub mod types;

pub use client::TelegramClient;
pub use types::{
    ApiReply, ChatId, InlineKeyboardButton, OutboundMessage, RelayPayload, ReplyMarkup,
    PARSE_MODE_HTML,
};
