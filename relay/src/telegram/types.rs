//! Wire types for the Telegram sendMessage call.
//!
//! The outbound shape follows the Bot API: optional fields are omitted
//! from the serialized body entirely when unset, never sent as null.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// parse_mode value for HTML-formatted message text.
pub const PARSE_MODE_HTML: &str = "HTML";

// =============================================================================
// Outbound Types
// =============================================================================

/// Destination chat identifier.
///
/// The Bot API accepts either a numeric chat id or a string form
/// (group ids from configuration arrive as strings).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Name(String),
}

/// One inline keyboard button with display text and a target URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub url: String,
}

/// Inline keyboard layout: rows of buttons, order preserved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplyMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// A message ready to send via the Bot API.
///
/// Destination and text are always present once constructed;
/// formatting mode and keyboard are omitted on the wire when unset.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    pub chat_id: ChatId,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

// =============================================================================
// Inbound Relay Payload
// =============================================================================

/// Validated inbound payload for the relay endpoint.
///
/// `chat_id` and `text` are required; a missing or wrong-typed field
/// is a validation failure. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayPayload {
    pub chat_id: i64,
    pub text: String,
    #[serde(default)]
    pub parse_mode: Option<String>,
    #[serde(default)]
    pub reply_markup: Option<ReplyMarkup>,
}

impl RelayPayload {
    /// Convert into the outbound shape without altering any field.
    pub fn into_message(self) -> OutboundMessage {
        OutboundMessage {
            chat_id: ChatId::Id(self.chat_id),
            text: self.text,
            parse_mode: self.parse_mode,
            reply_markup: self.reply_markup,
        }
    }
}

// =============================================================================
// Bot API Reply
// =============================================================================

/// The Bot API response, passed through to the original caller
/// unchanged in both status code and body.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}
