//! Reply markup: inline keyboards, custom reply keyboards and friends.
//!
//! Any type implementing [`ReplyMarkup`] can be attached to a request; it is
//! marshalled to JSON and carried in the single `reply_markup` form field.

use serde::Serialize;

/// Something that can be sent as `reply_markup`.
pub trait ReplyMarkup: Send + Sync {
    /// JSON encoding of the markup.
    fn marshal(&self) -> serde_json::Result<String>;
}

macro_rules! json_markup {
    ($($t:ty),*) => {$(
        impl ReplyMarkup for $t {
            fn marshal(&self) -> serde_json::Result<String> { serde_json::to_string(self) }
        }
    )*};
}

json_markup!(InlineKeyboardMarkup, ReplyKeyboardMarkup, ReplyKeyboardRemove, ForceReply);

// ─── Inline keyboard ──────────────────────────────────────────────────────────

/// Buttons shown under a message.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self { inline_keyboard: rows }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_inline_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_inline_query_current_chat: Option<String>,
}

impl InlineKeyboardButton {
    /// Button that sends `data` back as a callback query.
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self { text: text.into(), callback_data: Some(data.into()), ..Default::default() }
    }

    /// Button that opens `url`.
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self { text: text.into(), url: Some(url.into()), ..Default::default() }
    }

    /// Button that starts an inline query with `query` in the current chat.
    pub fn switch_inline_current_chat(text: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            switch_inline_query_current_chat: Some(query.into()),
            ..Default::default()
        }
    }
}

// ─── Reply keyboard ───────────────────────────────────────────────────────────

/// Custom keyboard replacing the user's keyboard.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub resize_keyboard: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub one_time_keyboard: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub selective: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub request_contact: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub request_location: bool,
}

impl KeyboardButton {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }
}

/// Removes the current custom keyboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReplyKeyboardRemove {
    pub remove_keyboard: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub selective: bool,
}

impl Default for ReplyKeyboardRemove {
    fn default() -> Self { Self { remove_keyboard: true, selective: false } }
}

/// Forces the client to show a reply interface.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForceReply {
    pub force_reply: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub selective: bool,
}

impl Default for ForceReply {
    fn default() -> Self { Self { force_reply: true, selective: false } }
}
