//! Bot API entity types.
//!
//! Only the fields this crate and typical handlers need are decoded; unknown
//! fields are ignored. [`User`], [`Chat`] and [`Message`] remember the
//! [`Bot`] they arrived through, so they can build follow-up requests
//! without the caller passing the bot around.

use serde::Deserialize;

use crate::sendables::{EditMessageText, SendChatAction, SendMessage};
use crate::{Bot, InvocationError};

// ─── Bind ─────────────────────────────────────────────────────────────────────

/// Attach the issuing [`Bot`] to a decoded value.
///
/// Called on every decoded response; the default does nothing.
pub trait Bind {
    fn bind(&mut self, _bot: &Bot) {}
}

impl Bind for bool {}

impl<T: Bind> Bind for Vec<T> {
    fn bind(&mut self, bot: &Bot) {
        for item in self { item.bind(bot); }
    }
}

// ─── User ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub id:            i64,
    #[serde(default)]
    pub is_bot:        bool,
    #[serde(default)]
    pub first_name:    String,
    pub last_name:     Option<String>,
    pub username:      Option<String>,
    pub language_code: Option<String>,
    #[serde(skip)]
    pub(crate) bot:    Option<Bot>,
}

impl User {
    /// `first_name last_name`, trimmed.
    pub fn full_name(&self) -> String {
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{} {last}", self.first_name).trim().to_string()
    }

    /// The bot this user was received through, if any.
    pub fn bot(&self) -> Option<&Bot> { self.bot.as_ref() }

    /// Start a private message to this user.
    pub fn send_message(&self, text: impl Into<String>) -> Result<SendMessage, InvocationError> {
        let bot = self.bot.as_ref().ok_or(InvocationError::NoClient)?;
        Ok(bot.send_message(self.id, text))
    }
}

impl Bind for User {
    fn bind(&mut self, bot: &Bot) { self.bot = Some(bot.clone()); }
}

// ─── Chat ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
pub struct Chat {
    pub id:         i64,
    /// `private`, `group`, `supergroup` or `channel`.
    #[serde(rename = "type", default)]
    pub kind:       String,
    pub title:      Option<String>,
    pub username:   Option<String>,
    pub first_name: Option<String>,
    pub last_name:  Option<String>,
    #[serde(skip)]
    pub(crate) bot: Option<Bot>,
}

impl Chat {
    pub fn is_private(&self) -> bool { self.kind == "private" }

    pub fn bot(&self) -> Option<&Bot> { self.bot.as_ref() }

    /// Start a message to this chat.
    pub fn send_message(&self, text: impl Into<String>) -> Result<SendMessage, InvocationError> {
        let bot = self.bot.as_ref().ok_or(InvocationError::NoClient)?;
        Ok(bot.send_message(self.id, text))
    }

    /// Start a chat action (`typing`, `upload_photo`, …) in this chat.
    pub fn send_action(&self, action: impl Into<String>) -> Result<SendChatAction, InvocationError> {
        let bot = self.bot.as_ref().ok_or(InvocationError::NoClient)?;
        Ok(bot.send_chat_action(self.id).action(action))
    }
}

impl Bind for Chat {
    fn bind(&mut self, bot: &Bot) { self.bot = Some(bot.clone()); }
}

// ─── Message ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
pub struct Message {
    pub message_id:       i32,
    pub from:             Option<User>,
    pub sender_chat:      Option<Chat>,
    #[serde(default)]
    pub date:             i64,
    pub chat:             Chat,
    pub reply_to_message: Option<Box<Message>>,
    pub edit_date:        Option<i64>,
    pub media_group_id:   Option<String>,
    pub text:             Option<String>,
    pub caption:          Option<String>,
    pub photo:            Option<Vec<PhotoSize>>,
    pub location:         Option<Location>,
    pub contact:          Option<Contact>,
    pub dice:             Option<Dice>,
    #[serde(skip)]
    pub(crate) bot:       Option<Bot>,
}

impl Message {
    /// Text, or the caption of a media message.
    pub fn text_or_caption(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }

    pub fn bot(&self) -> Option<&Bot> { self.bot.as_ref() }

    /// Start a reply to this message in the same chat.
    pub fn reply_text(&self, text: impl Into<String>) -> Result<SendMessage, InvocationError> {
        let bot = self.bot.as_ref().ok_or(InvocationError::NoClient)?;
        Ok(bot.send_message(self.chat.id, text).reply_to(self.message_id))
    }

    /// Start an edit of this message's text.
    pub fn edit_text(&self, text: impl Into<String>) -> Result<EditMessageText, InvocationError> {
        let bot = self.bot.as_ref().ok_or(InvocationError::NoClient)?;
        Ok(bot.edit_message_text(self.chat.id, self.message_id, text))
    }
}

impl Bind for Message {
    /// Binds the message, its chat and sender, and the message it replies to
    /// together with that message's sender.
    fn bind(&mut self, bot: &Bot) {
        self.bot = Some(bot.clone());
        self.chat.bind(bot);
        if let Some(from) = &mut self.from {
            from.bind(bot);
        }
        if let Some(reply) = &mut self.reply_to_message {
            reply.bot = Some(bot.clone());
            reply.chat.bind(bot);
            if let Some(from) = &mut reply.from {
                from.bind(bot);
            }
        }
    }
}

// ─── Leaf types ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PhotoSize {
    pub file_id:        String,
    #[serde(default)]
    pub file_unique_id: String,
    pub width:          i32,
    pub height:         i32,
    pub file_size:      Option<i64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Location {
    pub latitude:  f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Contact {
    pub phone_number: String,
    pub first_name:   String,
    pub last_name:    Option<String>,
    pub user_id:      Option<i64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Dice {
    pub emoji: String,
    pub value: i32,
}

// ─── Queries ──────────────────────────────────────────────────────────────────

/// An inline keyboard button was pressed.
#[derive(Clone, Debug, Deserialize)]
pub struct CallbackQuery {
    pub id:                String,
    pub from:              User,
    /// The message carrying the button; absent for inline-mode messages.
    pub message:           Option<Message>,
    pub inline_message_id: Option<String>,
    #[serde(default)]
    pub chat_instance:     String,
    pub data:              Option<String>,
    pub game_short_name:   Option<String>,
}

/// A user typed `@bot query` in some chat.
#[derive(Clone, Debug, Deserialize)]
pub struct InlineQuery {
    pub id:     String,
    pub from:   User,
    #[serde(default)]
    pub query:  String,
    #[serde(default)]
    pub offset: String,
}

/// A user picked one of the bot's inline results.
#[derive(Clone, Debug, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id:         String,
    pub from:              User,
    #[serde(default)]
    pub query:             String,
    pub inline_message_id: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ShippingAddress {
    pub country_code: String,
    #[serde(default)]
    pub state:        String,
    pub city:         String,
    pub street_line1: String,
    #[serde(default)]
    pub street_line2: String,
    pub post_code:    String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ShippingQuery {
    pub id:               String,
    pub from:             User,
    pub invoice_payload:  String,
    pub shipping_address: ShippingAddress,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PreCheckoutQuery {
    pub id:                 String,
    pub from:               User,
    pub currency:           String,
    pub total_amount:       i64,
    pub invoice_payload:    String,
    pub shipping_option_id: Option<String>,
}
