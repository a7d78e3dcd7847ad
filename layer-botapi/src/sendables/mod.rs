//! The Sendable family: one builder struct per Bot API action.
//!
//! Every builder is obtained from a [`Bot`] method (`bot.send_photo(..)`,
//! `bot.answer_callback_query(..)`, …), has public fields that may be changed
//! freely, and shares the same lifecycle:
//!
//! 1. the reply markup, if any, is marshalled first; a failure aborts before
//!    anything is sent;
//! 2. fields are encoded into ordered form [`Params`];
//! 3. media variants let their [`crate::InputFile`] / [`crate::InputMedia`]
//!    choose between a plain and a multipart request;
//! 4. [`Bot::invoke`] dispatches the request and decodes the typed result.
//!
//! `send()` can be called any number of times; each call re-issues the same
//! request.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::params::Params;
use crate::reply_markup::ReplyMarkup;
use crate::transport::Request;
use crate::types::Bind;
use crate::InvocationError;

mod action;
mod getters;
mod location;
mod media;
mod poll;
mod text;

pub use action::{AnswerCallbackQuery, ChatAction, SendChatAction};
pub use getters::{GetMe, GetUpdates};
pub use location::{SendContact, SendLocation, SendVenue};
pub use media::{
    EditMessageMedia, SendAnimation, SendAudio, SendDocument, SendMedia, SendMediaGroup,
    SendPhoto, SendVideo, SendVideoNote, SendVoice,
};
pub use poll::{SendDice, SendPoll};
pub use text::{EditMessageCaption, EditMessageReplyMarkup, EditMessageText, SendMessage};

// ─── Sendable ─────────────────────────────────────────────────────────────────

/// An outbound request bound to one Bot API method and one result shape.
pub trait Sendable {
    /// The decoded `result` of a successful response.
    type Return: DeserializeOwned + Bind;

    /// Encode the request. Performs no I/O.
    fn build(&self) -> Result<Request, InvocationError>;
}

/// Shared handle type for reply markup stored on builders.
pub type SharedMarkup = Arc<dyn ReplyMarkup>;

/// Marshal optional reply markup; absent markup encodes as an empty field.
pub(crate) fn marshal_markup(markup: Option<&SharedMarkup>) -> Result<String, InvocationError> {
    match markup {
        Some(m) => Ok(m.marshal()?),
        None    => Ok(String::new()),
    }
}

/// Append the delivery options most send methods share.
pub(crate) fn add_delivery(
    params:               &mut Params,
    disable_notification: bool,
    reply_to_message_id:  i32,
    reply_markup:         &str,
) {
    params
        .add("disable_notification", disable_notification)
        .add("reply_to_message_id", reply_to_message_id)
        .add("reply_markup", reply_markup);
}

// ─── Generated boilerplate ────────────────────────────────────────────────────

/// `send()` for a builder with a `bot` field.
macro_rules! impl_send {
    ($($t:ty),* $(,)?) => {$(
        impl $t {
            /// Build the request, send it and decode the result.
            pub async fn send(&self) -> Result<<$t as $crate::sendables::Sendable>::Return, $crate::InvocationError> {
                self.bot.invoke(self).await
            }
        }
    )*};
}

/// Setters for builders carrying `disable_notification`,
/// `reply_to_message_id` and `reply_markup`.
macro_rules! impl_delivery_setters {
    ($($t:ty),* $(,)?) => {$(
        impl $t {
            /// Send silently (no notification sound).
            pub fn disable_notification(mut self, v: bool) -> Self {
                self.disable_notification = v; self
            }

            /// Reply to a specific message ID.
            pub fn reply_to(mut self, message_id: i32) -> Self {
                self.reply_to_message_id = message_id; self
            }

            /// Attach a reply markup (inline or reply keyboard).
            pub fn reply_markup(mut self, markup: impl $crate::reply_markup::ReplyMarkup + 'static) -> Self {
                self.reply_markup = Some(std::sync::Arc::new(markup)); self
            }
        }
    )*};
}

pub(crate) use {impl_delivery_setters, impl_send};
