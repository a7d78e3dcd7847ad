//! Text messages and message edits.

use crate::params::Params;
use crate::reply_markup::ReplyMarkup;
use crate::transport::Request;
use crate::types::Message;
use crate::{Bot, InvocationError};

use super::{SharedMarkup, Sendable, add_delivery, impl_delivery_setters, impl_send, marshal_markup};

// ─── SendMessage ──────────────────────────────────────────────────────────────

/// `sendMessage`.
///
/// ```rust,no_run
/// # async fn f(bot: layer_botapi::Bot) -> Result<(), layer_botapi::InvocationError> {
/// let sent = bot.send_message(42, "Hello, <b>world</b>!")
///     .parse_mode("HTML")
///     .disable_notification(true)
///     .send()
///     .await?;
/// # Ok(()) }
/// ```
#[derive(Clone)]
pub struct SendMessage {
    bot: Bot,
    pub chat_id:              i64,
    pub text:                 String,
    pub parse_mode:           String,
    pub disable_web_preview:  bool,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl SendMessage {
    pub fn parse_mode(mut self, mode: impl Into<String>) -> Self {
        self.parse_mode = mode.into(); self
    }

    /// Disable link preview.
    pub fn disable_web_preview(mut self, v: bool) -> Self {
        self.disable_web_preview = v; self
    }
}

impl Sendable for SendMessage {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("text", &self.text)
            .add("parse_mode", &self.parse_mode)
            .add("disable_web_page_preview", self.disable_web_preview);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        Ok(Request::new("sendMessage", p))
    }
}

// ─── EditMessageText ──────────────────────────────────────────────────────────

/// `editMessageText`. Address the message with `chat_id` + `message_id`, or
/// with `inline_message_id` for inline-mode messages.
#[derive(Clone)]
pub struct EditMessageText {
    bot: Bot,
    pub chat_id:             i64,
    pub message_id:          i32,
    pub inline_message_id:   String,
    pub text:                String,
    pub parse_mode:          String,
    pub disable_web_preview: bool,
    pub reply_markup:        Option<SharedMarkup>,
}

impl EditMessageText {
    pub fn parse_mode(mut self, mode: impl Into<String>) -> Self {
        self.parse_mode = mode.into(); self
    }

    pub fn disable_web_preview(mut self, v: bool) -> Self {
        self.disable_web_preview = v; self
    }

    pub fn reply_markup(mut self, markup: impl ReplyMarkup + 'static) -> Self {
        self.reply_markup = Some(std::sync::Arc::new(markup)); self
    }
}

impl Sendable for EditMessageText {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("message_id", self.message_id)
            .add("inline_message_id", &self.inline_message_id)
            .add("text", &self.text)
            .add("parse_mode", &self.parse_mode)
            .add("disable_web_page_preview", self.disable_web_preview)
            .add("reply_markup", markup);
        Ok(Request::new("editMessageText", p))
    }
}

// ─── EditMessageCaption ───────────────────────────────────────────────────────

/// `editMessageCaption`.
#[derive(Clone)]
pub struct EditMessageCaption {
    bot: Bot,
    pub chat_id:           i64,
    pub message_id:        i32,
    pub inline_message_id: String,
    pub caption:           String,
    pub parse_mode:        String,
    pub reply_markup:      Option<SharedMarkup>,
}

impl EditMessageCaption {
    pub fn parse_mode(mut self, mode: impl Into<String>) -> Self {
        self.parse_mode = mode.into(); self
    }

    pub fn reply_markup(mut self, markup: impl ReplyMarkup + 'static) -> Self {
        self.reply_markup = Some(std::sync::Arc::new(markup)); self
    }
}

impl Sendable for EditMessageCaption {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("message_id", self.message_id)
            .add("inline_message_id", &self.inline_message_id)
            .add("caption", &self.caption)
            .add("parse_mode", &self.parse_mode)
            .add("reply_markup", markup);
        Ok(Request::new("editMessageCaption", p))
    }
}

// ─── EditMessageReplyMarkup ───────────────────────────────────────────────────

/// `editMessageReplyMarkup`. Leaving `reply_markup` unset removes the keyboard.
#[derive(Clone)]
pub struct EditMessageReplyMarkup {
    bot: Bot,
    pub chat_id:           i64,
    pub message_id:        i32,
    pub inline_message_id: String,
    pub reply_markup:      Option<SharedMarkup>,
}

impl Sendable for EditMessageReplyMarkup {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("message_id", self.message_id)
            .add("inline_message_id", &self.inline_message_id)
            .add("reply_markup", markup);
        Ok(Request::new("editMessageReplyMarkup", p))
    }
}

impl_send!(SendMessage, EditMessageText, EditMessageCaption, EditMessageReplyMarkup);
impl_delivery_setters!(SendMessage);

// ─── Bot constructors ─────────────────────────────────────────────────────────

impl Bot {
    /// Compose a text message; web previews follow [`crate::Config::disable_web_preview`].
    pub fn send_message(&self, chat_id: i64, text: impl Into<String>) -> SendMessage {
        SendMessage {
            bot:                  self.clone(),
            chat_id,
            text:                 text.into(),
            parse_mode:           String::new(),
            disable_web_preview:  self.config().disable_web_preview,
            disable_notification: false,
            reply_to_message_id:  0,
            reply_markup:         None,
        }
    }

    /// Replace the text of a sent message.
    pub fn edit_message_text(&self, chat_id: i64, message_id: i32, text: impl Into<String>) -> EditMessageText {
        EditMessageText {
            bot:                 self.clone(),
            chat_id,
            message_id,
            inline_message_id:   String::new(),
            text:                text.into(),
            parse_mode:          String::new(),
            disable_web_preview: self.config().disable_web_preview,
            reply_markup:        None,
        }
    }

    /// Replace the caption of a sent media message.
    pub fn edit_message_caption(&self, chat_id: i64, message_id: i32, caption: impl Into<String>) -> EditMessageCaption {
        EditMessageCaption {
            bot:               self.clone(),
            chat_id,
            message_id,
            inline_message_id: String::new(),
            caption:           caption.into(),
            parse_mode:        String::new(),
            reply_markup:      None,
        }
    }

    /// Replace (or with `None`, remove) the inline keyboard of a sent message.
    pub fn edit_message_reply_markup(
        &self,
        chat_id:    i64,
        message_id: i32,
        markup:     Option<SharedMarkup>,
    ) -> EditMessageReplyMarkup {
        EditMessageReplyMarkup {
            bot:               self.clone(),
            chat_id,
            message_id,
            inline_message_id: String::new(),
            reply_markup:      markup,
        }
    }
}
