//! Chat actions and callback-query answers.

use std::fmt;

use crate::params::Params;
use crate::transport::Request;
use crate::{Bot, InvocationError};

use super::{Sendable, impl_send};

// ─── ChatAction ───────────────────────────────────────────────────────────────

/// The activity shown to chat members ("typing…", "sending photo…").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordAudio,
    UploadAudio,
    UploadDocument,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}

impl ChatAction {
    /// Wire name, e.g. `upload_photo`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Typing          => "typing",
            Self::UploadPhoto     => "upload_photo",
            Self::RecordVideo     => "record_video",
            Self::UploadVideo     => "upload_video",
            Self::RecordAudio     => "record_audio",
            Self::UploadAudio     => "upload_audio",
            Self::UploadDocument  => "upload_document",
            Self::FindLocation    => "find_location",
            Self::RecordVideoNote => "record_video_note",
            Self::UploadVideoNote => "upload_video_note",
        }
    }
}

impl fmt::Display for ChatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ChatAction> for String {
    fn from(a: ChatAction) -> Self {
        a.as_str().to_owned()
    }
}

// ─── SendChatAction ───────────────────────────────────────────────────────────

/// `sendChatAction`. The server shows the action for about five seconds or
/// until the next message from the bot arrives.
#[derive(Clone)]
pub struct SendChatAction {
    bot: Bot,
    pub chat_id: i64,
    pub action:  String,
}

impl SendChatAction {
    /// Accepts a [`ChatAction`] or any raw action name.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into(); self
    }
}

impl Sendable for SendChatAction {
    type Return = bool;

    fn build(&self) -> Result<Request, InvocationError> {
        let mut p = Params::new();
        p.add("chat_id", self.chat_id).add("action", &self.action);
        Ok(Request::new("sendChatAction", p))
    }
}

// ─── AnswerCallbackQuery ──────────────────────────────────────────────────────

/// `answerCallbackQuery`. Must be sent for every callback query, even with no
/// text, so the client stops its progress indicator.
#[derive(Clone)]
pub struct AnswerCallbackQuery {
    bot: Bot,
    pub callback_query_id: String,
    pub text:              String,
    /// Show `text` as a modal alert instead of a toast.
    pub show_alert:        bool,
    pub url:               String,
    pub cache_time:        i32,
}

impl AnswerCallbackQuery {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into(); self
    }

    pub fn show_alert(mut self, v: bool) -> Self {
        self.show_alert = v; self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into(); self
    }

    pub fn cache_time(mut self, seconds: i32) -> Self {
        self.cache_time = seconds; self
    }
}

impl Sendable for AnswerCallbackQuery {
    type Return = bool;

    fn build(&self) -> Result<Request, InvocationError> {
        let mut p = Params::new();
        p.add("callback_query_id", &self.callback_query_id)
            .add("text", &self.text)
            .add("show_alert", self.show_alert)
            .add("url", &self.url)
            .add("cache_time", self.cache_time);
        Ok(Request::new("answerCallbackQuery", p))
    }
}

impl_send!(SendChatAction, AnswerCallbackQuery);

impl Bot {
    /// Defaults to [`ChatAction::Typing`].
    pub fn send_chat_action(&self, chat_id: i64) -> SendChatAction {
        SendChatAction {
            bot:     self.clone(),
            chat_id,
            action:  ChatAction::Typing.into(),
        }
    }

    pub fn answer_callback_query(&self, callback_query_id: impl Into<String>) -> AnswerCallbackQuery {
        AnswerCallbackQuery {
            bot:               self.clone(),
            callback_query_id: callback_query_id.into(),
            text:              String::new(),
            show_alert:        false,
            url:               String::new(),
            cache_time:        0,
        }
    }
}
