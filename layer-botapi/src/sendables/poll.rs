//! Polls and dice.

use crate::params::Params;
use crate::transport::Request;
use crate::types::Message;
use crate::{Bot, InvocationError};

use super::{SharedMarkup, Sendable, add_delivery, impl_delivery_setters, impl_send, marshal_markup};

/// `sendPoll`.
///
/// `options` is always sent as a JSON array, `[]` when empty.
#[derive(Clone)]
pub struct SendPoll {
    bot: Bot,
    pub chat_id:                 i64,
    pub question:                String,
    pub options:                 Vec<String>,
    pub is_anonymous:            bool,
    /// `regular` or `quiz`; empty lets the server choose `regular`.
    pub kind:                    String,
    pub allows_multiple_answers: bool,
    /// Index of the right answer, quiz polls only.
    pub correct_option_id:       i32,
    pub explanation:             String,
    pub explanation_parse_mode:  String,
    pub open_period:             i32,
    pub close_date:              i64,
    pub is_closed:               bool,
    pub disable_notification:    bool,
    pub reply_to_message_id:     i32,
    pub reply_markup:            Option<SharedMarkup>,
}

impl SendPoll {
    /// Make this a quiz with `correct_option_id` as the right answer.
    pub fn quiz(mut self, correct_option_id: i32) -> Self {
        self.kind = "quiz".into();
        self.correct_option_id = correct_option_id;
        self
    }

    pub fn anonymous(mut self, v: bool) -> Self {
        self.is_anonymous = v; self
    }
}

impl Sendable for SendPoll {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id).add("question", &self.question);
        p.add_json("options", &self.options)?;
        p.add("is_anonymous", self.is_anonymous)
            .add("type", &self.kind)
            .add("allows_multiple_answers", self.allows_multiple_answers)
            .add("correct_option_id", self.correct_option_id)
            .add("explanation", &self.explanation)
            .add("explanation_parse_mode", &self.explanation_parse_mode)
            .add("open_period", self.open_period)
            .add("close_date", self.close_date)
            .add("is_closed", self.is_closed);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        Ok(Request::new("sendPoll", p))
    }
}

/// `sendDice` — an animated emoji with a random value.
#[derive(Clone)]
pub struct SendDice {
    bot: Bot,
    pub chat_id:              i64,
    /// `🎲`, `🎯`, `🏀`, …; empty means the server default (`🎲`).
    pub emoji:                String,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl SendDice {
    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into(); self
    }
}

impl Sendable for SendDice {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id).add("emoji", &self.emoji);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        Ok(Request::new("sendDice", p))
    }
}

impl_send!(SendPoll, SendDice);
impl_delivery_setters!(SendPoll, SendDice);

impl Bot {
    pub fn send_poll(&self, chat_id: i64, question: impl Into<String>, options: Vec<String>) -> SendPoll {
        SendPoll {
            bot:                     self.clone(),
            chat_id,
            question:                question.into(),
            options,
            is_anonymous:            true,
            kind:                    String::new(),
            allows_multiple_answers: false,
            correct_option_id:       0,
            explanation:             String::new(),
            explanation_parse_mode:  String::new(),
            open_period:             0,
            close_date:              0,
            is_closed:               false,
            disable_notification:    false,
            reply_to_message_id:     0,
            reply_markup:            None,
        }
    }

    pub fn send_dice(&self, chat_id: i64) -> SendDice {
        SendDice {
            bot:                  self.clone(),
            chat_id,
            emoji:                String::new(),
            disable_notification: false,
            reply_to_message_id:  0,
            reply_markup:         None,
        }
    }
}
