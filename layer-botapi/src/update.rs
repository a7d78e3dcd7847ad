//! Inbound updates and their normalization.
//!
//! An [`Update`] carries exactly one populated variant in practice, but the
//! wire format is a bag of optional fields. [`Update::normalize`] picks the
//! variant once, binds the [`Bot`] into everything a handler is likely to
//! reply through, and exposes the result as *effective* message, chat and
//! user.
//!
//! ```rust,no_run
//! # fn f(bot: layer_botapi::Bot, body: &[u8]) -> Result<(), layer_botapi::InvocationError> {
//! let update = layer_botapi::Update::from_slice(body, &bot)?;
//! if let Some(msg) = update.effective_message() {
//!     println!("{:?} in chat {}", msg.text, msg.chat.id);
//! }
//! # Ok(()) }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::types::{
    Bind, CallbackQuery, Chat, ChosenInlineResult, InlineQuery, Message, PreCheckoutQuery,
    ShippingQuery, User,
};
use crate::{Bot, InvocationError};

// ─── UpdateKind ───────────────────────────────────────────────────────────────

/// Which variant of an [`Update`] was selected by normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    InlineQuery,
    /// Also selected for a callback without an attached message; in that case
    /// only the effective user is set.
    CallbackQuery,
    ChosenInlineResult,
    ShippingQuery,
    PreCheckoutQuery,
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
pub struct Update {
    pub update_id:            i64,
    pub message:              Option<Message>,
    pub edited_message:       Option<Message>,
    pub channel_post:         Option<Message>,
    pub edited_channel_post:  Option<Message>,
    pub inline_query:         Option<InlineQuery>,
    pub chosen_inline_result: Option<ChosenInlineResult>,
    pub callback_query:       Option<CallbackQuery>,
    pub shipping_query:       Option<ShippingQuery>,
    pub pre_checkout_query:   Option<PreCheckoutQuery>,
    /// Per-update scratch space for handlers; empty after normalization.
    #[serde(skip)]
    pub data:                 HashMap<String, String>,
    #[serde(skip)]
    kind:                     Option<UpdateKind>,
}

impl Update {
    /// Decode one update from its JSON body and normalize it.
    pub fn from_slice(bytes: &[u8], bot: &Bot) -> Result<Self, InvocationError> {
        let mut update: Update = serde_json::from_slice(bytes)
            .map_err(|e| InvocationError::Deserialize(e.to_string()))?;
        update.normalize(bot);
        Ok(update)
    }

    /// Select the effective variant, bind `bot` into it and clear `data`.
    ///
    /// Calling it again re-selects from the current fields.
    pub fn normalize(&mut self, bot: &Bot) {
        self.kind = self.select();
        self.data.clear();

        match self.kind {
            Some(UpdateKind::Message) => bind_opt(&mut self.message, bot),
            Some(UpdateKind::EditedMessage) => bind_opt(&mut self.edited_message, bot),
            Some(UpdateKind::ChannelPost) => bind_opt(&mut self.channel_post, bot),
            Some(UpdateKind::EditedChannelPost) => bind_opt(&mut self.edited_channel_post, bot),
            Some(UpdateKind::InlineQuery) => {
                if let Some(q) = &mut self.inline_query { q.from.bind(bot); }
            }
            Some(UpdateKind::CallbackQuery) => {
                if let Some(cb) = &mut self.callback_query {
                    cb.from.bind(bot);
                    bind_opt(&mut cb.message, bot);
                }
            }
            Some(UpdateKind::ChosenInlineResult) => {
                if let Some(r) = &mut self.chosen_inline_result { r.from.bind(bot); }
            }
            Some(UpdateKind::ShippingQuery) => {
                if let Some(q) = &mut self.shipping_query { q.from.bind(bot); }
            }
            Some(UpdateKind::PreCheckoutQuery) => {
                if let Some(q) = &mut self.pre_checkout_query { q.from.bind(bot); }
            }
            None => {}
        }

        tracing::trace!("[layer-botapi] update {} normalized as {:?}", self.update_id, self.kind);
    }

    /// First populated variant in priority order.
    fn select(&self) -> Option<UpdateKind> {
        let cb_with_message = self.callback_query.as_ref().is_some_and(|cb| cb.message.is_some());

        if self.message.is_some() {
            Some(UpdateKind::Message)
        } else if self.edited_message.is_some() {
            Some(UpdateKind::EditedMessage)
        } else if self.channel_post.is_some() {
            Some(UpdateKind::ChannelPost)
        } else if self.edited_channel_post.is_some() {
            Some(UpdateKind::EditedChannelPost)
        } else if self.inline_query.is_some() {
            Some(UpdateKind::InlineQuery)
        } else if cb_with_message {
            Some(UpdateKind::CallbackQuery)
        } else if self.chosen_inline_result.is_some() {
            Some(UpdateKind::ChosenInlineResult)
        } else if self.shipping_query.is_some() {
            Some(UpdateKind::ShippingQuery)
        } else if self.pre_checkout_query.is_some() {
            Some(UpdateKind::PreCheckoutQuery)
        } else if self.callback_query.is_some() {
            // Inline-mode callbacks carry no message. Older routers left
            // such updates with no effective fields; here the sender is kept.
            Some(UpdateKind::CallbackQuery)
        } else {
            None
        }
    }

    /// The variant chosen by the last [`normalize`](Self::normalize), if any.
    pub fn kind(&self) -> Option<UpdateKind> { self.kind }

    /// The message a handler would reply to: the (edited) message or channel
    /// post, or the message carrying a pressed inline button.
    pub fn effective_message(&self) -> Option<&Message> {
        match self.kind? {
            UpdateKind::Message           => self.message.as_ref(),
            UpdateKind::EditedMessage     => self.edited_message.as_ref(),
            UpdateKind::ChannelPost       => self.channel_post.as_ref(),
            UpdateKind::EditedChannelPost => self.edited_channel_post.as_ref(),
            UpdateKind::CallbackQuery     => self.callback_query.as_ref()?.message.as_ref(),
            _                             => None,
        }
    }

    /// The chat of the effective message.
    pub fn effective_chat(&self) -> Option<&Chat> {
        self.effective_message().map(|m| &m.chat)
    }

    /// Whoever caused the update. Unset for channel posts.
    pub fn effective_user(&self) -> Option<&User> {
        match self.kind? {
            UpdateKind::Message            => self.message.as_ref()?.from.as_ref(),
            UpdateKind::EditedMessage      => self.edited_message.as_ref()?.from.as_ref(),
            UpdateKind::ChannelPost
            | UpdateKind::EditedChannelPost => None,
            UpdateKind::InlineQuery        => self.inline_query.as_ref().map(|q| &q.from),
            UpdateKind::CallbackQuery      => self.callback_query.as_ref().map(|q| &q.from),
            UpdateKind::ChosenInlineResult => self.chosen_inline_result.as_ref().map(|r| &r.from),
            UpdateKind::ShippingQuery      => self.shipping_query.as_ref().map(|q| &q.from),
            UpdateKind::PreCheckoutQuery   => self.pre_checkout_query.as_ref().map(|q| &q.from),
        }
    }
}

impl Bind for Update {
    fn bind(&mut self, bot: &Bot) { self.normalize(bot); }
}

fn bind_opt(msg: &mut Option<Message>, bot: &Bot) {
    if let Some(m) = msg { m.bind(bot); }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;
    use crate::transport::{FilePart, Transport};
    use crate::Config;

    struct Offline;

    #[async_trait::async_trait]
    impl Transport for Offline {
        async fn get(&self, _: &str, _: &Params) -> Result<Vec<u8>, InvocationError> {
            Err(InvocationError::Deserialize("offline".into()))
        }
        async fn post_multipart(&self, _: &str, _: &Params, _: &[FilePart]) -> Result<Vec<u8>, InvocationError> {
            Err(InvocationError::Deserialize("offline".into()))
        }
    }

    fn bot() -> Bot {
        Bot::with_transport(Config::default(), Offline)
    }

    fn parse(json: &str) -> Update {
        Update::from_slice(json.as_bytes(), &bot()).unwrap()
    }

    const MESSAGE: &str = r#"{"message_id":5,"date":1,"chat":{"id":10,"type":"private"},
        "from":{"id":7,"is_bot":false,"first_name":"Ann"},"text":"hi"}"#;

    #[test]
    fn message_sets_all_three() {
        let u = parse(&format!(r#"{{"update_id":1,"message":{MESSAGE}}}"#));
        assert_eq!(u.kind(), Some(UpdateKind::Message));
        assert_eq!(u.effective_message().unwrap().message_id, 5);
        assert_eq!(u.effective_chat().unwrap().id, 10);
        assert_eq!(u.effective_user().unwrap().id, 7);
        assert!(u.effective_message().unwrap().bot().is_some());
        assert!(u.effective_chat().unwrap().bot().is_some());
        assert!(u.effective_user().unwrap().bot().is_some());
    }

    #[test]
    fn chosen_inline_result_sets_only_user() {
        let u = parse(r#"{"update_id":2,"chosen_inline_result":{"result_id":"r",
            "from":{"id":9,"first_name":"Bo"},"query":"q"}}"#);
        assert_eq!(u.kind(), Some(UpdateKind::ChosenInlineResult));
        assert!(u.effective_message().is_none());
        assert!(u.effective_chat().is_none());
        assert_eq!(u.effective_user().unwrap().id, 9);
        assert!(u.effective_user().unwrap().bot().is_some());
    }

    #[test]
    fn inline_query_has_user_but_no_message() {
        let u = parse(r#"{"update_id":3,"inline_query":{"id":"q1",
            "from":{"id":4,"first_name":"Cy"},"query":"cats","offset":""}}"#);
        assert_eq!(u.kind(), Some(UpdateKind::InlineQuery));
        assert!(u.effective_message().is_none());
        assert_eq!(u.effective_user().unwrap().id, 4);
    }

    #[test]
    fn callback_uses_query_sender() {
        let u = parse(&format!(
            r#"{{"update_id":4,"callback_query":{{"id":"c","chat_instance":"x","data":"d",
                "from":{{"id":99,"first_name":"Di"}},"message":{MESSAGE}}}}}"#
        ));
        assert_eq!(u.kind(), Some(UpdateKind::CallbackQuery));
        assert_eq!(u.effective_message().unwrap().message_id, 5);
        assert_eq!(u.effective_chat().unwrap().id, 10);
        // The pressing user, not the author of the message with the button.
        assert_eq!(u.effective_user().unwrap().id, 99);
        assert!(u.effective_message().unwrap().bot().is_some());
    }

    #[test]
    fn callback_without_message_sets_only_user() {
        let u = parse(r#"{"update_id":5,"callback_query":{"id":"c","inline_message_id":"im",
            "from":{"id":3,"first_name":"Ed"}}}"#);
        assert_eq!(u.kind(), Some(UpdateKind::CallbackQuery));
        assert!(u.effective_message().is_none());
        assert!(u.effective_chat().is_none());
        assert_eq!(u.effective_user().unwrap().id, 3);
    }

    #[test]
    fn channel_post_has_no_user() {
        let u = parse(r#"{"update_id":6,"channel_post":{"message_id":1,"date":1,
            "chat":{"id":-100,"type":"channel","title":"news"},"text":"post"}}"#);
        assert_eq!(u.kind(), Some(UpdateKind::ChannelPost));
        assert_eq!(u.effective_chat().unwrap().id, -100);
        assert!(u.effective_user().is_none());
    }

    #[test]
    fn message_wins_over_later_variants() {
        let u = parse(&format!(
            r#"{{"update_id":7,"message":{MESSAGE},
                "inline_query":{{"id":"q","from":{{"id":1,"first_name":"X"}}}}}}"#
        ));
        assert_eq!(u.kind(), Some(UpdateKind::Message));
        assert_eq!(u.effective_user().unwrap().id, 7);
    }

    #[test]
    fn reply_chain_is_bound() {
        let u = parse(&format!(
            r#"{{"update_id":8,"message":{{"message_id":6,"date":2,
                "chat":{{"id":10,"type":"private"}},"text":"re",
                "reply_to_message":{MESSAGE}}}}}"#
        ));
        let reply = u.effective_message().unwrap().reply_to_message.as_ref().unwrap();
        assert!(reply.bot().is_some());
        assert!(reply.from.as_ref().unwrap().bot().is_some());
    }

    #[test]
    fn data_is_cleared() {
        let mut u = parse(&format!(r#"{{"update_id":9,"message":{MESSAGE}}}"#));
        assert!(u.data.is_empty());
        u.data.insert("k".into(), "v".into());
        u.normalize(&bot());
        assert!(u.data.is_empty());
    }

    #[test]
    fn empty_update_selects_nothing() {
        let u = parse(r#"{"update_id":10}"#);
        assert_eq!(u.kind(), None);
        assert!(u.effective_message().is_none());
        assert!(u.effective_user().is_none());
    }

    #[test]
    fn malformed_body_is_deserialize_error() {
        let err = Update::from_slice(b"{not json", &bot()).unwrap_err();
        assert!(matches!(err, InvocationError::Deserialize(_)));
    }
}
