//! Media sends: single files, albums and media edits.
//!
//! Single-file builders hold an `Option<InputFile>`; leaving it `None` fails
//! with [`InvocationError::NoMediaSource`] at send time without touching the
//! network.

use crate::input_file::{InputFile, deliver};
use crate::input_media::{InputMedia, attach_name, encode_group};
use crate::params::Params;
use crate::reply_markup::ReplyMarkup;
use crate::transport::Request;
use crate::types::Message;
use crate::{Bot, InvocationError};

use super::{SharedMarkup, Sendable, add_delivery, impl_delivery_setters, impl_send, marshal_markup};

// ─── SendPhoto ────────────────────────────────────────────────────────────────

/// `sendPhoto`.
#[derive(Clone)]
pub struct SendPhoto {
    bot: Bot,
    pub chat_id:              i64,
    pub photo:                Option<InputFile>,
    pub caption:              String,
    pub parse_mode:           String,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl SendPhoto {
    pub fn photo(mut self, file: InputFile) -> Self {
        self.photo = Some(file); self
    }

    pub fn parse_mode(mut self, mode: impl Into<String>) -> Self {
        self.parse_mode = mode.into(); self
    }
}

impl Sendable for SendPhoto {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("caption", &self.caption)
            .add("parse_mode", &self.parse_mode);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        deliver(self.photo.as_ref(), "sendPhoto", p, "photo")
    }
}

// ─── SendAudio ────────────────────────────────────────────────────────────────

/// `sendAudio` — music shown in the player.
#[derive(Clone)]
pub struct SendAudio {
    bot: Bot,
    pub chat_id:              i64,
    pub audio:                Option<InputFile>,
    pub caption:              String,
    pub parse_mode:           String,
    pub duration:             i32,
    pub performer:            String,
    pub title:                String,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl SendAudio {
    pub fn audio(mut self, file: InputFile) -> Self {
        self.audio = Some(file); self
    }

    pub fn parse_mode(mut self, mode: impl Into<String>) -> Self {
        self.parse_mode = mode.into(); self
    }
}

impl Sendable for SendAudio {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("caption", &self.caption)
            .add("parse_mode", &self.parse_mode)
            .add("duration", self.duration)
            .add("performer", &self.performer)
            .add("title", &self.title);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        deliver(self.audio.as_ref(), "sendAudio", p, "audio")
    }
}

// ─── SendDocument ─────────────────────────────────────────────────────────────

/// `sendDocument` — any file, sent as-is.
#[derive(Clone)]
pub struct SendDocument {
    bot: Bot,
    pub chat_id:              i64,
    pub document:             Option<InputFile>,
    pub caption:              String,
    pub parse_mode:           String,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl SendDocument {
    pub fn document(mut self, file: InputFile) -> Self {
        self.document = Some(file); self
    }

    pub fn parse_mode(mut self, mode: impl Into<String>) -> Self {
        self.parse_mode = mode.into(); self
    }
}

impl Sendable for SendDocument {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("caption", &self.caption)
            .add("parse_mode", &self.parse_mode);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        deliver(self.document.as_ref(), "sendDocument", p, "document")
    }
}

// ─── SendVideo ────────────────────────────────────────────────────────────────

/// `sendVideo`.
#[derive(Clone)]
pub struct SendVideo {
    bot: Bot,
    pub chat_id:              i64,
    pub video:                Option<InputFile>,
    pub duration:             i32,
    pub width:                i32,
    pub height:               i32,
    pub caption:              String,
    pub parse_mode:           String,
    pub supports_streaming:   bool,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl SendVideo {
    pub fn video(mut self, file: InputFile) -> Self {
        self.video = Some(file); self
    }

    pub fn parse_mode(mut self, mode: impl Into<String>) -> Self {
        self.parse_mode = mode.into(); self
    }
}

impl Sendable for SendVideo {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("duration", self.duration)
            .add("width", self.width)
            .add("height", self.height)
            .add("caption", &self.caption)
            .add("parse_mode", &self.parse_mode)
            .add("supports_streaming", self.supports_streaming);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        deliver(self.video.as_ref(), "sendVideo", p, "video")
    }
}

// ─── SendVoice ────────────────────────────────────────────────────────────────

/// `sendVoice` — an OGG/OPUS voice note.
#[derive(Clone)]
pub struct SendVoice {
    bot: Bot,
    pub chat_id:              i64,
    pub voice:                Option<InputFile>,
    pub caption:              String,
    pub parse_mode:           String,
    pub duration:             i32,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl SendVoice {
    pub fn voice(mut self, file: InputFile) -> Self {
        self.voice = Some(file); self
    }

    pub fn parse_mode(mut self, mode: impl Into<String>) -> Self {
        self.parse_mode = mode.into(); self
    }
}

impl Sendable for SendVoice {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("caption", &self.caption)
            .add("parse_mode", &self.parse_mode)
            .add("duration", self.duration);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        deliver(self.voice.as_ref(), "sendVoice", p, "voice")
    }
}

// ─── SendVideoNote ────────────────────────────────────────────────────────────

/// `sendVideoNote` — a round video message.
#[derive(Clone)]
pub struct SendVideoNote {
    bot: Bot,
    pub chat_id:              i64,
    pub video_note:           Option<InputFile>,
    pub duration:             i32,
    /// Diameter of the video.
    pub length:               i32,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl SendVideoNote {
    pub fn video_note(mut self, file: InputFile) -> Self {
        self.video_note = Some(file); self
    }
}

impl Sendable for SendVideoNote {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("duration", self.duration)
            .add("length", self.length);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        deliver(self.video_note.as_ref(), "sendVideoNote", p, "video_note")
    }
}

// ─── SendAnimation ────────────────────────────────────────────────────────────

/// `sendAnimation` — GIF or soundless H.264 video.
#[derive(Clone)]
pub struct SendAnimation {
    bot: Bot,
    pub chat_id:              i64,
    pub animation:            Option<InputFile>,
    pub duration:             i32,
    pub width:                i32,
    pub height:               i32,
    pub caption:              String,
    pub parse_mode:           String,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl SendAnimation {
    pub fn animation(mut self, file: InputFile) -> Self {
        self.animation = Some(file); self
    }

    pub fn parse_mode(mut self, mode: impl Into<String>) -> Self {
        self.parse_mode = mode.into(); self
    }
}

impl Sendable for SendAnimation {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("duration", self.duration)
            .add("width", self.width)
            .add("height", self.height)
            .add("caption", &self.caption)
            .add("parse_mode", &self.parse_mode);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        deliver(self.animation.as_ref(), "sendAnimation", p, "animation")
    }
}

// ─── SendMedia ────────────────────────────────────────────────────────────────

/// Send one [`InputMedia`] on its own, through the method its kind maps to
/// (`sendPhoto`, `sendVideo`, …). Caption, parse mode and kind metadata are
/// taken from the descriptor.
#[derive(Clone)]
pub struct SendMedia {
    bot: Bot,
    pub chat_id:              i64,
    pub media:                InputMedia,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl Sendable for SendMedia {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        self.media.deliver(p)
    }
}

// ─── SendMediaGroup ───────────────────────────────────────────────────────────

/// `sendMediaGroup` — an album of photos, videos, audios or documents.
///
/// Uploaded items travel as extra parts of one multipart request and are
/// referenced from the `media` JSON as `attach://file<index>`.
#[derive(Clone)]
pub struct SendMediaGroup {
    bot: Bot,
    pub chat_id:              i64,
    pub media:                Vec<InputMedia>,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl SendMediaGroup {
    /// Append one item to the album.
    pub fn add(mut self, item: InputMedia) -> Self {
        self.media.push(item); self
    }
}

impl Sendable for SendMediaGroup {
    type Return = Vec<Message>;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let (media, files) = encode_group(&self.media)?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id).add("media", media);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        let mut req = Request::new("sendMediaGroup", p);
        req.files = files;
        Ok(req)
    }
}

// ─── EditMessageMedia ─────────────────────────────────────────────────────────

/// `editMessageMedia` — replace the media of a sent message.
///
/// The new media is carried as a JSON descriptor in `media`; an upload is
/// attached as `file0`.
#[derive(Clone)]
pub struct EditMessageMedia {
    bot: Bot,
    pub chat_id:           i64,
    pub message_id:        i32,
    pub inline_message_id: String,
    pub media:             Option<InputMedia>,
    pub reply_markup:      Option<SharedMarkup>,
}

impl EditMessageMedia {
    pub fn media(mut self, media: InputMedia) -> Self {
        self.media = Some(media); self
    }

    pub fn reply_markup(mut self, markup: impl ReplyMarkup + 'static) -> Self {
        self.reply_markup = Some(std::sync::Arc::new(markup)); self
    }
}

impl Sendable for EditMessageMedia {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let media = self.media.as_ref().ok_or(InvocationError::NoMediaSource)?;
        let (json, file) = media.to_json(&attach_name(0))?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("message_id", self.message_id)
            .add("inline_message_id", &self.inline_message_id)
            .add_json("media", &json)?;
        p.add("reply_markup", markup);
        let mut req = Request::new("editMessageMedia", p);
        req.files.extend(file);
        Ok(req)
    }
}

impl_send!(
    SendPhoto, SendAudio, SendDocument, SendVideo, SendVoice, SendVideoNote,
    SendAnimation, SendMedia, SendMediaGroup, EditMessageMedia,
);
impl_delivery_setters!(
    SendPhoto, SendAudio, SendDocument, SendVideo, SendVoice, SendVideoNote,
    SendAnimation, SendMedia, SendMediaGroup,
);

// ─── Bot constructors ─────────────────────────────────────────────────────────

/// Common skeleton of the single-file builders.
macro_rules! file_builder {
    ($ty:ident, $field:ident, $bot:expr, $chat_id:expr, { $($extra:ident: $val:expr),* $(,)? }) => {
        $ty {
            bot:                  $bot.clone(),
            chat_id:              $chat_id,
            $field:               None,
            disable_notification: false,
            reply_to_message_id:  0,
            reply_markup:         None,
            $($extra: $val,)*
        }
    };
}

impl Bot {
    /// Compose a photo; set the file with [`SendPhoto::photo`].
    pub fn send_photo(&self, chat_id: i64, caption: impl Into<String>) -> SendPhoto {
        file_builder!(SendPhoto, photo, self, chat_id, {
            caption: caption.into(), parse_mode: String::new(),
        })
    }

    pub fn send_audio(&self, chat_id: i64, caption: impl Into<String>) -> SendAudio {
        file_builder!(SendAudio, audio, self, chat_id, {
            caption: caption.into(), parse_mode: String::new(),
            duration: 0, performer: String::new(), title: String::new(),
        })
    }

    pub fn send_document(&self, chat_id: i64, caption: impl Into<String>) -> SendDocument {
        file_builder!(SendDocument, document, self, chat_id, {
            caption: caption.into(), parse_mode: String::new(),
        })
    }

    pub fn send_video(&self, chat_id: i64, caption: impl Into<String>) -> SendVideo {
        file_builder!(SendVideo, video, self, chat_id, {
            caption: caption.into(), parse_mode: String::new(),
            duration: 0, width: 0, height: 0, supports_streaming: false,
        })
    }

    pub fn send_voice(&self, chat_id: i64, caption: impl Into<String>) -> SendVoice {
        file_builder!(SendVoice, voice, self, chat_id, {
            caption: caption.into(), parse_mode: String::new(), duration: 0,
        })
    }

    pub fn send_video_note(&self, chat_id: i64) -> SendVideoNote {
        file_builder!(SendVideoNote, video_note, self, chat_id, { duration: 0, length: 0 })
    }

    pub fn send_animation(&self, chat_id: i64, caption: impl Into<String>) -> SendAnimation {
        file_builder!(SendAnimation, animation, self, chat_id, {
            caption: caption.into(), parse_mode: String::new(),
            duration: 0, width: 0, height: 0,
        })
    }

    /// Send one media descriptor through the method matching its kind.
    pub fn send_media(&self, chat_id: i64, media: InputMedia) -> SendMedia {
        SendMedia {
            bot:                  self.clone(),
            chat_id,
            media,
            disable_notification: false,
            reply_to_message_id:  0,
            reply_markup:         None,
        }
    }

    /// Compose an album; add items with [`SendMediaGroup::add`].
    pub fn send_media_group(&self, chat_id: i64) -> SendMediaGroup {
        SendMediaGroup {
            bot:                  self.clone(),
            chat_id,
            media:                Vec::new(),
            disable_notification: false,
            reply_to_message_id:  0,
            reply_markup:         None,
        }
    }

    /// Replace the media of a sent message; set it with [`EditMessageMedia::media`].
    pub fn edit_message_media(&self, chat_id: i64, message_id: i32) -> EditMessageMedia {
        EditMessageMedia {
            bot:               self.clone(),
            chat_id,
            message_id,
            inline_message_id: String::new(),
            media:             None,
            reply_markup:      None,
        }
    }
}
