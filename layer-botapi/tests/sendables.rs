use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use layer_botapi::{
    Bot, Config, FilePart, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, InputMedia,
    InvocationError, Params, ReplyMarkup, Transport,
};

// ── MemTransport ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Call {
    Get       { method: String, params: Params },
    Multipart { method: String, params: Params, files: Vec<FilePart> },
}

impl Call {
    fn method(&self) -> &str {
        match self {
            Call::Get { method, .. } | Call::Multipart { method, .. } => method,
        }
    }

    fn params(&self) -> &Params {
        match self {
            Call::Get { params, .. } | Call::Multipart { params, .. } => params,
        }
    }
}

/// Records every call and answers with a canned response body.
#[derive(Clone)]
struct MemTransport {
    calls: Arc<Mutex<Vec<Call>>>,
    reply: Arc<String>,
}

impl MemTransport {
    fn new(reply: &str) -> Self {
        Self { calls: Arc::default(), reply: Arc::new(reply.to_string()) }
    }

    fn calls(&self) -> Vec<Call> { self.calls.lock().unwrap().clone() }
}

#[async_trait]
impl Transport for MemTransport {
    async fn get(&self, method: &str, params: &Params) -> Result<Vec<u8>, InvocationError> {
        self.calls.lock().unwrap().push(Call::Get { method: method.into(), params: params.clone() });
        Ok(self.reply.as_bytes().to_vec())
    }

    async fn post_multipart(
        &self,
        method: &str,
        params: &Params,
        files:  &[FilePart],
    ) -> Result<Vec<u8>, InvocationError> {
        self.calls.lock().unwrap().push(Call::Multipart {
            method: method.into(),
            params: params.clone(),
            files:  files.to_vec(),
        });
        Ok(self.reply.as_bytes().to_vec())
    }
}

const MESSAGE: &str = r#"{"message_id":77,"date":1,"chat":{"id":42,"type":"private"},
    "from":{"id":1,"is_bot":true,"first_name":"bot"},"text":"ok"}"#;

fn ok(result: &str) -> String { format!(r#"{{"ok":true,"result":{result}}}"#) }

fn bot_with(reply: &str) -> (Bot, MemTransport) {
    let t = MemTransport::new(reply);
    let bot = Bot::with_transport(Config { token: "1:T".into(), ..Default::default() }, t.clone());
    (bot, t)
}

// ── Text ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn send_message_encodes_wire_names() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    let msg = bot.send_message(42, "hi").parse_mode("HTML").reply_to(3).send().await.unwrap();
    assert_eq!(msg.message_id, 77);

    let calls = t.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Call::Get { .. }));
    assert_eq!(calls[0].method(), "sendMessage");
    let p = calls[0].params();
    assert_eq!(p.get("chat_id"), Some("42"));
    assert_eq!(p.get("text"), Some("hi"));
    assert_eq!(p.get("parse_mode"), Some("HTML"));
    assert_eq!(p.get("disable_web_page_preview"), Some("false"));
    assert_eq!(p.get("disable_notification"), Some("false"));
    assert_eq!(p.get("reply_to_message_id"), Some("3"));
    assert_eq!(p.get("reply_markup"), Some(""));
}

#[tokio::test]
async fn web_preview_default_comes_from_config() {
    let t = MemTransport::new(&ok(MESSAGE));
    let cfg = Config { disable_web_preview: true, ..Default::default() };
    let bot = Bot::with_transport(cfg, t.clone());
    bot.send_message(1, "x").send().await.unwrap();
    assert_eq!(t.calls()[0].params().get("disable_web_page_preview"), Some("true"));
}

#[tokio::test]
async fn sending_twice_repeats_the_request() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    let req = bot.send_message(42, "again");
    req.send().await.unwrap();
    req.send().await.unwrap();

    let calls = t.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].params(), calls[1].params());
}

#[tokio::test]
async fn edit_reply_markup_has_its_own_method() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    bot.edit_message_reply_markup(42, 77, None).send().await.unwrap();
    assert_eq!(t.calls()[0].method(), "editMessageReplyMarkup");
    assert_eq!(t.calls()[0].params().get("reply_markup"), Some(""));
}

#[tokio::test]
async fn inline_keyboard_is_marshalled() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    let kb = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback("Go", "go")]]);
    bot.send_message(42, "pick").reply_markup(kb).send().await.unwrap();
    let markup = t.calls()[0].params().get("reply_markup").unwrap().to_string();
    assert!(markup.contains(r#""callback_data":"go""#), "{markup}");
}

struct BrokenMarkup;

impl ReplyMarkup for BrokenMarkup {
    fn marshal(&self) -> serde_json::Result<String> {
        Err(<serde_json::Error as serde::ser::Error>::custom("broken"))
    }
}

#[tokio::test]
async fn markup_failure_sends_nothing() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    let err = bot.send_message(42, "x").reply_markup(BrokenMarkup).send().await.unwrap_err();
    assert!(matches!(err, InvocationError::Encode(_)));
    assert!(t.calls().is_empty());
}

// ── Media ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn file_id_photo_is_a_plain_request() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    bot.send_photo(42, "cap").photo(InputFile::file_id("AgAD")).send().await.unwrap();
    let calls = t.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0], Call::Get { .. }));
    assert_eq!(calls[0].method(), "sendPhoto");
    assert_eq!(calls[0].params().get("photo"), Some("AgAD"));
    assert_eq!(calls[0].params().get("caption"), Some("cap"));
}

#[tokio::test]
async fn url_photo_goes_to_send_photo() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    bot.send_photo(42, "").photo(InputFile::url("https://example.org/a.png")).send().await.unwrap();
    let calls = t.calls();
    assert_eq!(calls[0].method(), "sendPhoto");
    assert_eq!(calls[0].params().get("photo"), Some("https://example.org/a.png"));
}

#[tokio::test]
async fn upload_is_multipart_only() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    bot.send_document(42, "")
        .document(InputFile::upload("report.pdf", b"%PDF".to_vec()))
        .send()
        .await
        .unwrap();

    let calls = t.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::Multipart { method, params, files } => {
            assert_eq!(method, "sendDocument");
            assert!(!params.contains("document"));
            assert_eq!(files.len(), 1);
            assert_eq!(files[0].field, "document");
            assert_eq!(files[0].file_name, "report.pdf");
            assert_eq!(&*files[0].data, b"%PDF");
        }
        other => panic!("expected multipart, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_media_sends_nothing() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    let err = bot.send_photo(42, "cap").send().await.unwrap_err();
    assert!(matches!(err, InvocationError::NoMediaSource));
    let err = bot.edit_message_media(42, 77).send().await.unwrap_err();
    assert!(matches!(err, InvocationError::NoMediaSource));
    assert!(t.calls().is_empty());
}

#[tokio::test]
async fn empty_reference_sends_nothing() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    let err = bot.send_photo(42, "").photo(InputFile::file_id("")).send().await.unwrap_err();
    assert!(matches!(err, InvocationError::NoMediaSource));
    let err = bot.send_photo(42, "").photo(InputFile::url("")).send().await.unwrap_err();
    assert!(matches!(err, InvocationError::NoMediaSource));
    let err = bot
        .send_media_group(42)
        .add(InputMedia::photo(InputFile::file_id("p0")))
        .add(InputMedia::photo(InputFile::file_id("")))
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, InvocationError::NoMediaSource));
    let err = bot
        .edit_message_media(42, 77)
        .media(InputMedia::video(InputFile::url("")))
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, InvocationError::NoMediaSource));
    assert!(t.calls().is_empty());
}

#[tokio::test]
async fn voice_parse_mode_is_sent() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    bot.send_voice(42, "<i>hi</i>")
        .voice(InputFile::file_id("ogg"))
        .parse_mode("HTML")
        .send()
        .await
        .unwrap();
    assert_eq!(t.calls()[0].method(), "sendVoice");
    assert_eq!(t.calls()[0].params().get("parse_mode"), Some("HTML"));
}

#[tokio::test]
async fn video_uses_supports_streaming() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    bot.send_video(42, "").video(InputFile::file_id("v")).send().await.unwrap();
    let p = t.calls()[0].params().clone();
    assert!(p.contains("supports_streaming"));
    assert_eq!(p.iter().filter(|(k, _)| *k == "duration").count(), 1);
}

#[tokio::test]
async fn video_note_field_name() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    bot.send_video_note(42).video_note(InputFile::file_id("vn")).send().await.unwrap();
    assert_eq!(t.calls()[0].method(), "sendVideoNote");
    assert_eq!(t.calls()[0].params().get("video_note"), Some("vn"));
}

#[tokio::test]
async fn send_media_uses_the_kind_method() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    let media = InputMedia::animation(InputFile::file_id("gif")).caption("lol");
    bot.send_media(42, media).send().await.unwrap();
    let calls = t.calls();
    assert_eq!(calls[0].method(), "sendAnimation");
    assert_eq!(calls[0].params().get("animation"), Some("gif"));
    assert_eq!(calls[0].params().get("caption"), Some("lol"));
}

#[tokio::test]
async fn media_group_uploads_travel_as_attachments() {
    let (bot, t) = bot_with(&ok(&format!("[{MESSAGE},{MESSAGE}]")));
    let sent = bot
        .send_media_group(42)
        .add(InputMedia::photo(InputFile::file_id("p0")).caption("first"))
        .add(InputMedia::photo(InputFile::upload("b.jpg", vec![1, 2, 3])))
        .send()
        .await
        .unwrap();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|m| m.bot().is_some()));

    let calls = t.calls();
    match &calls[0] {
        Call::Multipart { method, params, files } => {
            assert_eq!(method, "sendMediaGroup");
            let media: serde_json::Value = serde_json::from_str(params.get("media").unwrap()).unwrap();
            assert_eq!(media[0]["media"], "p0");
            assert_eq!(media[1]["media"], "attach://file1");
            assert_eq!(files.len(), 1);
            assert_eq!(files[0].field, "file1");
        }
        other => panic!("expected multipart, got {other:?}"),
    }
}

#[tokio::test]
async fn edit_media_sends_json_descriptor() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    bot.edit_message_media(42, 77)
        .media(InputMedia::document(InputFile::url("https://example.org/x.zip")))
        .send()
        .await
        .unwrap();
    let calls = t.calls();
    assert_eq!(calls[0].method(), "editMessageMedia");
    let media: serde_json::Value = serde_json::from_str(calls[0].params().get("media").unwrap()).unwrap();
    assert_eq!(media["type"], "document");
    assert_eq!(media["media"], "https://example.org/x.zip");
}

// ── Polls, actions, queries ───────────────────────────────────────────────────

#[tokio::test]
async fn poll_without_options_sends_empty_array() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    bot.send_poll(42, "?", Vec::new()).send().await.unwrap();
    assert_eq!(t.calls()[0].method(), "sendPoll");
    assert_eq!(t.calls()[0].params().get("options"), Some("[]"));
}

#[tokio::test]
async fn quiz_poll_sets_type() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    bot.send_poll(42, "2+2?", vec!["3".into(), "4".into()]).quiz(1).send().await.unwrap();
    let p = t.calls()[0].params().clone();
    assert_eq!(p.get("options"), Some(r#"["3","4"]"#));
    assert_eq!(p.get("type"), Some("quiz"));
    assert_eq!(p.get("correct_option_id"), Some("1"));
}

#[tokio::test]
async fn chat_action_decodes_bool() {
    let (bot, t) = bot_with(&ok("true"));
    let done = bot
        .send_chat_action(42)
        .action(layer_botapi::sendables::ChatAction::UploadPhoto)
        .send()
        .await
        .unwrap();
    assert!(done);
    assert_eq!(t.calls()[0].method(), "sendChatAction");
    assert_eq!(t.calls()[0].params().get("action"), Some("upload_photo"));
}

#[tokio::test]
async fn callback_answer_decodes_bool() {
    let (bot, t) = bot_with(&ok("true"));
    assert!(bot.answer_callback_query("cb1").text("done").send().await.unwrap());
    let p = t.calls()[0].params().clone();
    assert_eq!(p.get("callback_query_id"), Some("cb1"));
    assert_eq!(p.get("show_alert"), Some("false"));
}

#[tokio::test]
async fn location_floats_and_venue() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    bot.send_location(42, 51.5, -0.125).send().await.unwrap();
    bot.send_venue(42, 1.0, 2.0, "Hall", "Main st").send().await.unwrap();
    let calls = t.calls();
    assert_eq!(calls[0].params().get("latitude"), Some("51.5"));
    assert_eq!(calls[0].params().get("longitude"), Some("-0.125"));
    assert_eq!(calls[1].method(), "sendVenue");
    assert_eq!(calls[1].params().get("address"), Some("Main st"));
}

// ── Getters & envelope ────────────────────────────────────────────────────────

#[tokio::test]
async fn get_updates_returns_normalized_updates() {
    let body = ok(&format!(r#"[{{"update_id":10,"message":{MESSAGE}}}]"#));
    let (bot, t) = bot_with(&body);
    let updates = bot.get_updates().offset(10).timeout(25).send().await.unwrap();
    assert_eq!(updates.len(), 1);
    let msg = updates[0].effective_message().unwrap();
    assert_eq!(msg.chat.id, 42);
    assert!(msg.bot().is_some());

    let p = t.calls()[0].params().clone();
    assert_eq!(p.get("offset"), Some("10"));
    assert_eq!(p.get("timeout"), Some("25"));
    assert!(!p.contains("limit"));
}

#[tokio::test]
async fn get_me_binds_user() {
    let (bot, _) = bot_with(&ok(r#"{"id":5,"is_bot":true,"first_name":"Echo","username":"echo_bot"}"#));
    let me = bot.get_me().send().await.unwrap();
    assert_eq!(me.username.as_deref(), Some("echo_bot"));
    assert!(me.bot().is_some());
}

#[tokio::test]
async fn api_error_is_surfaced() {
    let (bot, _) = bot_with(r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#);
    let err = bot.send_message(0, "x").send().await.unwrap_err();
    assert!(err.is("Bad Request: *"));
}

#[tokio::test]
async fn returned_message_can_reply() {
    let (bot, t) = bot_with(&ok(MESSAGE));
    let msg = bot.send_message(42, "hi").send().await.unwrap();
    msg.reply_text("re").unwrap().send().await.unwrap();
    let _ = msg.chat.send_action("typing").unwrap().send().await;

    let calls = t.calls();
    assert_eq!(calls[1].params().get("reply_to_message_id"), Some("77"));
    assert_eq!(calls[2].method(), "sendChatAction");
}
