//! layer-bot — Showcase bot built with layer-botapi.
//!
//! # Setup
//! 1. `export BOT_TOKEN=123456:ABC…` (from @BotFather)
//! 2. Optionally `export BOT_API_URL=http://localhost:8081` for a local Bot API server.
//! 3. `cargo run -p layer-bot`

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use layer_botapi::sendables::ChatAction;
use layer_botapi::{
    Bot, Config, DEFAULT_API_URL, Dispatcher, Handler, HandlerError, InlineKeyboardButton,
    InlineKeyboardMarkup, InputFile, Update,
};

/// Long-poll timeout passed to `getUpdates`; below the HTTP timeout.
const POLL_TIMEOUT: i32 = 25;

#[tokio::main]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        unsafe { std::env::set_var("RUST_LOG", "layer_botapi=info,layer_bot=info"); }
    }
    env_logger::init();
    if let Err(e) = run().await {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let token = std::env::var("BOT_TOKEN").unwrap_or_default();
    if token.is_empty() {
        eprintln!("Set BOT_TOKEN to the token issued by @BotFather");
        std::process::exit(1);
    }
    let api_url = std::env::var("BOT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    let bot = Bot::new(Config {
        token,
        api_url,
        disable_web_preview: true,
        timeout: Duration::from_secs(POLL_TIMEOUT as u64 + 10),
    })?;

    let me = bot.get_me().send().await?;
    let username = me.username.clone().unwrap_or_default();
    println!("✅ Running as @{username} (id={})", me.id);
    println!("👂 Listening for updates… (Ctrl+C to quit)\n");

    let router = Arc::new(Router {
        bot: bot.clone(),
        handlers: vec![
            Box::new(Stamp) as Box<dyn Handler>,
            Box::new(Commands { username }),
            Box::new(Callbacks),
        ],
    });

    let mut offset = 0;
    loop {
        let updates = match bot.get_updates().offset(offset).timeout(POLL_TIMEOUT).send().await {
            Ok(u) => u,
            Err(e) => {
                let wait = e.retry_after().unwrap_or(3);
                tracing::warn!("[layer-bot] getUpdates failed ({e}), retrying in {wait}s");
                tokio::time::sleep(Duration::from_secs(wait as u64)).await;
                continue;
            }
        };
        for update in updates {
            offset = update.update_id + 1;
            let router = router.clone();
            // One task per update so a slow handler never stalls polling
            tokio::spawn(async move { router.route(update).await });
        }
    }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Runs every handler that accepts an update, in registration order.
struct Router {
    bot:      Bot,
    handlers: Vec<Box<dyn Handler>>,
}

impl Dispatcher for Router {
    fn bot(&self) -> &Bot { &self.bot }
}

impl Router {
    async fn route(&self, mut update: Update) {
        for h in &self.handlers {
            match h.check_update(&update) {
                Ok(true) => {
                    if let Err(e) = h.handle_update(&mut update, self).await {
                        tracing::warn!("[layer-bot] {} failed on update {}: {e}", h.name(), update.update_id);
                    }
                }
                Ok(false) => {}
                Err(e) => tracing::warn!("[layer-bot] {} rejected update {}: {e}", h.name(), update.update_id),
            }
        }
    }
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// Records when the update was picked up, for later handlers.
struct Stamp;

#[async_trait]
impl Handler for Stamp {
    fn name(&self) -> &str { "stamp" }

    fn check_update(&self, _: &Update) -> Result<bool, HandlerError> { Ok(true) }

    async fn handle_update(&self, update: &mut Update, _: &dyn Dispatcher) -> Result<(), HandlerError> {
        update.data.insert("received_at".into(), Utc::now().format("%H:%M:%S").to_string());
        Ok(())
    }
}

/// Slash commands in private chats and groups.
struct Commands {
    username: String,
}

#[async_trait]
impl Handler for Commands {
    fn name(&self) -> &str { "commands" }

    fn check_update(&self, update: &Update) -> Result<bool, HandlerError> {
        Ok(update.message.is_some()
            && update.effective_message()
                .and_then(|m| m.text.as_deref())
                .is_some_and(|t| t.starts_with('/')))
    }

    async fn handle_update(&self, update: &mut Update, d: &dyn Dispatcher) -> Result<(), HandlerError> {
        let Some(msg) = update.effective_message() else { return Ok(()) };
        let text = msg.text.as_deref().unwrap_or("").trim();
        let (cmd, arg) = split_command(text, &self.username);
        let chat_id = msg.chat.id;
        let bot = d.bot();

        match cmd.as_str() {
            "/start" => {
                let name = update.effective_user().map(|u| u.full_name()).unwrap_or_default();
                let keyboard = InlineKeyboardMarkup::new(vec![
                    vec![
                        InlineKeyboardButton::callback("🏓 Ping", "cb:ping"),
                        InlineKeyboardButton::callback("🕐 Time", "cb:time"),
                    ],
                    vec![InlineKeyboardButton::url("📖 Bot API docs", "https://core.telegram.org/bots/api")],
                ]);
                msg.reply_text(format!("👋 Hi <b>{}</b>! Try /help.", escape_html(&name)))?
                    .parse_mode("HTML")
                    .reply_markup(keyboard)
                    .send()
                    .await?;
            }
            "/help" => {
                msg.reply_text(HELP)?.parse_mode("HTML").send().await?;
            }
            "/ping" => {
                let start = Instant::now();
                let sent = msg.reply_text("🏓 …")?.send().await?;
                let ms = start.elapsed().as_millis();
                sent.edit_text(format!("🏓 <b>Pong!</b> <code>{ms} ms</code>"))?
                    .parse_mode("HTML")
                    .send()
                    .await?;
            }
            "/id" => {
                let user = update.effective_user().map(|u| u.id.to_string()).unwrap_or_else(|| "?".into());
                msg.reply_text(format!(
                    "🪪 <b>IDs</b>\n\n<b>User:</b> <code>{user}</code>\n<b>Chat:</b> <code>{chat_id}</code> ({})",
                    msg.chat.kind,
                ))?
                .parse_mode("HTML")
                .send()
                .await?;
            }
            "/echo" => {
                let reply = if arg.is_empty() { "💬 Usage: /echo <text>".to_string() } else { arg.to_string() };
                msg.reply_text(reply)?.send().await?;
            }
            "/time" => {
                let now = Utc::now();
                let received = update.data.get("received_at").cloned().unwrap_or_default();
                msg.reply_text(format!(
                    "🕐 <b>Time</b>\n\n<b>Date:</b> {}\n<b>Time:</b> <code>{}</code> UTC\n<b>Unix:</b> <code>{}</code>\n<b>Received:</b> <code>{received}</code>",
                    now.format("%A, %B %d %Y"),
                    now.format("%H:%M:%S"),
                    now.timestamp(),
                ))?
                .parse_mode("HTML")
                .send()
                .await?;
            }
            "/dice" => {
                let emoji = if arg.is_empty() { "🎲" } else { arg };
                bot.send_dice(chat_id).emoji(emoji).reply_to(msg.message_id).send().await?;
            }
            "/photo" => {
                msg.chat.send_action(ChatAction::UploadPhoto)?.send().await?;
                bot.send_photo(chat_id, "Sent by URL")
                    .photo(InputFile::url(LOGO_URL))
                    .reply_to(msg.message_id)
                    .send()
                    .await?;
            }
            "/location" => {
                bot.send_venue(chat_id, 51.5007, -0.1246, "Big Ben", "Westminster, London")
                    .reply_to(msg.message_id)
                    .send()
                    .await?;
            }
            "/poll" => {
                let options = ["Rust", "Go", "Both"].map(String::from).to_vec();
                bot.send_poll(chat_id, "Favourite language?", options)
                    .anonymous(false)
                    .send()
                    .await?;
            }
            "/count" => {
                let reply = if arg.is_empty() {
                    "📊 Usage: /count <text>".to_string()
                } else {
                    format!(
                        "📊 chars {} · bytes {} · words {} · lines {}",
                        arg.chars().count(), arg.len(),
                        arg.split_whitespace().count(), arg.lines().count(),
                    )
                };
                msg.reply_text(reply)?.send().await?;
            }
            _ => {
                msg.reply_text("❓ Unknown command. Use /help to see all commands.")?.send().await?;
            }
        }
        Ok(())
    }
}

/// Inline keyboard presses.
struct Callbacks;

#[async_trait]
impl Handler for Callbacks {
    fn name(&self) -> &str { "callbacks" }

    fn check_update(&self, update: &Update) -> Result<bool, HandlerError> {
        Ok(update.callback_query.is_some())
    }

    async fn handle_update(&self, update: &mut Update, d: &dyn Dispatcher) -> Result<(), HandlerError> {
        let Some(cb) = &update.callback_query else { return Ok(()) };
        let answer = d.bot().answer_callback_query(cb.id.clone());
        match cb.data.as_deref().unwrap_or("") {
            "cb:ping" => answer.text("🏓 Pong!").send().await?,
            "cb:time" => {
                let now = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
                answer.text(now).show_alert(true).send().await?
            }
            _ => answer.text("🤷 Unknown action").send().await?,
        };
        Ok(())
    }
}

// ─── Text ─────────────────────────────────────────────────────────────────────

const HELP: &str = "📖 <b>Commands</b>\n\n\
    /start: greeting with an inline keyboard\n\
    /ping: round-trip time\n\
    /id: your user and chat id\n\
    /echo &lt;text&gt;: repeat text\n\
    /time: current UTC time\n\
    /dice [emoji]: roll a dice\n\
    /photo: send a photo by URL\n\
    /location: send a venue\n\
    /poll: start a poll\n\
    /count &lt;text&gt;: text statistics";

const LOGO_URL: &str = "https://telegram.org/img/t_logo.png";

// ─── Utilities ────────────────────────────────────────────────────────────────

/// `/cmd@bot rest` → (`/cmd`, `rest`); the suffix is stripped only when it
/// names this bot.
fn split_command<'a>(text: &'a str, bot_username: &str) -> (String, &'a str) {
    let (raw, rest) = text.split_once(char::is_whitespace)
        .map(|(c, r)| (c, r.trim()))
        .unwrap_or((text, ""));
    let cmd = match raw.split_once('@') {
        Some((c, target)) if target.eq_ignore_ascii_case(bot_username) => c,
        _ => raw,
    };
    (cmd.to_ascii_lowercase(), rest)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
