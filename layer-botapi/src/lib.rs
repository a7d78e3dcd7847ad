//! # layer-botapi
//!
//! Async Telegram Bot API layer: typed request builders and normalized updates.
//!
//! ## Features
//! - One builder per action: messages, edits, photos, audio, documents,
//!   video, voice, video notes, animations, media groups, locations,
//!   venues, contacts, polls, dice, chat actions, callback answers
//! - File id, URL or in-memory upload for every media builder; uploads
//!   inside media groups travel as `attach://` parts
//! - Inline and reply keyboards
//! - `getMe` and long-polling `getUpdates`
//! - Update normalization: effective message, chat and user, with the bot
//!   bound in so entities can reply on their own
//! - Pluggable [`Transport`]; [`HttpTransport`] (reqwest + rustls) by default
//!
//! ## Quick start
//! ```rust,no_run
//! use layer_botapi::{Bot, Config};
//!
//! # async fn run() -> Result<(), layer_botapi::InvocationError> {
//! let bot = Bot::new(Config { token: "123:ABC".into(), ..Default::default() })?;
//! let me = bot.get_me().send().await?;
//! println!("running as @{}", me.username.unwrap_or_default());
//!
//! let mut offset = 0;
//! loop {
//!     for update in bot.get_updates().offset(offset).timeout(25).send().await? {
//!         offset = update.update_id + 1;
//!         if let Some(msg) = update.effective_message() {
//!             msg.reply_text("pong")?.send().await?;
//!         }
//!     }
//! }
//! # }
//! ```

#![deny(unsafe_code)]

mod errors;
mod params;
mod transport;
mod input_file;
mod input_media;
pub mod handler;
pub mod reply_markup;
pub mod sendables;
pub mod types;
pub mod update;

pub use errors::{ApiError, InvocationError};
pub use handler::{Dispatcher, Handler, HandlerError};
pub use input_file::InputFile;
pub use input_media::{InputMedia, MediaKind};
pub use params::{Params, ToParam};
pub use reply_markup::{
    ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, ReplyKeyboardMarkup,
    ReplyKeyboardRemove, ReplyMarkup,
};
pub use sendables::Sendable;
pub use transport::{FilePart, HttpTransport, Request, Transport};
pub use types::{CallbackQuery, Chat, Message, User};
pub use update::{Update, UpdateKind};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use types::Bind;

/// Production Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

// ─── Config ───────────────────────────────────────────────────────────────────

/// Configuration for [`Bot::new`].
#[derive(Clone)]
pub struct Config {
    /// Token issued by @BotFather, `123456:ABC-DEF…`.
    pub token:               String,
    /// Base URL of the Bot API server (default: [`DEFAULT_API_URL`]).
    /// Point it at a self-hosted `telegram-bot-api` to lift upload limits.
    pub api_url:             String,
    /// Default for `disable_web_page_preview` on text sends and edits.
    pub disable_web_preview: bool,
    /// Whole-request timeout for [`HttpTransport`]. Must exceed any
    /// long-poll timeout passed to `getUpdates`.
    pub timeout:             Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token:               String::new(),
            api_url:             DEFAULT_API_URL.to_string(),
            disable_web_preview: false,
            timeout:             Duration::from_secs(30),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("disable_web_preview", &self.disable_web_preview)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ─── Response envelope ────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse<T> {
    ok:          bool,
    result:      Option<T>,
    #[serde(default)]
    error_code:  i32,
    #[serde(default)]
    description: String,
    parameters:  Option<ResponseParameters>,
}

#[derive(Deserialize)]
struct ResponseParameters {
    retry_after:        Option<u32>,
    migrate_to_chat_id: Option<i64>,
}

/// Decode a response body into `T`, or the API error it carries.
fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<T, InvocationError> {
    let resp: ApiResponse<T> = serde_json::from_slice(body)
        .map_err(|e| InvocationError::Deserialize(e.to_string()))?;

    if !resp.ok {
        let params = resp.parameters;
        return Err(InvocationError::Api(ApiError {
            code:               resp.error_code,
            description:        resp.description,
            retry_after:        params.as_ref().and_then(|p| p.retry_after),
            migrate_to_chat_id: params.as_ref().and_then(|p| p.migrate_to_chat_id),
        }));
    }

    resp.result
        .ok_or_else(|| InvocationError::Deserialize("ok response without result".into()))
}

// ─── Bot ──────────────────────────────────────────────────────────────────────

struct BotInner {
    config:    Config,
    transport: Arc<dyn Transport>,
}

/// The client context every request is issued through.
///
/// Cheap to clone; all clones share the configuration and transport.
#[derive(Clone)]
pub struct Bot {
    inner: Arc<BotInner>,
}

impl Bot {
    /// Build a bot talking HTTPS to `config.api_url`.
    pub fn new(config: Config) -> Result<Self, InvocationError> {
        let transport = HttpTransport::new(config.api_url.clone(), config.token.clone(), config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Build a bot on top of any [`Transport`].
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Self {
        Self { inner: Arc::new(BotInner { config, transport: Arc::new(transport) }) }
    }

    pub fn config(&self) -> &Config { &self.inner.config }

    /// Build `req`, send it and decode its result.
    ///
    /// The returned value has this bot bound into it.
    pub async fn invoke<S: Sendable>(&self, req: &S) -> Result<S::Return, InvocationError> {
        let request = req.build()?;
        let body = self.dispatch(&request).await?;
        let mut result: S::Return = decode_response(&body)?;
        result.bind(self);
        Ok(result)
    }

    async fn dispatch(&self, request: &Request) -> Result<Vec<u8>, InvocationError> {
        let transport = &self.inner.transport;
        if request.is_multipart() {
            tracing::debug!(
                "[layer-botapi] {} → multipart ({} params, {} files)",
                request.method, request.params.len(), request.files.len()
            );
            transport.post_multipart(&request.method, &request.params, &request.files).await
        } else {
            tracing::debug!("[layer-botapi] {} → form ({} params)", request.method, request.params.len());
            transport.get(&request.method, &request.params).await
        }
    }
}

impl fmt::Debug for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bot").field("config", &self.inner.config).finish_non_exhaustive()
    }
}
