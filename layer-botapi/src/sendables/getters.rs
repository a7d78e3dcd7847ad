//! Read-only calls: `getMe` and long-polling `getUpdates`.

use crate::params::Params;
use crate::transport::Request;
use crate::types::User;
use crate::update::Update;
use crate::{Bot, InvocationError};

use super::{Sendable, impl_send};

/// `getMe` — the bot's own account.
#[derive(Clone)]
pub struct GetMe {
    bot: Bot,
}

impl Sendable for GetMe {
    type Return = User;

    fn build(&self) -> Result<Request, InvocationError> {
        Ok(Request::new("getMe", Params::new()))
    }
}

/// `getUpdates`. Every returned [`Update`] is already normalized.
///
/// Zero values are left out so the server applies its own defaults.
#[derive(Clone)]
pub struct GetUpdates {
    bot: Bot,
    /// First update to return; pass `last update_id + 1` to acknowledge.
    pub offset:          i64,
    /// 1–100.
    pub limit:           i32,
    /// Long-poll timeout in seconds. Keep it below [`crate::Config::timeout`].
    pub timeout:         i32,
    pub allowed_updates: Vec<String>,
}

impl GetUpdates {
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset; self
    }

    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = limit; self
    }

    pub fn timeout(mut self, seconds: i32) -> Self {
        self.timeout = seconds; self
    }

    pub fn allowed_updates(mut self, kinds: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.allowed_updates = kinds.into_iter().map(Into::into).collect(); self
    }
}

impl Sendable for GetUpdates {
    type Return = Vec<Update>;

    fn build(&self) -> Result<Request, InvocationError> {
        let mut p = Params::new();
        if self.offset != 0 { p.add("offset", self.offset); }
        if self.limit != 0 { p.add("limit", self.limit); }
        if self.timeout != 0 { p.add("timeout", self.timeout); }
        if !self.allowed_updates.is_empty() {
            p.add_json("allowed_updates", &self.allowed_updates)?;
        }
        Ok(Request::new("getUpdates", p))
    }
}

impl_send!(GetMe, GetUpdates);

impl Bot {
    pub fn get_me(&self) -> GetMe {
        GetMe { bot: self.clone() }
    }

    pub fn get_updates(&self) -> GetUpdates {
        GetUpdates {
            bot:             self.clone(),
            offset:          0,
            limit:           0,
            timeout:         0,
            allowed_updates: Vec::new(),
        }
    }
}
