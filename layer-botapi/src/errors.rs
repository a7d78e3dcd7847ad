//! Error types for layer-botapi.

use std::{fmt, io};

// ─── ApiError ─────────────────────────────────────────────────────────────────

/// An error returned by the Bot API in an `ok: false` response envelope.
///
/// # Example
/// `{"ok":false,"error_code":429,"description":"Too Many Requests: retry after 7","parameters":{"retry_after":7}}`
/// → `ApiError { code: 429, retry_after: Some(7), .. }`
#[derive(Clone, Debug, PartialEq)]
pub struct ApiError {
    /// HTTP-like status code (`error_code`).
    pub code: i32,
    /// Human-readable description, e.g. `"Bad Request: chat not found"`.
    pub description: String,
    /// Seconds to wait before repeating the request, if flood control kicked in.
    pub retry_after: Option<u32>,
    /// The group was migrated to a supergroup with this identifier.
    pub migrate_to_chat_id: Option<i64>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}: {}", self.code, self.description)?;
        if let Some(v) = self.retry_after {
            write!(f, " (retry after {v}s)")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Match on the description, with optional wildcard prefix/suffix `'*'`.
    ///
    /// # Examples
    /// - `err.is("Bad Request: chat not found")` — exact match
    /// - `err.is("Bad Request: *")` — starts-with match
    /// - `err.is("*not modified")` — ends-with match
    pub fn is(&self, pattern: &str) -> bool {
        if let Some(prefix) = pattern.strip_suffix('*') {
            self.description.starts_with(prefix)
        } else if let Some(suffix) = pattern.strip_prefix('*') {
            self.description.ends_with(suffix)
        } else {
            self.description == pattern
        }
    }
}

// ─── InvocationError ──────────────────────────────────────────────────────────

/// The error type returned from every `send()` and from update decoding.
#[derive(Debug)]
pub enum InvocationError {
    /// The Bot API rejected the request.
    Api(ApiError),
    /// Network / transport failure, propagated as-is.
    Transport(Box<dyn std::error::Error + Send + Sync>),
    /// Reply markup, media list or option list could not be JSON-encoded.
    /// Nothing was sent.
    Encode(serde_json::Error),
    /// A media request had no file id, URL or upload to deliver.
    /// Nothing was sent.
    NoMediaSource,
    /// The entity was not obtained through a [`crate::Bot`], so it cannot
    /// issue requests on its own.
    NoClient,
    /// The response (or an inbound update) did not match the expected shape.
    Deserialize(String),
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e)          => write!(f, "{e}"),
            Self::Transport(e)    => write!(f, "transport error: {e}"),
            Self::Encode(e)       => write!(f, "encode error: {e}"),
            Self::NoMediaSource   => write!(f, "the request had no file that could be sent"),
            Self::NoClient        => write!(f, "entity is not bound to a bot"),
            Self::Deserialize(s)  => write!(f, "deserialize error: {s}"),
        }
    }
}

impl std::error::Error for InvocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e)       => Some(e),
            Self::Transport(e) => Some(e.as_ref()),
            Self::Encode(e)    => Some(e),
            _                  => None,
        }
    }
}

impl From<serde_json::Error> for InvocationError {
    fn from(e: serde_json::Error) -> Self { Self::Encode(e) }
}

impl From<io::Error> for InvocationError {
    fn from(e: io::Error) -> Self { Self::Transport(Box::new(e)) }
}

impl From<reqwest::Error> for InvocationError {
    fn from(e: reqwest::Error) -> Self { Self::Transport(Box::new(e)) }
}

impl From<ApiError> for InvocationError {
    fn from(e: ApiError) -> Self { Self::Api(e) }
}

impl InvocationError {
    /// Returns `true` if this is an API error whose description matches
    /// `pattern` (supports `'*'` wildcards, see [`ApiError::is`]).
    pub fn is(&self, pattern: &str) -> bool {
        match self {
            Self::Api(e) => e.is(pattern),
            _            => false,
        }
    }

    /// If the API asked us to slow down, returns how many seconds to wait.
    pub fn retry_after(&self) -> Option<u32> {
        match self {
            Self::Api(e) => e.retry_after,
            _            => None,
        }
    }
}
