//! The transport seam between request builders and the network.
//!
//! A [`Transport`] exposes exactly two primitives — a plain form request and
//! a multipart upload — and returns the raw response body. Connection pooling,
//! TLS, timeouts and any retry behaviour live behind this trait.
//!
//! [`HttpTransport`] is the default implementation on top of `reqwest`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::InvocationError;
use crate::params::Params;

// ─── FilePart ─────────────────────────────────────────────────────────────────

/// One file carried by a multipart request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    /// Multipart field name (`photo`, `document`, or an attachment name like `file0`).
    pub field:     String,
    /// File name reported to the server.
    pub file_name: String,
    pub data:      Arc<[u8]>,
}

// ─── Request ──────────────────────────────────────────────────────────────────

/// A fully encoded outbound request, ready for a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    /// Bot API method name, e.g. `sendPhoto`.
    pub method: String,
    pub params: Params,
    /// Files to upload. Empty means a plain form request.
    pub files:  Vec<FilePart>,
}

impl Request {
    pub fn new(method: impl Into<String>, params: Params) -> Self {
        Self { method: method.into(), params, files: Vec::new() }
    }

    /// Whether this request must go through [`Transport::post_multipart`].
    pub fn is_multipart(&self) -> bool { !self.files.is_empty() }
}

// ─── Transport ────────────────────────────────────────────────────────────────

/// The two network primitives every request is reduced to.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a form-encoded request to `method`; returns the raw response body.
    async fn get(&self, method: &str, params: &Params) -> Result<Vec<u8>, InvocationError>;

    /// Issue a multipart request to `method` carrying `params` as text fields
    /// and `files` as file parts; returns the raw response body.
    async fn post_multipart(
        &self,
        method: &str,
        params: &Params,
        files:  &[FilePart],
    ) -> Result<Vec<u8>, InvocationError>;
}

// ─── HttpTransport ────────────────────────────────────────────────────────────

/// HTTPS transport talking to `{api_url}/bot{token}/{method}`.
pub struct HttpTransport {
    http:    reqwest::Client,
    api_url: String,
    token:   String,
}

impl HttpTransport {
    pub fn new(
        api_url: impl Into<String>,
        token:   impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, InvocationError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token:   token.into(),
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, method: &str, params: &Params) -> Result<Vec<u8>, InvocationError> {
        // The body is returned whatever the HTTP status: error envelopes come
        // with 4xx codes and are decoded by the caller.
        let resp = self.http
            .get(self.endpoint(method))
            .query(params.as_pairs())
            .send()
            .await?;
        Ok(resp.bytes().await?.to_vec())
    }

    async fn post_multipart(
        &self,
        method: &str,
        params: &Params,
        files:  &[FilePart],
    ) -> Result<Vec<u8>, InvocationError> {
        let mut form = Form::new();
        for (k, v) in params.iter() {
            form = form.text(k.to_string(), v.to_string());
        }
        for f in files {
            let mime = mime_guess::from_path(&f.file_name).first_or_octet_stream();
            let part = Part::bytes(f.data.to_vec())
                .file_name(f.file_name.clone())
                .mime_str(mime.as_ref())?;
            form = form.part(f.field.clone(), part);
        }
        let resp = self.http
            .post(self.endpoint(method))
            .multipart(form)
            .send()
            .await?;
        Ok(resp.bytes().await?.to_vec())
    }
}
