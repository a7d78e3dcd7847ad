//! How the bytes (or a reference to them) of a media file reach the server.
//!
//! A file can be supplied in exactly one of three ways:
//!
//! | Variant | Wire form | Request |
//! |---------|-----------|---------|
//! | [`InputFile::FileId`] | form field holding the id | plain |
//! | [`InputFile::Url`]    | form field holding the URL | plain |
//! | [`InputFile::Upload`] | multipart file part | multipart |
//!
//! ```rust,no_run
//! # async fn f(bot: layer_botapi::Bot) -> Result<(), Box<dyn std::error::Error>> {
//! use layer_botapi::InputFile;
//!
//! let photo = InputFile::from_path("cat.jpg").await?;
//! bot.send_photo(42, "a cat").photo(photo).send().await?;
//! # Ok(()) }
//! ```

use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::InvocationError;
use crate::params::Params;
use crate::transport::{FilePart, Request};

/// File name sent for uploads that were given none.
pub const DEFAULT_FILE_NAME: &str = "file";

/// Source of a media file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputFile {
    /// A `file_id` of a file already stored on the Telegram servers.
    FileId(String),
    /// An HTTP URL the server downloads the file from.
    Url(String),
    /// Raw bytes uploaded with the request.
    Upload { name: String, data: Arc<[u8]> },
}

impl InputFile {
    pub fn file_id(id: impl Into<String>) -> Self { Self::FileId(id.into()) }

    pub fn url(url: impl Into<String>) -> Self { Self::Url(url.into()) }

    /// Upload `data` under `name` (`"file"` when `name` is empty).
    pub fn upload(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let mut name = name.into();
        if name.is_empty() {
            name = DEFAULT_FILE_NAME.to_string();
        }
        let data: Vec<u8> = data.into();
        Self::Upload { name, data: Arc::from(data) }
    }

    /// Read `reader` to the end and upload its contents.
    ///
    /// The bytes are buffered so the same `InputFile` can be sent repeatedly.
    pub async fn from_reader<R: AsyncRead + Unpin>(
        name:   impl Into<String>,
        reader: &mut R,
    ) -> std::io::Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        Ok(Self::upload(name, data))
    }

    /// Read a local file and upload it under its own file name.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();
        Ok(Self::upload(name, data))
    }

    /// Build the request that delivers this file to `method` under `field`.
    ///
    /// File ids and URLs become the form value of `field` on a plain request;
    /// uploads turn the request into a multipart one with a single file part.
    /// An empty id or URL counts as no file at all.
    pub(crate) fn deliver(&self, method: &str, mut params: Params, field: &str) -> Result<Request, InvocationError> {
        match self {
            Self::FileId(v) | Self::Url(v) => {
                if v.is_empty() {
                    return Err(InvocationError::NoMediaSource);
                }
                params.add(field, v);
                Ok(Request::new(method, params))
            }
            Self::Upload { name, data } => {
                let mut req = Request::new(method, params);
                req.files.push(FilePart {
                    field:     field.to_string(),
                    file_name: name.clone(),
                    data:      data.clone(),
                });
                Ok(req)
            }
        }
    }

    /// Reference to this file inside a JSON media descriptor.
    ///
    /// Uploads are referenced as `attach://<attach_name>` and returned as a
    /// file part named `attach_name`, which must travel in the same request.
    pub(crate) fn attach(&self, attach_name: &str) -> Result<(String, Option<FilePart>), InvocationError> {
        match self {
            Self::FileId(v) | Self::Url(v) if v.is_empty() => Err(InvocationError::NoMediaSource),
            Self::FileId(v) | Self::Url(v) => Ok((v.clone(), None)),
            Self::Upload { name, data } => Ok((
                format!("attach://{attach_name}"),
                Some(FilePart {
                    field:     attach_name.to_string(),
                    file_name: name.clone(),
                    data:      data.clone(),
                }),
            )),
        }
    }
}

/// Deliver an optional file; a missing or empty file fails before anything
/// is sent.
pub(crate) fn deliver(
    file:   Option<&InputFile>,
    method: &str,
    params: Params,
    field:  &str,
) -> Result<Request, InvocationError> {
    match file {
        Some(f) => f.deliver(method, params, field),
        None    => Err(InvocationError::NoMediaSource),
    }
}
