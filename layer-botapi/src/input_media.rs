//! Media descriptors: an [`InputFile`] plus per-kind metadata.
//!
//! An [`InputMedia`] renders two ways that must stay in sync:
//!
//! * as top-level form fields when one item is sent on its own
//!   (`sendPhoto`, `sendVideo`, …), see [`crate::sendables::SendMedia`];
//! * as a JSON object inside `sendMediaGroup` / `editMessageMedia`, where
//!   uploads are referenced as `attach://<name>` and carried as extra file
//!   parts of the same multipart request.

use serde_json::{Map, Value, json};

use crate::InvocationError;
use crate::input_file::InputFile;
use crate::params::Params;
use crate::transport::{FilePart, Request};

// ─── MediaKind ────────────────────────────────────────────────────────────────

/// What kind of media an [`InputMedia`] describes, with the metadata that
/// only that kind carries. Zero / empty values are still sent.
#[derive(Clone, Debug, PartialEq)]
pub enum MediaKind {
    Photo,
    Video {
        width:              i32,
        height:             i32,
        duration:           i32,
        supports_streaming: bool,
    },
    Audio {
        duration:  i32,
        performer: String,
        title:     String,
    },
    Document,
    Animation {
        width:    i32,
        height:   i32,
        duration: i32,
    },
}

impl MediaKind {
    /// The `type` discriminant used in JSON descriptors; also the form field
    /// name when the item is sent on its own.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Photo             => "photo",
            Self::Video { .. }      => "video",
            Self::Audio { .. }      => "audio",
            Self::Document          => "document",
            Self::Animation { .. }  => "animation",
        }
    }

    /// Bot API method that sends one item of this kind.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Photo             => "sendPhoto",
            Self::Video { .. }      => "sendVideo",
            Self::Audio { .. }      => "sendAudio",
            Self::Document          => "sendDocument",
            Self::Animation { .. }  => "sendAnimation",
        }
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        match self {
            Self::Photo | Self::Document => vec![],
            Self::Video { width, height, duration, supports_streaming } => vec![
                ("width",              json!(width)),
                ("height",             json!(height)),
                ("duration",           json!(duration)),
                ("supports_streaming", json!(supports_streaming)),
            ],
            Self::Audio { duration, performer, title } => vec![
                ("duration",  json!(duration)),
                ("performer", json!(performer)),
                ("title",     json!(title)),
            ],
            Self::Animation { width, height, duration } => vec![
                ("width",    json!(width)),
                ("height",   json!(height)),
                ("duration", json!(duration)),
            ],
        }
    }
}

// ─── InputMedia ───────────────────────────────────────────────────────────────

/// One media item for an album, a media edit, or a standalone send.
///
/// ```rust
/// use layer_botapi::{InputFile, InputMedia};
///
/// let item = InputMedia::photo(InputFile::file_id("AgAD"))
///     .caption("<b>sunset</b>")
///     .parse_mode("HTML");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct InputMedia {
    pub media:      InputFile,
    pub caption:    String,
    pub parse_mode: String,
    pub kind:       MediaKind,
}

impl InputMedia {
    fn with_kind(media: InputFile, kind: MediaKind) -> Self {
        Self { media, caption: String::new(), parse_mode: String::new(), kind }
    }

    pub fn photo(media: InputFile) -> Self { Self::with_kind(media, MediaKind::Photo) }

    pub fn document(media: InputFile) -> Self { Self::with_kind(media, MediaKind::Document) }

    pub fn video(media: InputFile) -> Self {
        Self::with_kind(media, MediaKind::Video {
            width: 0, height: 0, duration: 0, supports_streaming: false,
        })
    }

    pub fn audio(media: InputFile) -> Self {
        Self::with_kind(media, MediaKind::Audio {
            duration: 0, performer: String::new(), title: String::new(),
        })
    }

    pub fn animation(media: InputFile) -> Self {
        Self::with_kind(media, MediaKind::Animation { width: 0, height: 0, duration: 0 })
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into(); self
    }

    pub fn parse_mode(mut self, mode: impl Into<String>) -> Self {
        self.parse_mode = mode.into(); self
    }

    /// Append caption, parse mode and the kind's metadata as form fields.
    pub(crate) fn write_form(&self, params: &mut Params) {
        params.add("caption", &self.caption);
        params.add("parse_mode", &self.parse_mode);
        for (key, value) in self.kind.fields() {
            match value {
                Value::String(s) => params.add(key, s),
                other            => params.add(key, other.to_string()),
            };
        }
    }

    /// Send this item on its own: metadata as form fields, then the file
    /// delivered under the kind's field name to the kind's method.
    pub(crate) fn deliver(&self, mut params: Params) -> Result<Request, InvocationError> {
        self.write_form(&mut params);
        self.media.deliver(self.kind.method(), params, self.kind.type_name())
    }

    /// JSON descriptor for grouped sends and media edits.
    ///
    /// `attach_name` names the file part when the source is an upload.
    pub(crate) fn to_json(&self, attach_name: &str) -> Result<(Value, Option<FilePart>), InvocationError> {
        let (media, part) = self.media.attach(attach_name)?;
        let mut obj = Map::new();
        obj.insert("type".into(), json!(self.kind.type_name()));
        obj.insert("media".into(), json!(media));
        obj.insert("caption".into(), json!(self.caption));
        obj.insert("parse_mode".into(), json!(self.parse_mode));
        for (key, value) in self.kind.fields() {
            obj.insert(key.into(), value);
        }
        Ok((Value::Object(obj), part))
    }
}

/// Attachment name of the item at `index` in a grouped request.
pub(crate) fn attach_name(index: usize) -> String {
    format!("file{index}")
}

/// Encode an album as a JSON array plus the file parts its uploads need.
///
/// An empty album still encodes as `[]`; an item with an empty id or URL
/// fails the whole album.
pub(crate) fn encode_group(items: &[InputMedia]) -> Result<(String, Vec<FilePart>), InvocationError> {
    let mut descriptors = Vec::with_capacity(items.len());
    let mut files = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let (json, part) = item.to_json(&attach_name(i))?;
        descriptors.push(json);
        files.extend(part);
    }
    Ok((serde_json::to_string(&descriptors)?, files))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_of_two_file_id_photos() {
        let items = vec![
            InputMedia::photo(InputFile::file_id("A")).caption("one").parse_mode("HTML"),
            InputMedia::photo(InputFile::file_id("B")).caption("two").parse_mode("Markdown"),
        ];
        let (json, files) = encode_group(&items).unwrap();
        assert!(files.is_empty());

        let v: Value = serde_json::from_str(&json).unwrap();
        let arr = v.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["type"], "photo");
        assert_eq!(arr[0]["media"], "A");
        assert_eq!(arr[0]["caption"], "one");
        assert_eq!(arr[0]["parse_mode"], "HTML");
        assert_eq!(arr[1]["type"], "photo");
        assert_eq!(arr[1]["caption"], "two");
        assert_eq!(arr[1]["parse_mode"], "Markdown");
    }

    #[test]
    fn empty_group_is_empty_array() {
        let (json, files) = encode_group(&[]).unwrap();
        assert_eq!(json, "[]");
        assert!(files.is_empty());
    }

    #[test]
    fn uploads_in_group_use_attachments() {
        let items = vec![
            InputMedia::photo(InputFile::url("https://example.com/1.jpg")),
            InputMedia::video(InputFile::upload("clip.mp4", vec![0, 1])),
        ];
        let (json, files) = encode_group(&items).unwrap();
        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v[0]["media"], "https://example.com/1.jpg");
        assert_eq!(v[1]["media"], "attach://file1");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].field, "file1");
        assert_eq!(files[0].file_name, "clip.mp4");
    }

    #[test]
    fn empty_reference_fails_the_album() {
        let items = vec![
            InputMedia::photo(InputFile::file_id("A")),
            InputMedia::photo(InputFile::url("")),
        ];
        assert!(matches!(encode_group(&items), Err(InvocationError::NoMediaSource)));
        assert!(matches!(
            InputMedia::document(InputFile::file_id("")).deliver(Params::new()),
            Err(InvocationError::NoMediaSource)
        ));
    }

    #[test]
    fn unset_metadata_is_zero_not_omitted() {
        let (v, _) = InputMedia::video(InputFile::file_id("V")).to_json("file0").unwrap();
        assert_eq!(v["type"], "video");
        assert_eq!(v["width"], 0);
        assert_eq!(v["height"], 0);
        assert_eq!(v["duration"], 0);
        assert_eq!(v["supports_streaming"], false);
        assert_eq!(v["caption"], "");
    }

    #[test]
    fn kind_selects_metadata() {
        let (v, _) = InputMedia::document(InputFile::file_id("D")).to_json("file0").unwrap();
        assert!(v.get("width").is_none());
        assert!(v.get("performer").is_none());

        let mut audio = InputMedia::audio(InputFile::file_id("S"));
        if let MediaKind::Audio { performer, title, duration } = &mut audio.kind {
            *performer = "Band".into();
            *title = "Song".into();
            *duration = 215;
        }
        let (v, _) = audio.to_json("file0").unwrap();
        assert_eq!(v["performer"], "Band");
        assert_eq!(v["title"], "Song");
        assert_eq!(v["duration"], 215);
        assert!(v.get("width").is_none());
    }

    #[test]
    fn inline_rendering_matches_json_rendering() {
        let item = InputMedia::animation(InputFile::file_id("G")).caption("gif");
        let req = item.deliver(Params::new()).unwrap();
        assert_eq!(req.method, "sendAnimation");
        assert_eq!(req.params.get("animation"), Some("G"));
        assert_eq!(req.params.get("caption"), Some("gif"));
        assert_eq!(req.params.get("width"), Some("0"));
        assert_eq!(req.params.get("duration"), Some("0"));

        let (json, _) = item.to_json("file0").unwrap();
        assert_eq!(json["caption"], "gif");
        assert_eq!(json["width"], 0);
    }
}
