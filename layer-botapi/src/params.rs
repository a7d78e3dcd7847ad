//! Form-parameter encoding for outbound requests.
//!
//! Every value travels as a string: integers in decimal, booleans as the
//! literals `true`/`false`, floats in their shortest round-trip form, and
//! structured fields (reply markup, media lists, poll options) as JSON.

use serde::Serialize;

// ─── ToParam ──────────────────────────────────────────────────────────────────

/// Conversion of a typed field into its wire string.
pub trait ToParam {
    fn to_param(&self) -> String;
}

macro_rules! display_param {
    ($($t:ty),*) => {$(
        impl ToParam for $t {
            fn to_param(&self) -> String { self.to_string() }
        }
    )*};
}

// `f64`'s `Display` is already the shortest representation that parses back
// to the same value (`1.5`, `-0.25`, `3`), so floats share the same impl.
display_param!(i32, i64, u32, u64, bool, f64);

impl ToParam for str {
    fn to_param(&self) -> String { self.to_owned() }
}

impl ToParam for String {
    fn to_param(&self) -> String { self.clone() }
}

impl<T: ToParam + ?Sized> ToParam for &T {
    fn to_param(&self) -> String { (**self).to_param() }
}

// ─── Params ───────────────────────────────────────────────────────────────────

/// Ordered, string-keyed form parameters of one request.
///
/// Keys may repeat; the transport sends them in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self { Self::default() }

    /// Append `key=value`.
    pub fn add(&mut self, key: impl Into<String>, value: impl ToParam) -> &mut Self {
        self.pairs.push((key.into(), value.to_param()));
        self
    }

    /// Append `key=<json>` for a structured value.
    pub fn add_json<T: Serialize + ?Sized>(
        &mut self,
        key:   impl Into<String>,
        value: &T,
    ) -> Result<&mut Self, serde_json::Error> {
        let json = serde_json::to_string(value)?;
        self.pairs.push((key.into(), json));
        Ok(self)
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool { self.get(key).is_some() }

    pub fn len(&self) -> usize { self.pairs.len() }

    pub fn is_empty(&self) -> bool { self.pairs.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The raw pairs, e.g. for `reqwest::RequestBuilder::query`.
    pub fn as_pairs(&self) -> &[(String, String)] { &self.pairs }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_use_wire_form() {
        let mut p = Params::new();
        p.add("chat_id", -1001234567890_i64)
            .add("message_id", 0)
            .add("silent", false)
            .add("latitude", 51.5_f64)
            .add("longitude", -0.125_f64)
            .add("whole", 3.0_f64)
            .add("parse_mode", "");
        assert_eq!(p.get("chat_id"), Some("-1001234567890"));
        assert_eq!(p.get("message_id"), Some("0"));
        assert_eq!(p.get("silent"), Some("false"));
        assert_eq!(p.get("latitude"), Some("51.5"));
        assert_eq!(p.get("longitude"), Some("-0.125"));
        assert_eq!(p.get("whole"), Some("3"));
        assert_eq!(p.get("parse_mode"), Some(""));
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut p = Params::new();
        p.add("b", 1).add("a", 2).add("c", 3);
        let keys: Vec<&str> = p.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn empty_list_is_json_array() {
        let mut p = Params::new();
        let options: Vec<String> = Vec::new();
        p.add_json("options", &options).unwrap();
        assert_eq!(p.get("options"), Some("[]"));
    }
}
