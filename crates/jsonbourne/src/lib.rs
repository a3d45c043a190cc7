//! jsonbourne — JSON objects with dot-key addressing, plus a pluggable
//! JSON codec layer.
//!
//! The centerpiece is [`JsonObj`], an insertion-ordered, string-keyed JSON
//! mapping whose nested objects are also `JsonObj`s, so a dot-key such as
//! `"a.b.c"` addresses a value several levels down. Around it sit
//! [`JsonValue`] (an owned JSON tree whose object variant is `JsonObj`),
//! the [`dot`] module (dot-key parsing and traversal), and a re-export of
//! the `jsonbourne-jsonlib` codec layer as [`jsonlib`].
//!
//! # Examples
//!
//! ```
//! use jsonbourne::JsonObj;
//!
//! let mut d = JsonObj::from_json(r#"{"uno": 1, "sub": {"a": {"b": 2}}}"#).unwrap();
//! assert_eq!(d["uno"].as_i64(), Some(1));
//! assert_eq!(d["sub.a.b"].as_i64(), Some(2));
//! assert!(d.contains("sub.a"));
//!
//! d.set("dos", 2).unwrap();
//! assert!(d.set("items", 2).is_err());
//! d.insert("items", 2);
//!
//! let paths: Vec<String> = d.dot_keys_list(false);
//! assert_eq!(paths, vec!["uno", "sub.a.b", "dos", "items"]);
//! ```

pub mod dot;
mod error;
mod obj;
mod value;

pub use jsonbourne_jsonlib as jsonlib;
pub use jsonbourne_jsonlib::DumpOpts;

pub use crate::error::{JsonObjError, Result};
pub use crate::obj::{is_identifier, DotItems, DotKeys, JsonObj, Key, RESERVED_KEYS};
pub use crate::value::{jsonify, jsonify_opts, unjsonify, JsonValue, JsonifyOpts};

use serde::Serialize;

/// Parse a JSON document into a [`JsonValue`].
///
/// # Examples
///
/// ```
/// let v = jsonbourne::parse(r#"{"a": [1, 2]}"#).unwrap();
/// assert_eq!(v["a"].as_array().map(Vec::len), Some(2));
/// assert_eq!(v["a"][1].as_i64(), Some(2));
/// ```
pub fn parse(s: &str) -> Result<JsonValue> {
    Ok(JsonValue::from(jsonlib::loads(s)?))
}

/// Serialize any `Serialize` value to a JSON string with the default codec.
///
/// # Examples
///
/// ```
/// use jsonbourne::jsonlib::DumpOpts;
///
/// let s = jsonbourne::stringify(&serde_json::json!({"b": 1, "a": 2}), &DumpOpts::new().sort_keys(true)).unwrap();
/// assert_eq!(s, r#"{"a":2,"b":1}"#);
/// ```
pub fn stringify<T: Serialize + ?Sized>(value: &T, opts: &DumpOpts) -> Result<String> {
    Ok(jsonlib::dumps_opts(value, opts)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_stringify_round_trip() {
        let v = parse(r#"{"a": 1, "b": [true, null, "s"]}"#).expect("parse");
        let s = stringify(&v, &DumpOpts::new()).expect("stringify");
        assert_eq!(parse(&s).expect("reparse"), v);
    }

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(parse("{not json}").is_err());
    }
}
