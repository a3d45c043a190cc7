//! jsonbourne-jsonlib — the JSON encode/decode layer for jsonbourne.
//!
//! One `dumps`/`dumpb`/`loads` surface over interchangeable backends, plus
//! dump options (pretty, sorted keys, trailing newline), a [`Dumpable`]
//! conversion hook, comment stripping for JSON-with-comments input, and
//! line-delimited (ndjson) parsing.
//!
//! # Example
//!
//! ```
//! use jsonbourne_jsonlib::{dumps, dumps_opts, loads, DumpOpts};
//! use serde_json::json;
//!
//! let v = json!({"a": 1});
//! assert_eq!(dumps(&v).unwrap(), "{\"a\":1}");
//! assert_eq!(loads("{\"a\":1}").unwrap(), v);
//!
//! let pretty = dumps_opts(&v, &DumpOpts::new().pretty(true)).unwrap();
//! assert_eq!(pretty, "{\n  \"a\": 1\n}");
//! ```

mod codec;
mod dumpable;
mod error;
mod jsonc;
mod opts;
#[cfg(feature = "writer")]
mod writer;

pub use codec::{default_json, sort_keys, Json, JsonBackend, JsonCodec};
pub use dumpable::Dumpable;
pub use error::{JsonLibError, Result};
pub use jsonc::strip_comments;
pub use opts::DumpOpts;

use serde::Serialize;
use serde_json::Value;

/// Serialize `value` to a compact JSON string using the default backend.
pub fn dumps<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    default_json().dumps(value, &DumpOpts::new())
}

/// Serialize `value` to a JSON string with explicit options.
pub fn dumps_opts<T: Serialize + ?Sized>(value: &T, opts: &DumpOpts) -> Result<String> {
    default_json().dumps(value, opts)
}

/// Serialize `value` to compact JSON bytes.
pub fn dumpb<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    default_json().dumpb(value, &DumpOpts::new())
}

/// Serialize `value` to JSON bytes with explicit options.
pub fn dumpb_opts<T: Serialize + ?Sized>(value: &T, opts: &DumpOpts) -> Result<Vec<u8>> {
    default_json().dumpb(value, opts)
}

/// Serialize through the [`Dumpable`] hook instead of `Serialize`.
pub fn dumps_dumpable(value: &dyn Dumpable, opts: &DumpOpts) -> Result<String> {
    default_json().dumps(&value.dumpable(), opts)
}

/// Serialize through the [`Dumpable`] hook to bytes.
pub fn dumpb_dumpable(value: &dyn Dumpable, opts: &DumpOpts) -> Result<Vec<u8>> {
    default_json().dumpb(&value.dumpable(), opts)
}

/// Parse a JSON string using the default backend.
pub fn loads(s: &str) -> Result<Value> {
    default_json().loads(s)
}

/// Parse JSON-with-comments: strip `//` and `/* */` comments, then parse.
pub fn loads_jsonc(s: &str) -> Result<Value> {
    let clean = strip_comments(s)?;
    default_json().loads(&clean)
}

/// Parse line-delimited JSON (ndjson/jsonl): each non-blank line is parsed
/// independently.
///
/// # Errors
///
/// A line that fails to parse reports its 1-based line number.
///
/// # Examples
///
/// ```
/// use jsonbourne_jsonlib::loads_ndjson;
/// use serde_json::json;
///
/// let docs = loads_ndjson("{\"a\": 1}\n{\"b\": 2}").unwrap();
/// assert_eq!(docs, vec![json!({"a": 1}), json!({"b": 2})]);
/// ```
pub fn loads_ndjson(s: &str) -> Result<Vec<Value>> {
    let mut out = Vec::new();
    for (i, line) in s.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match default_json().loads(line) {
            Ok(v) => out.push(v),
            Err(JsonLibError::Parse(error)) => {
                return Err(JsonLibError::ParseLine { line: i + 1, error })
            }
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ndjson_skips_blank_lines() {
        let docs = loads_ndjson("\n{\"a\": 1}\n\n  \n{\"b\": 2}\n").expect("ndjson");
        assert_eq!(docs, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn ndjson_reports_failing_line() {
        let err = loads_ndjson("{\"a\": 1}\nnot json\n{\"b\": 2}").unwrap_err();
        match err {
            JsonLibError::ParseLine { line, .. } => assert_eq!(line, 2),
            other => panic!("expected ParseLine, got {other:?}"),
        }
    }

    #[test]
    fn dumps_dumpable_path() {
        let p = std::path::PathBuf::from("/tmp/x");
        let s = dumps_dumpable(&p, &DumpOpts::new()).expect("dumps");
        assert_eq!(s, "\"/tmp/x\"");
    }
}
