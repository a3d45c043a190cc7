//! Byte-level JSON writer (the `writer` backend's encoder).
//!
//! Writes UTF-8 JSON straight into a `Vec<u8>` in a single pass, honoring
//! [`DumpOpts`]: two-space indentation when pretty, recursive key sorting,
//! and an optional trailing newline.

use serde_json::{Map, Value};

use crate::opts::DumpOpts;

pub(crate) fn encode_value(value: &Value, opts: &DumpOpts) -> Vec<u8> {
    let mut w = JsonWriter {
        out: Vec::with_capacity(128),
        pretty: opts.pretty,
        sort_keys: opts.sort_keys,
        depth: 0,
    };
    w.write_value(value);
    if opts.append_newline {
        w.out.push(b'\n');
    }
    w.out
}

struct JsonWriter {
    out: Vec<u8>,
    pretty: bool,
    sort_keys: bool,
    depth: usize,
}

impl JsonWriter {
    fn write_value(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.extend_from_slice(b"null"),
            Value::Bool(true) => self.out.extend_from_slice(b"true"),
            Value::Bool(false) => self.out.extend_from_slice(b"false"),
            // serde_json's Number Display is the shortest round-trip form
            Value::Number(n) => self.out.extend_from_slice(n.to_string().as_bytes()),
            Value::String(s) => self.write_str(s),
            Value::Array(arr) => self.write_arr(arr),
            Value::Object(map) => self.write_obj(map),
        }
    }

    fn newline_indent(&mut self) {
        self.out.push(b'\n');
        for _ in 0..self.depth {
            self.out.extend_from_slice(b"  ");
        }
    }

    fn write_arr(&mut self, arr: &[Value]) {
        if arr.is_empty() {
            self.out.extend_from_slice(b"[]");
            return;
        }
        self.out.push(b'[');
        self.depth += 1;
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                self.out.push(b',');
            }
            if self.pretty {
                self.newline_indent();
            }
            self.write_value(item);
        }
        self.depth -= 1;
        if self.pretty {
            self.newline_indent();
        }
        self.out.push(b']');
    }

    fn write_obj(&mut self, map: &Map<String, Value>) {
        if map.is_empty() {
            self.out.extend_from_slice(b"{}");
            return;
        }
        self.out.push(b'{');
        self.depth += 1;
        let mut keys: Vec<&String> = map.keys().collect();
        if self.sort_keys {
            keys.sort();
        }
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                self.out.push(b',');
            }
            if self.pretty {
                self.newline_indent();
            }
            self.write_str(key);
            self.out.push(b':');
            if self.pretty {
                self.out.push(b' ');
            }
            if let Some(v) = map.get(key.as_str()) {
                self.write_value(v);
            }
        }
        self.depth -= 1;
        if self.pretty {
            self.newline_indent();
        }
        self.out.push(b'}');
    }

    /// Write a JSON-encoded string (with escaping).
    fn write_str(&mut self, s: &str) {
        let bytes = s.as_bytes();

        // Fast path: printable ASCII with no quotes or backslash
        let mut simple = true;
        for &b in bytes {
            if b < 0x20 || b > 0x7e || b == b'"' || b == b'\\' {
                simple = false;
                break;
            }
        }
        if simple {
            self.out.reserve(bytes.len() + 2);
            self.out.push(b'"');
            self.out.extend_from_slice(bytes);
            self.out.push(b'"');
            return;
        }

        // Fall back to serde_json for proper escaping
        match serde_json::to_string(s) {
            Ok(encoded) => self.out.extend_from_slice(encoded.as_bytes()),
            Err(_) => self.out.extend_from_slice(b"\"\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dumps(value: &Value, opts: &DumpOpts) -> String {
        String::from_utf8(encode_value(value, opts)).expect("writer output is UTF-8")
    }

    #[test]
    fn compact_has_no_spaces() {
        let v = json!({"b": 2, "a": [1, null, true]});
        assert_eq!(dumps(&v, &DumpOpts::new()), r#"{"b":2,"a":[1,null,true]}"#);
    }

    #[test]
    fn pretty_uses_two_space_indent() {
        let v = json!({"a": {"b": 1}});
        let out = dumps(&v, &DumpOpts::new().pretty(true));
        assert_eq!(out, "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
    }

    #[test]
    fn pretty_empty_containers_stay_inline() {
        assert_eq!(dumps(&json!({}), &DumpOpts::new().pretty(true)), "{}");
        assert_eq!(dumps(&json!([]), &DumpOpts::new().pretty(true)), "[]");
    }

    #[test]
    fn sort_keys_is_recursive() {
        let v = json!({"b": {"d": 1, "c": 2}, "a": 3});
        let out = dumps(&v, &DumpOpts::new().sort_keys(true));
        assert_eq!(out, r#"{"a":3,"b":{"c":2,"d":1}}"#);
    }

    #[test]
    fn append_newline_adds_exactly_one() {
        let out = dumps(&json!(1), &DumpOpts::new().append_newline(true));
        assert_eq!(out, "1\n");
    }

    #[test]
    fn strings_escape_like_serde() {
        let cases = vec![
            json!("plain"),
            json!("with \"quotes\""),
            json!("back\\slash"),
            json!("tab\tnewline\n"),
            json!("unicode: ñ € 日本語"),
            json!("control: \u{0001}"),
        ];
        for case in cases {
            let ours = dumps(&case, &DumpOpts::new());
            let serde = serde_json::to_string(&case).expect("serde encode");
            // Both encodings must parse back to the same value
            let back: Value = serde_json::from_str(&ours).expect("parse back");
            assert_eq!(back, case);
            // ASCII fast path matches serde byte-for-byte
            if case.as_str().map(|s| s.is_ascii()).unwrap_or(false) {
                assert_eq!(ours, serde);
            }
        }
    }

    #[test]
    fn numbers_round_trip() {
        let cases = vec![
            json!(0),
            json!(-1),
            json!(i64::MAX),
            json!(u64::MAX),
            json!(314.0 / 100.0),
            json!(1e-9),
        ];
        for case in cases {
            let out = dumps(&case, &DumpOpts::new());
            let back: Value = serde_json::from_str(&out).expect("parse back");
            assert_eq!(back, case);
        }
    }
}
