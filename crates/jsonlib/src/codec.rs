//! Backend selection: one `encode`/`decode` contract over interchangeable
//! JSON engines.
//!
//! The preference order is fixed: the byte-writer backend when the `writer`
//! feature is enabled, then `serde_json`. [`Json::probe`] selects the first
//! available backend; [`Json::new`] overrides the choice explicitly. The
//! module-level `dumps`/`loads` functions in the crate root consult a
//! process-wide default instance that is constructed once and never mutated.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;

use crate::error::{JsonLibError, Result};
use crate::opts::DumpOpts;

/// Encode/decode contract implemented by every JSON backend.
pub trait JsonCodec: Send + Sync {
    fn name(&self) -> &'static str;
    fn encode(&self, value: &Value, opts: &DumpOpts) -> Result<Vec<u8>>;
    fn decode(&self, s: &str) -> Result<Value>;
}

/// The JSON engines this crate can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonBackend {
    /// Single-pass byte writer (encode only; decoding delegates to serde_json).
    Writer,
    /// Plain `serde_json` in both directions.
    Serde,
}

impl JsonBackend {
    /// Fixed preference order consulted by [`JsonBackend::probe`].
    pub const PREFERRED: &'static [JsonBackend] = &[JsonBackend::Writer, JsonBackend::Serde];

    /// Whether this backend is compiled into the current build.
    pub fn available(self) -> bool {
        match self {
            JsonBackend::Writer => cfg!(feature = "writer"),
            JsonBackend::Serde => true,
        }
    }

    /// First available backend in preference order.
    pub fn probe() -> JsonBackend {
        Self::PREFERRED
            .iter()
            .copied()
            .find(|b| b.available())
            .unwrap_or(JsonBackend::Serde)
    }

    fn codec(self) -> &'static dyn JsonCodec {
        match self {
            #[cfg(feature = "writer")]
            JsonBackend::Writer => &WriterCodec,
            #[cfg(not(feature = "writer"))]
            JsonBackend::Writer => &SerdeCodec,
            JsonBackend::Serde => &SerdeCodec,
        }
    }
}

#[cfg(feature = "writer")]
struct WriterCodec;

#[cfg(feature = "writer")]
impl JsonCodec for WriterCodec {
    fn name(&self) -> &'static str {
        "writer"
    }

    fn encode(&self, value: &Value, opts: &DumpOpts) -> Result<Vec<u8>> {
        Ok(crate::writer::encode_value(value, opts))
    }

    fn decode(&self, s: &str) -> Result<Value> {
        Ok(serde_json::from_str(s)?)
    }
}

struct SerdeCodec;

impl JsonCodec for SerdeCodec {
    fn name(&self) -> &'static str {
        "serde_json"
    }

    fn encode(&self, value: &Value, opts: &DumpOpts) -> Result<Vec<u8>> {
        let sorted;
        let value = if opts.sort_keys {
            sorted = sort_keys(value);
            &sorted
        } else {
            value
        };
        let mut out = if opts.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        if opts.append_newline {
            out.push(b'\n');
        }
        Ok(out)
    }

    fn decode(&self, s: &str) -> Result<Value> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Return a copy of `value` with object keys in lexicographic order at
/// every depth.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = serde_json::Map::with_capacity(map.len());
            for key in keys {
                if let Some(v) = map.get(key.as_str()) {
                    out.insert(key.clone(), sort_keys(v));
                }
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        v => v.clone(),
    }
}

/// A JSON strategy object: a fixed backend consulted for every encode and
/// decode performed through it.
///
/// # Examples
///
/// ```
/// use jsonbourne_jsonlib::{DumpOpts, Json, JsonBackend};
/// use serde_json::json;
///
/// let json = Json::new(JsonBackend::Serde);
/// let s = json.dumps(&json!({"a": 1}), &DumpOpts::new()).unwrap();
/// assert_eq!(s, "{\"a\":1}");
/// assert_eq!(json.loads(&s).unwrap(), json!({"a": 1}));
/// ```
pub struct Json {
    backend: JsonBackend,
    codec: &'static dyn JsonCodec,
}

impl Json {
    /// Use a specific backend. Falls back to the probe order when the
    /// requested backend is not compiled in.
    pub fn new(backend: JsonBackend) -> Self {
        let backend = if backend.available() {
            backend
        } else {
            JsonBackend::probe()
        };
        Self {
            backend,
            codec: backend.codec(),
        }
    }

    /// Select the first available backend in preference order.
    pub fn probe() -> Self {
        Self::new(JsonBackend::probe())
    }

    pub fn backend(&self) -> JsonBackend {
        self.backend
    }

    /// Name of the active backend (`"writer"` or `"serde_json"`).
    pub fn name(&self) -> &'static str {
        self.codec.name()
    }

    /// Serialize `value` to a JSON string.
    pub fn dumps<T: Serialize + ?Sized>(&self, value: &T, opts: &DumpOpts) -> Result<String> {
        let bytes = self.dumpb(value, opts)?;
        String::from_utf8(bytes).map_err(|_| JsonLibError::InvalidUtf8)
    }

    /// Serialize `value` to JSON bytes.
    pub fn dumpb<T: Serialize + ?Sized>(&self, value: &T, opts: &DumpOpts) -> Result<Vec<u8>> {
        let v = to_json_value(value)?;
        self.codec.encode(&v, opts)
    }

    /// Parse a JSON string.
    pub fn loads(&self, s: &str) -> Result<Value> {
        self.codec.decode(s)
    }
}

impl Default for Json {
    fn default() -> Self {
        Self::probe()
    }
}

/// Process-wide default strategy, constructed on first use and immutable
/// afterwards.
pub fn default_json() -> &'static Json {
    static DEFAULT: OnceLock<Json> = OnceLock::new();
    DEFAULT.get_or_init(Json::probe)
}

pub(crate) fn to_json_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| JsonLibError::Unencodable {
        type_name: std::any::type_name::<T>(),
        reason: e.to_string(),
    })
}
