//! The `JsonValue` tree and the jsonify/unjsonify conversions.
//!
//! `JsonValue` mirrors `serde_json::Value` except that its object variant is
//! a [`JsonObj`], so every nested mapping in the tree carries the dot-key
//! API. Converting a `serde_json::Value` in ("jsonify") wraps mappings
//! recursively; converting back out ("unjsonify") undoes it without loss.
//! Both trees are owned, so cyclic structures are unrepresentable and
//! unwrapping can never loop.

use std::fmt;
use std::ops;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::obj::JsonObj;

/// A JSON value whose objects are [`JsonObj`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<JsonValue>),
    Object(JsonObj),
}

impl JsonValue {
    /// Lowercase name of the variant ("null", "boolean", "number", ...).
    pub fn kind(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            JsonValue::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<JsonValue>> {
        match self {
            JsonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObj> {
        match self {
            JsonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut JsonObj> {
        match self {
            JsonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Truthiness: `null`, `false`, `0`, `""`, `[]`, and `{}` are falsy;
    /// everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            JsonValue::Null => false,
            JsonValue::Bool(b) => *b,
            JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
            JsonValue::String(s) => !s.is_empty(),
            JsonValue::Array(arr) => !arr.is_empty(),
            JsonValue::Object(obj) => !obj.is_empty(),
        }
    }

    /// Unwrap to a plain `serde_json::Value`, cloning.
    pub fn to_value(&self) -> Value {
        match self {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => Value::Number(n.clone()),
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Array(arr) => Value::Array(arr.iter().map(JsonValue::to_value).collect()),
            JsonValue::Object(obj) => obj.eject(),
        }
    }

    /// Unwrap to a plain `serde_json::Value`, consuming.
    pub fn into_value(self) -> Value {
        match self {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(arr) => {
                Value::Array(arr.into_iter().map(JsonValue::into_value).collect())
            }
            JsonValue::Object(obj) => obj.into_value(),
        }
    }
}

/// Recursively wrap a plain JSON tree: every mapping becomes a [`JsonObj`].
pub fn jsonify(value: Value) -> JsonValue {
    JsonValue::from(value)
}

/// Options for [`jsonify_opts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonifyOpts {
    /// Re-parse string leaves that happen to contain JSON. Off by default:
    /// `{"x": "123"}` keeps the string `"123"` unless this is set.
    pub parse_strings: bool,
}

impl JsonifyOpts {
    pub const fn new() -> Self {
        Self {
            parse_strings: false,
        }
    }

    pub fn parse_strings(mut self, parse_strings: bool) -> Self {
        self.parse_strings = parse_strings;
        self
    }
}

/// [`jsonify`] with the opt-in string re-parse quirk.
///
/// With `parse_strings` enabled, a string leaf that parses as JSON is
/// replaced by its parsed (and re-jsonified) form; parse failures are
/// swallowed and the string kept as-is.
pub fn jsonify_opts(value: Value, opts: &JsonifyOpts) -> JsonValue {
    if !opts.parse_strings {
        return JsonValue::from(value);
    }
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(parsed) => jsonify_opts(parsed, opts),
            Err(_) => JsonValue::String(s),
        },
        Value::Array(arr) => {
            JsonValue::Array(arr.into_iter().map(|v| jsonify_opts(v, opts)).collect())
        }
        Value::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(k, v)| (k, jsonify_opts(v, opts)))
                .collect(),
        ),
        v => JsonValue::from(v),
    }
}

/// Recursively unwrap back to a plain `serde_json::Value`.
pub fn unjsonify(value: JsonValue) -> Value {
    value.into_value()
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Number(n) => JsonValue::Number(n),
            Value::String(s) => JsonValue::String(s),
            Value::Array(arr) => JsonValue::Array(arr.into_iter().map(JsonValue::from).collect()),
            Value::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        value.into_value()
    }
}

impl From<JsonObj> for JsonValue {
    fn from(obj: JsonObj) -> Self {
        JsonValue::Object(obj)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(arr: Vec<JsonValue>) -> Self {
        JsonValue::Array(arr)
    }
}

impl From<Number> for JsonValue {
    fn from(n: Number) -> Self {
        JsonValue::Number(n)
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<()> for JsonValue {
    fn from(_: ()) -> Self {
        JsonValue::Null
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => JsonValue::Null,
        }
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsonValue {
                fn from(n: $ty) -> Self {
                    JsonValue::Number(Number::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// Non-finite floats become `null`, like `serde_json`.
impl From<f64> for JsonValue {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number)
    }
}

impl From<f32> for JsonValue {
    fn from(f: f32) -> Self {
        JsonValue::from(f as f64)
    }
}

static NULL: JsonValue = JsonValue::Null;

/// Missing keys (and non-objects) index to null; dotted keys walk the tree.
impl ops::Index<&str> for JsonValue {
    type Output = JsonValue;

    fn index(&self, key: &str) -> &JsonValue {
        match self {
            JsonValue::Object(obj) => &obj[key],
            _ => &NULL,
        }
    }
}

/// Out-of-range indexes (and non-arrays) index to null.
impl ops::Index<usize> for JsonValue {
    type Output = JsonValue;

    fn index(&self, index: usize) -> &JsonValue {
        match self {
            JsonValue::Array(arr) => arr.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl PartialEq<Value> for JsonValue {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (JsonValue::Null, Value::Null) => true,
            (JsonValue::Bool(a), Value::Bool(b)) => a == b,
            (JsonValue::Number(a), Value::Number(b)) => a == b,
            (JsonValue::String(a), Value::String(b)) => a == b,
            (JsonValue::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
            }
            (JsonValue::Object(a), Value::Object(b)) => {
                a.len() == b.len() && b.iter().all(|(k, v)| a.get(k).is_some_and(|jv| jv == v))
            }
            _ => false,
        }
    }
}

impl PartialEq<JsonValue> for Value {
    fn eq(&self, other: &JsonValue) -> bool {
        other == self
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => n.serialize(serializer),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(arr) => arr.serialize(serializer),
            JsonValue::Object(obj) => obj.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(JsonValue::from(Value::deserialize(deserializer)?))
    }
}

/// Compact JSON.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = jsonbourne_jsonlib::dumps(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}
