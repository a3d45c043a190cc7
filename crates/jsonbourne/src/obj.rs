//! `JsonObj` — a JSON-friendly mapping with string-only keys and dot-key
//! addressing.
//!
//! Keys are strings, insertion order is preserved, and nested mappings are
//! wrapped into `JsonObj` on the way in, so `obj.dot_lookup("a.b.c")` walks
//! the whole tree. Writes come in two flavors: `insert` (bracket semantics,
//! any string key) and `set` (attribute semantics, which rejects keys that
//! are not identifiers or that shadow a `JsonObj` method).

use std::collections::BTreeSet;
use std::fmt;
use std::ops;

use indexmap::IndexMap;
use jsonbourne_jsonlib::{DumpOpts, Dumpable};
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::dot::{self, DotKeyError, DotPath, PathStep};
use crate::error::{JsonObjError, Result};
use crate::value::JsonValue;

/// Method names that attribute-style assignment may not shadow. Sorted.
pub const RESERVED_KEYS: &[&str] = &[
    "contains",
    "dot_items",
    "dot_keys",
    "dot_keys_list",
    "dot_keys_set",
    "dot_lookup",
    "eject",
    "filter_false",
    "filter_none",
    "from_json",
    "from_value",
    "get",
    "get_mut",
    "get_path",
    "insert",
    "is_empty",
    "items",
    "iter",
    "keys",
    "len",
    "lookup",
    "remove",
    "set",
    "stringify",
    "to_json",
    "to_json_bytes",
    "to_value",
    "values",
];

/// Check if a string has identifier syntax: starts with an ASCII letter or
/// underscore, continues with ASCII alphanumerics or underscores.
///
/// # Examples
///
/// ```
/// use jsonbourne::is_identifier;
///
/// assert!(is_identifier("herm"));
/// assert!(is_identifier("astring_with_underscores"));
/// assert!(!is_identifier("something with spaces"));
/// assert!(!is_identifier("something.with.periods"));
/// assert!(!is_identifier("astring-with-dashes"));
/// assert!(!is_identifier("123"));
/// ```
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A `JsonObj` key. Integer keys coerce to their decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(String);

impl Key {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key(s.clone())
    }
}

macro_rules! key_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(n: $ty) -> Self {
                    Key(n.to_string())
                }
            }
        )*
    };
}

key_from_integer!(i32, i64, u32, u64, usize);

/// A mutable, insertion-ordered, string-keyed JSON mapping with dot-key
/// addressing.
///
/// # Examples
///
/// ```
/// use jsonbourne::JsonObj;
///
/// let mut d: JsonObj = [("uno", 1), ("dos", 2)].into_iter().collect();
/// assert_eq!(d["uno"].as_i64(), Some(1));
///
/// d.insert("sub", jsonbourne::parse(r#"{"a": {"b": 3}}"#).unwrap());
/// assert_eq!(d["sub.a.b"].as_i64(), Some(3));
/// assert!(d.contains("sub.a"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObj {
    map: IndexMap<String, JsonValue>,
}

static NULL: JsonValue = JsonValue::Null;

impl JsonObj {
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bracket-style write: any string key, integer keys coerced to their
    /// decimal string form. Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<JsonValue>) -> Option<JsonValue> {
        self.map.insert(key.into().into_string(), value.into())
    }

    /// Attribute-style write: the key must have identifier syntax and must
    /// not shadow a `JsonObj` method name.
    ///
    /// # Errors
    ///
    /// [`JsonObjError::InvalidKey`] for non-identifier keys;
    /// [`JsonObjError::ReservedKey`] for method names, which directs the
    /// caller to [`JsonObj::insert`] (bracket and attribute access diverge
    /// intentionally for reserved names).
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<JsonValue>) -> Result<Option<JsonValue>> {
        let key = key.into().into_string();
        if !is_identifier(&key) {
            return Err(JsonObjError::InvalidKey {
                key,
                reason: "not a valid identifier",
            });
        }
        if RESERVED_KEYS.binary_search(&key.as_str()).is_ok() {
            return Err(JsonObjError::ReservedKey(key));
        }
        Ok(self.map.insert(key, value.into()))
    }

    /// Plain (non-dotted) key lookup.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.map.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut JsonValue> {
        self.map.get_mut(key)
    }

    /// Lookup that dispatches on `.`: dotted keys walk the tree, plain keys
    /// hit the top level.
    pub fn lookup(&self, key: &str) -> Result<&JsonValue> {
        if key.contains('.') {
            self.dot_lookup(key)
        } else {
            self.get(key)
                .ok_or_else(|| JsonObjError::KeyNotFound(key.to_string()))
        }
    }

    /// Walk a dot-key such as `"a.b.c"` down the tree.
    ///
    /// # Errors
    ///
    /// The error names how far the lookup got before failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonbourne::JsonObj;
    ///
    /// let d = JsonObj::from_json(r#"{"a": {"b": {"c": 1}}}"#).unwrap();
    /// assert_eq!(d.dot_lookup("a.b.c").unwrap().as_i64(), Some(1));
    /// assert!(d.dot_lookup("a.b.c.d").is_err());
    /// ```
    pub fn dot_lookup(&self, dot_key: &str) -> Result<&JsonValue> {
        let path = dot::validate_dot_key(dot_key)?;
        self.get_path(&path)
    }

    /// Walk an explicit path of steps (useful for keys containing `.`).
    pub fn get_path(&self, path: &[PathStep]) -> Result<&JsonValue> {
        let (first, _) = path
            .split_first()
            .ok_or_else(|| DotKeyError::EmptyStep(String::new()))?;
        let root = self.get(first).ok_or_else(|| {
            DotKeyError::NotFound {
                key: dot::format_dot_key(path),
                reached: String::new(),
            }
        })?;
        Ok(dot::find_at(root, path, 1)?)
    }

    /// Dot-aware containment: `"sub.a"` partitions on the first `.` and
    /// recurses into the nested object.
    pub fn contains(&self, key: &str) -> bool {
        match key.split_once('.') {
            Some((first, rest)) => {
                matches!(self.get(first), Some(JsonValue::Object(obj)) if obj.contains(rest))
            }
            None => self.map.contains_key(key),
        }
    }

    /// Remove a top-level key, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.map.shift_remove(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, JsonValue> {
        self.map.iter()
    }

    /// Alias for [`JsonObj::iter`], matching the mapping vocabulary.
    pub fn items(&self) -> indexmap::map::Iter<'_, String, JsonValue> {
        self.map.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, JsonValue> {
        self.map.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, JsonValue> {
        self.map.values()
    }

    /// New `JsonObj` without the keys whose value is null.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonbourne::JsonObj;
    ///
    /// let d = JsonObj::from_json(r#"{"a": null, "b": 0, "c": 1}"#).unwrap();
    /// assert_eq!(d.filter_none(false).to_json_compact().unwrap(), r#"{"b":0,"c":1}"#);
    /// ```
    pub fn filter_none(&self, recursive: bool) -> JsonObj {
        self.map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let v = match v {
                    JsonValue::Object(o) if recursive => JsonValue::Object(o.filter_none(true)),
                    other => other.clone(),
                };
                (k.clone(), v)
            })
            .collect()
    }

    /// New `JsonObj` without the keys whose value is falsy
    /// (null, `false`, `0`, `""`, `[]`, `{}`).
    pub fn filter_false(&self, recursive: bool) -> JsonObj {
        self.map
            .iter()
            .filter(|(_, v)| v.is_truthy())
            .map(|(k, v)| {
                let v = match v {
                    JsonValue::Object(o) if recursive => JsonValue::Object(o.filter_false(true)),
                    other => other.clone(),
                };
                (k.clone(), v)
            })
            .collect()
    }

    /// Lazy iterator over the path of every leaf (non-object) value, at any
    /// depth, in insertion order. Restartable: each call walks afresh.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonbourne::JsonObj;
    ///
    /// let d = JsonObj::from_json(r#"{"a": {"b": 1}, "c": 2}"#).unwrap();
    /// let paths: Vec<Vec<String>> = d.dot_keys().collect();
    /// assert_eq!(paths, vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]]);
    /// ```
    pub fn dot_keys(&self) -> DotKeys<'_> {
        DotKeys {
            stack: vec![self.map.iter()],
            prefix: Vec::new(),
        }
    }

    /// Like [`JsonObj::dot_keys`], pairing each path with its value.
    pub fn dot_items(&self) -> DotItems<'_> {
        DotItems {
            stack: vec![self.map.iter()],
            prefix: Vec::new(),
        }
    }

    /// Dot-key strings (`"a.b"`) for every leaf, optionally sorted.
    pub fn dot_keys_list(&self, sort_keys: bool) -> Vec<String> {
        let mut keys: Vec<String> = self.dot_keys().map(|p| dot::format_dot_key(&p)).collect();
        if sort_keys {
            keys.sort();
        }
        keys
    }

    /// Dot-key strings for every leaf as an ordered set.
    pub fn dot_keys_set(&self) -> BTreeSet<String> {
        self.dot_keys().map(|p| dot::format_dot_key(&p)).collect()
    }

    /// Build from a parsed JSON value; anything but an object is an error.
    /// This is where non-object (and therefore non-string-keyed) input is
    /// rejected.
    pub fn from_value(value: Value) -> Result<JsonObj> {
        match value {
            Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, JsonValue::from(v)))
                .collect()),
            other => Err(JsonObjError::NotAnObject(value_kind(&other))),
        }
    }

    /// Parse a JSON string into a `JsonObj`.
    pub fn from_json(s: &str) -> Result<JsonObj> {
        let value = jsonbourne_jsonlib::loads(s)?;
        Self::from_value(value)
    }

    /// Eject to a plain `serde_json::Value`, recursively unwrapping.
    ///
    /// The tree is owned, so reference cycles cannot exist and this never
    /// loops.
    pub fn eject(&self) -> Value {
        Value::Object(
            self.map
                .iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }

    /// Alias for [`JsonObj::eject`].
    pub fn to_value(&self) -> Value {
        self.eject()
    }

    /// Eject, consuming the object.
    pub fn into_value(self) -> Value {
        Value::Object(
            self.map
                .into_iter()
                .map(|(k, v)| (k, v.into_value()))
                .collect(),
        )
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self, opts: &DumpOpts) -> Result<String> {
        Ok(jsonbourne_jsonlib::dumps_opts(self, opts)?)
    }

    /// Compact JSON string.
    pub fn to_json_compact(&self) -> Result<String> {
        self.to_json(&DumpOpts::new())
    }

    /// Alias for [`JsonObj::to_json`].
    pub fn stringify(&self, opts: &DumpOpts) -> Result<String> {
        self.to_json(opts)
    }

    /// Serialize to JSON bytes.
    pub fn to_json_bytes(&self, opts: &DumpOpts) -> Result<Vec<u8>> {
        Ok(jsonbourne_jsonlib::dumpb_opts(self, opts)?)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Iterator over leaf paths. See [`JsonObj::dot_keys`].
pub struct DotKeys<'a> {
    stack: Vec<indexmap::map::Iter<'a, String, JsonValue>>,
    prefix: Vec<String>,
}

impl Iterator for DotKeys<'_> {
    type Item = DotPath;

    fn next(&mut self) -> Option<DotPath> {
        loop {
            let iter = self.stack.last_mut()?;
            match iter.next() {
                Some((key, JsonValue::Object(obj))) => {
                    self.stack.push(obj.map.iter());
                    self.prefix.push(key.clone());
                }
                Some((key, _)) => {
                    let mut path = self.prefix.clone();
                    path.push(key.clone());
                    return Some(path);
                }
                None => {
                    self.stack.pop();
                    self.prefix.pop();
                }
            }
        }
    }
}

/// Iterator over `(leaf path, value)` pairs. See [`JsonObj::dot_items`].
pub struct DotItems<'a> {
    stack: Vec<indexmap::map::Iter<'a, String, JsonValue>>,
    prefix: Vec<String>,
}

impl<'a> Iterator for DotItems<'a> {
    type Item = (DotPath, &'a JsonValue);

    fn next(&mut self) -> Option<(DotPath, &'a JsonValue)> {
        loop {
            let iter = self.stack.last_mut()?;
            match iter.next() {
                Some((key, JsonValue::Object(obj))) => {
                    self.stack.push(obj.map.iter());
                    self.prefix.push(key.clone());
                }
                Some((key, value)) => {
                    let mut path = self.prefix.clone();
                    path.push(key.clone());
                    return Some((path, value));
                }
                None => {
                    self.stack.pop();
                    self.prefix.pop();
                }
            }
        }
    }
}

/// Missing or unreachable keys index to null; dotted keys walk the tree.
impl ops::Index<&str> for JsonObj {
    type Output = JsonValue;

    fn index(&self, key: &str) -> &JsonValue {
        self.lookup(key).unwrap_or(&NULL)
    }
}

impl<K: Into<Key>, V: Into<JsonValue>> FromIterator<(K, V)> for JsonObj {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(k, v)| (k.into().into_string(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<Key>, V: Into<JsonValue>> Extend<(K, V)> for JsonObj {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a> IntoIterator for &'a JsonObj {
    type Item = (&'a String, &'a JsonValue);
    type IntoIter = indexmap::map::Iter<'a, String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl IntoIterator for JsonObj {
    type Item = (String, JsonValue);
    type IntoIter = indexmap::map::IntoIter<String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl From<JsonObj> for Value {
    fn from(obj: JsonObj) -> Self {
        obj.into_value()
    }
}

impl TryFrom<Value> for JsonObj {
    type Error = JsonObjError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl PartialEq<Value> for JsonObj {
    fn eq(&self, other: &Value) -> bool {
        match other {
            Value::Object(map) => {
                self.len() == map.len()
                    && map.iter().all(|(k, v)| self.get(k).is_some_and(|jv| jv == v))
            }
            _ => false,
        }
    }
}

impl PartialEq<JsonObj> for Value {
    fn eq(&self, other: &JsonObj) -> bool {
        other == self
    }
}

impl Serialize for JsonObj {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for JsonObj {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        JsonObj::from_value(value).map_err(serde::de::Error::custom)
    }
}

/// Compact JSON.
impl fmt::Display for JsonObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_json_compact().map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl Dumpable for JsonObj {
    fn dumpable(&self) -> Value {
        self.eject()
    }
}

impl Dumpable for JsonValue {
    fn dumpable(&self) -> Value {
        self.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reserved_keys_are_sorted_for_binary_search() {
        let mut sorted = RESERVED_KEYS.to_vec();
        sorted.sort_unstable();
        assert_eq!(RESERVED_KEYS, sorted.as_slice());
    }

    #[test]
    fn insert_coerces_integer_keys() {
        let mut d = JsonObj::new();
        d.insert(123, "a");
        assert_eq!(d["123"].as_str(), Some("a"));
        assert_eq!(d.keys().collect::<Vec<_>>(), vec!["123"]);
    }

    #[test]
    fn set_rejects_non_identifier_keys() {
        let mut d = JsonObj::new();
        for bad in ["123", "has space", "dot.key", "dash-key", ""] {
            let err = d.set(bad, 1).unwrap_err();
            assert!(matches!(err, JsonObjError::InvalidKey { .. }), "{bad}");
        }
        assert!(d.is_empty());
    }

    #[test]
    fn set_rejects_reserved_names_but_insert_allows_them() {
        let mut d = JsonObj::new();
        let err = d.set("items", 1).unwrap_err();
        assert!(matches!(err, JsonObjError::ReservedKey(_)));

        d.insert("items", 1);
        assert_eq!(d.get("items").and_then(JsonValue::as_i64), Some(1));
        // The method is still the mapping's items view
        assert_eq!(d.items().count(), 1);
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut d = JsonObj::new();
        d.set("uno", 1).expect("set");
        d.set("dos", "two").expect("set");
        assert_eq!(d["uno"].as_i64(), Some(1));
        assert_eq!(d["dos"].as_str(), Some("two"));
    }

    #[test]
    fn remove_preserves_order() {
        let mut d: JsonObj = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(d.remove("b").and_then(|v| v.as_i64()), Some(2));
        assert_eq!(d.keys().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(d.remove("b"), None);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        for (value, kind) in [
            (json!(null), "null"),
            (json!(true), "boolean"),
            (json!(1), "number"),
            (json!("s"), "string"),
            (json!([1]), "array"),
        ] {
            match JsonObj::from_value(value) {
                Err(JsonObjError::NotAnObject(k)) => assert_eq!(k, kind),
                other => panic!("expected NotAnObject, got {other:?}"),
            }
        }
    }

    #[test]
    fn index_returns_null_for_missing() {
        let d = JsonObj::from_value(json!({"a": {"b": 1}})).expect("obj");
        assert!(d["nope"].is_null());
        assert!(d["a.nope"].is_null());
        assert_eq!(d["a.b"].as_i64(), Some(1));
    }

    #[test]
    fn contains_handles_dotted_keys() {
        let d = JsonObj::from_value(json!({
            "uno": 1,
            "sub": {"a": 1, "d": "a_string"}
        }))
        .expect("obj");
        assert!(d.contains("uno"));
        assert!(!d.contains("not_here"));
        assert!(d.contains("sub.a"));
        assert!(!d.contains("sub.d.a"));
    }

    #[test]
    fn nested_values_are_json_objs() {
        let mut d = JsonObj::from_value(json!({"tres": {"a": 1, "b": [3, 4]}})).expect("obj");
        assert!(d["tres"].is_object());
        if let Some(sub) = d.get_mut("tres").and_then(JsonValue::as_object_mut) {
            sub.insert("a", "new-val");
        }
        assert_eq!(d["tres.a"].as_str(), Some("new-val"));
    }

    #[test]
    fn serde_round_trip() {
        let d = JsonObj::from_value(json!({"a": 1, "b": {"c": [1, 2]}})).expect("obj");
        let s = serde_json::to_string(&d).expect("encode");
        let back: JsonObj = serde_json::from_str(&s).expect("decode");
        assert_eq!(back, d);
    }
}
