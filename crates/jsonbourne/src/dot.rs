//! Dot-key utilities: parse, format, validate, and traverse.
//!
//! A dot-key such as `"a.b.c"` addresses a nested value across multiple
//! levels of a [`JsonValue`] tree. Numeric steps index into arrays. There is
//! no escape syntax: keys containing a literal `.` cannot be addressed by
//! dot-key string (use an explicit path slice instead).

use thiserror::Error;

use crate::value::JsonValue;

/// One step of a dot-key path.
pub type PathStep = String;

/// A parsed dot-key.
pub type DotPath = Vec<PathStep>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DotKeyError {
    /// A step named a key or index that does not exist.
    #[error("key not found: `{key}` (lookup reached `{reached}`)")]
    NotFound { key: String, reached: String },

    /// A step tried to descend into a scalar.
    #[error("invalid dot-key `{key}`: lookup reached `{reached}` ({kind} is not subscriptable)")]
    Unreachable {
        key: String,
        reached: String,
        kind: &'static str,
    },

    /// A non-numeric step was applied to an array.
    #[error("invalid array index `{index}` in dot-key `{key}`")]
    InvalidIndex { key: String, index: String },

    /// The dot-key contains an empty step (leading, trailing, or doubled dot).
    #[error("invalid dot-key `{0}`: empty path step")]
    EmptyStep(String),
}

/// Split a dot-key into path steps.
///
/// # Examples
///
/// ```
/// use jsonbourne::dot::parse_dot_key;
///
/// assert_eq!(parse_dot_key(""), Vec::<String>::new());
/// assert_eq!(parse_dot_key("a"), vec!["a"]);
/// assert_eq!(parse_dot_key("a.b.c"), vec!["a", "b", "c"]);
/// ```
pub fn parse_dot_key(dot_key: &str) -> DotPath {
    if dot_key.is_empty() {
        return Vec::new();
    }
    dot_key.split('.').map(String::from).collect()
}

/// Join path steps back into a dot-key string.
///
/// # Examples
///
/// ```
/// use jsonbourne::dot::format_dot_key;
///
/// assert_eq!(format_dot_key(&[]), "");
/// assert_eq!(format_dot_key(&["a".to_string(), "b".to_string()]), "a.b");
/// ```
pub fn format_dot_key(path: &[PathStep]) -> String {
    path.join(".")
}

/// Parse a dot-key, rejecting empty steps.
pub fn validate_dot_key(dot_key: &str) -> Result<DotPath, DotKeyError> {
    let path = parse_dot_key(dot_key);
    if path.is_empty() || path.iter().any(|step| step.is_empty()) {
        return Err(DotKeyError::EmptyStep(dot_key.to_string()));
    }
    Ok(path)
}

/// Check if a step is a valid non-negative array index (no leading zeros).
///
/// # Examples
///
/// ```
/// use jsonbourne::dot::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(step: &str) -> bool {
    if step.is_empty() {
        return false;
    }
    let bytes = step.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

/// Get a value by path. Returns `None` if the path does not resolve.
///
/// # Examples
///
/// ```
/// use jsonbourne::{dot, JsonValue};
///
/// let v: JsonValue = serde_json::json!({"a": {"b": [1, 2]}}).into();
/// let path = dot::parse_dot_key("a.b.1");
/// assert_eq!(dot::get(&v, &path), Some(&JsonValue::from(2)));
/// ```
pub fn get<'a>(value: &'a JsonValue, path: &[PathStep]) -> Option<&'a JsonValue> {
    let mut current = value;
    for step in path {
        current = match current {
            JsonValue::Object(obj) => obj.get(step)?,
            JsonValue::Array(arr) => arr.get(step.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a mutable reference by path.
pub fn get_mut<'a>(value: &'a mut JsonValue, path: &[PathStep]) -> Option<&'a mut JsonValue> {
    let mut current = value;
    for step in path {
        current = match current {
            JsonValue::Object(obj) => obj.get_mut(step)?,
            JsonValue::Array(arr) => arr.get_mut(step.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Get a value by path, reporting how far the lookup got on failure.
pub fn find<'a>(value: &'a JsonValue, path: &[PathStep]) -> Result<&'a JsonValue, DotKeyError> {
    find_at(value, path, 0)
}

/// Walk `path[start..]` down from `value`; errors reference the full path.
pub(crate) fn find_at<'a>(
    value: &'a JsonValue,
    path: &[PathStep],
    start: usize,
) -> Result<&'a JsonValue, DotKeyError> {
    let mut current = value;
    for (i, step) in path.iter().enumerate().skip(start) {
        current = match current {
            JsonValue::Object(obj) => obj.get(step).ok_or_else(|| DotKeyError::NotFound {
                key: format_dot_key(path),
                reached: format_dot_key(&path[..i]),
            })?,
            JsonValue::Array(arr) => {
                if !is_valid_index(step) {
                    return Err(DotKeyError::InvalidIndex {
                        key: format_dot_key(path),
                        index: step.clone(),
                    });
                }
                let idx: usize = step.parse().map_err(|_| DotKeyError::InvalidIndex {
                    key: format_dot_key(path),
                    index: step.clone(),
                })?;
                arr.get(idx).ok_or_else(|| DotKeyError::NotFound {
                    key: format_dot_key(path),
                    reached: format_dot_key(&path[..i]),
                })?
            }
            other => {
                return Err(DotKeyError::Unreachable {
                    key: format_dot_key(path),
                    reached: format_dot_key(&path[..i]),
                    kind: other.kind(),
                })
            }
        };
    }
    Ok(current)
}
