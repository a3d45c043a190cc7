use thiserror::Error;

use crate::dot::DotKeyError;

/// Result alias for jsonbourne operations.
pub type Result<T> = std::result::Result<T, JsonObjError>;

#[derive(Debug, Error)]
pub enum JsonObjError {
    /// The key is not usable for attribute-style assignment.
    #[error("invalid key `{key}`: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// The key names a `JsonObj` method and cannot be set attribute-style.
    #[error("`{0}` is a reserved JsonObj method name; use insert() for bracket-style assignment")]
    ReservedKey(String),

    /// `JsonObj` can only be built from a JSON object.
    #[error("cannot build JsonObj from JSON {0}")]
    NotAnObject(&'static str),

    /// Plain (non-dotted) lookup of a missing key.
    #[error("key not found: `{0}`")]
    KeyNotFound(String),

    /// A dot-key lookup failed partway down.
    #[error(transparent)]
    DotKey(#[from] DotKeyError),

    #[error(transparent)]
    Json(#[from] jsonbourne_jsonlib::JsonLibError),
}
