use thiserror::Error;

/// Result alias for jsonlib operations.
pub type Result<T> = std::result::Result<T, JsonLibError>;

#[derive(Debug, Error)]
pub enum JsonLibError {
    /// The value could not be represented as a JSON tree.
    #[error("cannot encode value as JSON ({type_name}): {reason}")]
    Unencodable {
        type_name: &'static str,
        reason: String,
    },

    /// The input string is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A line of line-delimited JSON failed to parse. Lines are 1-based.
    #[error("invalid JSON on line {line}: {error}")]
    ParseLine {
        line: usize,
        #[source]
        error: serde_json::Error,
    },

    /// A `/* ... */` comment was opened but never closed.
    #[error("unterminated block comment starting at byte {0}")]
    UnterminatedComment(usize),

    /// The active backend produced bytes that are not UTF-8.
    #[error("backend produced non-UTF-8 JSON output")]
    InvalidUtf8,
}
