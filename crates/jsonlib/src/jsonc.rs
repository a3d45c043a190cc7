//! JSON-with-comments: strip `//` and `/* */` comments before parsing.

use crate::error::{JsonLibError, Result};

/// Replace comments with whitespace, leaving everything else untouched.
///
/// Comment bytes become spaces and newlines are preserved, so byte offsets
/// and line numbers in downstream parse errors still point at the original
/// source. Comment markers inside string literals are left alone.
///
/// # Errors
///
/// An unterminated `/* ...` block comment is an error; comments are never
/// silently ignored.
///
/// # Examples
///
/// ```
/// use jsonbourne_jsonlib::strip_comments;
///
/// let src = "{\n  \"a\": 1 // trailing\n}";
/// let clean = strip_comments(src).unwrap();
/// let v: serde_json::Value = serde_json::from_str(&clean).unwrap();
/// assert_eq!(v, serde_json::json!({"a": 1}));
/// ```
pub fn strip_comments(src: &str) -> Result<String> {
    enum State {
        Normal,
        Str { escaped: bool },
        Line,
        Block { start: usize },
    }

    let mut out = String::with_capacity(src.len());
    let mut state = State::Normal;
    let mut chars = src.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match state {
            State::Normal => match c {
                '"' => {
                    out.push(c);
                    state = State::Str { escaped: false };
                }
                '/' => match chars.peek() {
                    Some((_, '/')) => {
                        chars.next();
                        out.push_str("  ");
                        state = State::Line;
                    }
                    Some((_, '*')) => {
                        chars.next();
                        out.push_str("  ");
                        state = State::Block { start: i };
                    }
                    _ => out.push(c),
                },
                _ => out.push(c),
            },
            State::Str { escaped } => {
                out.push(c);
                state = match c {
                    _ if escaped => State::Str { escaped: false },
                    '\\' => State::Str { escaped: true },
                    '"' => State::Normal,
                    _ => State::Str { escaped: false },
                };
            }
            State::Line => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Normal;
                } else {
                    out.push(' ');
                }
            }
            State::Block { start } => {
                if c == '*' && matches!(chars.peek(), Some((_, '/'))) {
                    chars.next();
                    out.push_str("  ");
                    state = State::Normal;
                } else if c == '\n' {
                    out.push('\n');
                    state = State::Block { start };
                } else {
                    out.push(' ');
                    state = State::Block { start };
                }
            }
        }
    }

    if let State::Block { start } = state {
        return Err(JsonLibError::UnterminatedComment(start));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parse_jsonc(src: &str) -> Value {
        let clean = strip_comments(src).expect("strip");
        serde_json::from_str(&clean).expect("parse")
    }

    #[test]
    fn line_comments() {
        let v = parse_jsonc("// header\n{\"a\": 1, // trailing\n\"b\": 2}\n// footer");
        assert_eq!(v, json!({"a": 1, "b": 2}));
    }

    #[test]
    fn block_comments() {
        let v = parse_jsonc("{/* one */\"a\"/* two */: /* three\nspans lines */1}");
        assert_eq!(v, json!({"a": 1}));
    }

    #[test]
    fn comment_markers_inside_strings_survive() {
        let v = parse_jsonc(r#"{"url": "http://example.com", "note": "/* not a comment */"}"#);
        assert_eq!(
            v,
            json!({"url": "http://example.com", "note": "/* not a comment */"})
        );
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        let v = parse_jsonc(r#"{"a": "quote \" // still in string"}"#);
        assert_eq!(v, json!({"a": "quote \" // still in string"}));
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let err = strip_comments("{\"a\": 1} /* never closed").unwrap_err();
        assert!(matches!(err, JsonLibError::UnterminatedComment(9)));
    }

    #[test]
    fn offsets_are_preserved() {
        let src = "{\"a\": /* pad */ 1}";
        let clean = strip_comments(src).expect("strip");
        assert_eq!(clean.len(), src.len());
        assert_eq!(&clean[0..6], "{\"a\": ");
    }

    #[test]
    fn lone_slash_passes_through() {
        // Invalid JSON either way, but the slash must not be eaten
        let clean = strip_comments("a / b").expect("strip");
        assert_eq!(clean, "a / b");
    }
}
