//! Dump options shared by all JSON backends.

/// Options controlling JSON output.
///
/// # Examples
///
/// ```
/// use jsonbourne_jsonlib::{dumps_opts, DumpOpts};
/// use serde_json::json;
///
/// let value = json!({"b": 2, "a": 1});
/// let compact = dumps_opts(&value, &DumpOpts::new()).unwrap();
/// assert_eq!(compact, "{\"b\":2,\"a\":1}");
///
/// let sorted = dumps_opts(&value, &DumpOpts::new().sort_keys(true)).unwrap();
/// assert_eq!(sorted, "{\"a\":1,\"b\":2}");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOpts {
    /// Emit newlines and two-space indentation.
    pub pretty: bool,
    /// Emit object keys in lexicographic order, recursively.
    pub sort_keys: bool,
    /// Append a single trailing newline to the output.
    pub append_newline: bool,
}

impl DumpOpts {
    pub const fn new() -> Self {
        Self {
            pretty: false,
            sort_keys: false,
            append_newline: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    pub fn append_newline(mut self, append_newline: bool) -> Self {
        self.append_newline = append_newline;
        self
    }
}
