//! Header entry types produced by the tokenizer.

/// A single logical header line after unfolding.
///
/// # Examples
/// - `"Subject: Hello"` → `name = "Subject"`, `value = "Hello"`
/// - A leading continuation line with no preceding header keeps its text in
///   `value` with an empty `name`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HeaderEntry {
    /// Header name as it appeared in the source (original casing, may be empty).
    pub name: String,
    /// Unfolded value with encoded-words decoded and NULs stripped.
    pub value: String,
}

impl HeaderEntry {
    /// Create an entry from name and value parts.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// An entry not consumed by the summary, relay trace, or antispam sections,
/// decorated with a documentation URL when the header name is well known.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OtherHeader {
    /// 1-based position within the "other headers" bucket.
    pub number: usize,
    /// Header name (original casing).
    pub name: String,
    /// Decoded header value.
    pub value: String,
    /// Reference URL for the header, if one is known.
    pub url: Option<&'static str>,
}
