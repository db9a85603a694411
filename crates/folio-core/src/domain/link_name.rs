//! Link names - URL-safe slugs derived from display names.
//!
//! A link name is lower-case ASCII letters and digits separated by single
//! hyphens, or the fallback token `_` when nothing usable is left.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Token returned when the input is absent or has no usable characters.
pub const FALLBACK: &str = "_";

/// Convert arbitrary text into a URL-safe link name.
///
/// Hyphens are read as word separators, so feeding a link name back in
/// returns it unchanged. Anything outside `[a-z0-9 ]` after lower-casing is
/// dropped, and runs of whitespace collapse into one hyphen.
///
/// ```
/// use folio_core::domain::link_name::normalize;
///
/// assert_eq!(normalize(Some(" Test  Name ")), "test-name");
/// assert_eq!(normalize(Some("test-name")), "test-name");
/// assert_eq!(normalize(Some("!?")), "_");
/// assert_eq!(normalize(None), "_");
/// ```
#[must_use]
pub fn normalize(input: Option<&str>) -> String {
    let Some(input) = input else {
        return FALLBACK.to_owned();
    };

    let cleaned: String = input
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' { ' ' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    let link = cleaned.split_whitespace().collect::<Vec<_>>().join("-");

    if link.is_empty() {
        FALLBACK.to_owned()
    } else {
        link
    }
}

/// A normalized link name.
///
/// Every constructor runs [`normalize`], including deserialization, so a
/// `LinkName` never holds raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LinkName(String);

impl LinkName {
    /// Normalize optional raw link text.
    #[must_use]
    pub fn new(raw: Option<&str>) -> Self {
        Self(normalize(raw))
    }

    /// Derive a link name from a display name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::new(Some(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the source text had nothing usable in it.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK
    }
}

impl Default for LinkName {
    fn default() -> Self {
        Self::new(None)
    }
}

impl From<String> for LinkName {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<&str> for LinkName {
    fn from(value: &str) -> Self {
        Self::from_name(value)
    }
}

impl From<LinkName> for String {
    fn from(value: LinkName) -> Self {
        value.0
    }
}

impl AsRef<str> for LinkName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LinkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
