use std::fmt;

use serde::{Deserialize, Serialize};

/// Language code selecting one independently loaded dictionary (`"RU"`, `"EN"`).
///
/// Codes are normalized to upper-case ASCII. Only ASCII letters, digits,
/// `-` and `_` are accepted, so a code can always be used as a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Language(String);

impl Language {
    /// Parse a language code. Returns `None` for empty or non-ASCII codes.
    pub fn new(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty()
            || !code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }
        Some(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-case form used for resource file and directory names.
    pub fn file_stem(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
