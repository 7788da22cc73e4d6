//! Text normalization shared by indexing and querying.

/// Normalize a token or lemma for lexicon access: surrounding whitespace is
/// dropped and every character is lower-cased (full Unicode case mapping, so
/// `"РОССИЯ"` and `"Россия"` both become `"россия"`).
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
