use super::{GrammarRecord, ResourceError};

/// Parse a `grammar.toml` document.
///
/// Only the shape is checked here; tag and class consistency is checked when
/// the feature model is built.
pub fn parse_grammar_toml(toml_str: &str) -> Result<GrammarRecord, ResourceError> {
    toml::from_str(toml_str).map_err(|e| ResourceError::Toml(e.to_string()))
}
