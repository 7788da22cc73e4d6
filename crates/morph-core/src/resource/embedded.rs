use super::{
    parse_grammar_toml, parse_lexicon_tsv, LanguageResource, ResourceError, ResourceSource,
};
use crate::language::Language;

pub(crate) const RU_GRAMMAR: &str = include_str!("data/ru/grammar.toml");
pub(crate) const RU_LEXICON: &str = include_str!("data/ru/lexicon.tsv");
pub(crate) const EN_GRAMMAR: &str = include_str!("data/en/grammar.toml");
pub(crate) const EN_LEXICON: &str = include_str!("data/en/lexicon.tsv");

const BUILTIN: &[(&str, &str, &str)] = &[
    ("RU", RU_GRAMMAR, RU_LEXICON),
    ("EN", EN_GRAMMAR, EN_LEXICON),
];

/// Resources compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    /// Language codes with a built-in resource.
    pub fn languages() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|(code, _, _)| *code)
    }
}

impl ResourceSource for EmbeddedSource {
    fn fetch(&self, language: &Language) -> Result<LanguageResource, ResourceError> {
        let (_, grammar, lexicon) = BUILTIN
            .iter()
            .find(|(code, _, _)| *code == language.as_str())
            .ok_or_else(|| ResourceError::Missing(language.clone()))?;
        Ok(LanguageResource {
            grammar: parse_grammar_toml(grammar)?,
            entries: parse_lexicon_tsv(lexicon)?,
        })
    }
}
