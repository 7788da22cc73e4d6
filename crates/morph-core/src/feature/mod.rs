//! Feature model: the closed tag vocabulary of a language and its
//! paradigm-class grammar.
//!
//! `Vocabulary` orders tags by category so that every `FeatureSet` has one
//! canonical sequence (part of speech first). `FeatureModel` owns the
//! vocabulary, the paradigm classes with their `InflectionRule`s, the stem
//! alternation tables and the suffix spelling rules. It is built once from a
//! `GrammarRecord` and never mutated.

mod model;
mod rule;
mod tag;
mod vocabulary;

pub use model::{ClassId, FeatureModel};
pub use rule::{InflectionRule, ParadigmClass, SpellingRule, StemAlternation};
pub use tag::{FeatureSet, FeatureTag};
pub use vocabulary::{Category, Vocabulary};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("grammar defines no feature categories")]
    EmptyVocabulary,

    #[error("feature tag {0:?} is defined more than once")]
    DuplicateTag(String),

    #[error("unknown feature tag {tag:?} in {context}")]
    UnknownTag { tag: String, context: String },

    #[error("paradigm class {0:?} is defined more than once")]
    DuplicateClass(String),

    #[error("paradigm class {0:?} has no part-of-speech tag")]
    MissingPartOfSpeech(String),

    #[error("paradigm class {class:?} refers to unknown alternation {name:?}")]
    UnknownAlternation { name: String, class: String },

    #[error("paradigm class {0:?} has no rules")]
    EmptyClass(String),

    #[error("empty pattern in {0}")]
    EmptyPattern(String),

    #[error("{text:?} in {context} is not lower-case")]
    NotLowerCase { text: String, context: String },
}

/// A requested tag that is not part of the language's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feature tag: {0}")]
pub struct UnknownTag(pub String);
