//! Lexicon store.
//!
//! `LexiconStore` owns the `(lemma, paradigm class)` entries of one language
//! and two indexes built once at load: surface form → entries (every form
//! each entry's paradigm produces) and lemma → entries (ordered, for prefix
//! completion). Both are read-only afterwards.

mod entry;
mod store;

pub use entry::{EntryId, LexiconEntry};
pub use store::{LexiconStats, LexiconStore};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexiconError {
    #[error("duplicate entry {lemma:?} ({class})")]
    DuplicateEntry { lemma: String, class: String },

    #[error("entry {lemma:?} refers to unknown paradigm class {class:?}")]
    UnknownClass { lemma: String, class: String },

    #[error("entry {lemma:?} has unknown tag {tag:?}")]
    InvalidTag { lemma: String, tag: String },

    #[error("entry #{index} has an empty lemma")]
    EmptyLemma { index: usize },

    #[error("lemma {lemma:?} does not end with {ending:?} required by class {class}")]
    LemmaEnding {
        lemma: String,
        class: String,
        ending: String,
    },

    #[error("entry {lemma:?} ({class}) produces an empty surface form")]
    EmptyForm { lemma: String, class: String },

    #[error("entry {lemma:?} ({class}) produces no forms")]
    EmptyParadigm { lemma: String, class: String },

    #[error("too many lexicon entries: {0}")]
    TooLarge(usize),
}
