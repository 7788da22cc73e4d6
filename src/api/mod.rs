//! Boundary API: value-returning calls over a language handle.
//!
//! Results are plain owned records; nothing has to be released by the caller.

mod types;

pub use types::{AnalysisRecord, FormRecord, ParadigmRecord};

use morph_core::{LoadError, QueryError};

use crate::registry::{LanguageHandle, Registry};

pub fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Load (or reuse) `code` through the process-wide registry.
pub fn load_language(code: &str) -> Result<LanguageHandle, LoadError> {
    Registry::global().load_language(code)
}

/// Every `(lemma, features)` reading of `token`. Unknown tokens give an empty
/// list.
pub fn analyze(handle: &LanguageHandle, token: &str) -> Vec<AnalysisRecord> {
    handle
        .analyze(token)
        .iter()
        .map(AnalysisRecord::from)
        .collect()
}

/// Forms of `lemma` carrying all of `features`.
///
/// Every match is returned in generation order. The first element is the
/// usual answer, but it is not ranked: callers that need one form must pick.
pub fn synthesize(
    handle: &LanguageHandle,
    lemma: &str,
    features: &[String],
) -> Result<Vec<String>, QueryError> {
    handle.synthesize(lemma, features)
}

/// One paradigm per lexicon entry with this lemma.
pub fn get_paradigms(handle: &LanguageHandle, lemma: &str) -> Vec<ParadigmRecord> {
    handle
        .paradigms(lemma)
        .iter()
        .map(|p| ParadigmRecord::from(p.as_ref()))
        .collect()
}
