//! Lexicon resource loading.
//!
//! A `ResourceSource` turns a language code into a `LanguageResource`: the raw
//! grammar (vocabulary, paradigm classes, spelling and alternation tables) and
//! the `(lemma, class, tags)` record stream. Validation and indexing happen
//! later in `MorphDictionary::from_resource`; sources only parse.
//!
//! On-disk forms:
//! - `<code>/grammar.toml` + `<code>/lexicon.tsv` (editable sources)
//! - `<code>.mrlx` (compiled, checksummed bincode, see `compiled`)

mod compiled;
mod dir;
pub(crate) mod embedded;
mod grammar;
mod lexicon_tsv;

pub use compiled::{is_compiled, MAGIC};
pub use dir::{DirSource, LayeredSource};
pub use embedded::EmbeddedSource;
pub use grammar::parse_grammar_toml;
pub use lexicon_tsv::parse_lexicon_tsv;

use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::settings::settings;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("no resource for language {0}")]
    Missing(Language),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    Toml(String),

    #[error("lexicon line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("incomplete resource: {0}")]
    Incomplete(String),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected MRLX)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch (expected {expected:08x}, got {actual:08x})")]
    Checksum { expected: u32, actual: u32 },

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

/// Raw per-language resource, as parsed from TOML/TSV or a compiled file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageResource {
    pub grammar: GrammarRecord,
    pub entries: Vec<EntryRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarRecord {
    pub language: String,
    #[serde(rename = "category")]
    pub categories: Vec<CategoryRecord>,
    #[serde(default, rename = "restriction")]
    pub restrictions: Vec<RestrictionRecord>,
    #[serde(default)]
    pub spelling: Vec<SpellingRecord>,
    #[serde(default)]
    pub alternations: BTreeMap<String, Vec<(String, String)>>,
    #[serde(rename = "class")]
    pub classes: Vec<ClassRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    pub tags: Vec<String>,
}

/// Lexemes carrying `lexeme` never get forms tagged `excludes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictionRecord {
    pub lexeme: String,
    pub excludes: String,
}

/// Suffix respelling after stems ending in one of `after`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellingRecord {
    pub after: Vec<String>,
    pub replace: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub id: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub ending: String,
    pub rules: Vec<RuleRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub tags: Vec<String>,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub alternation: Option<String>,
    #[serde(default)]
    pub requires: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub lemma: String,
    pub class: String,
    pub tags: Vec<String>,
}

pub trait ResourceSource: Send + Sync {
    /// Fetch the raw resource for `language`.
    ///
    /// Returns `ResourceError::Missing` when this source has nothing for the
    /// language; any other error means the resource exists but is unusable.
    fn fetch(&self, language: &Language) -> Result<LanguageResource, ResourceError>;
}

/// Source configured by the global settings: the resource directory (when
/// set) layered over the built-in resources.
pub fn default_source() -> Arc<dyn ResourceSource> {
    let resources = &settings().resources;
    let mut layers: Vec<Arc<dyn ResourceSource>> = Vec::new();
    if let Some(dir) = resources.dir() {
        layers.push(Arc::new(
            DirSource::new(dir).prefer_compiled(resources.prefer_compiled),
        ));
    }
    layers.push(Arc::new(EmbeddedSource));
    Arc::new(LayeredSource::new(layers))
}
