//! Per-language morphological dictionary.
//!
//! `MorphDictionary` ties the feature model, the lexicon store and the
//! optional paradigm cache of one language together and answers the three
//! queries: `analyze`, `synthesize` and `paradigms`. It is immutable after
//! `load` (the cache only ever grows) and is shared across threads behind an
//! `Arc`.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::analyzer;
use crate::feature::{FeatureModel, GrammarError};
use crate::language::Language;
use crate::lexicon::{LexiconEntry, LexiconError, LexiconStats, LexiconStore};
use crate::paradigm::{self, Analysis, CacheStats, Paradigm, ParadigmCache, ParadigmGenerator};
use crate::resource::{LanguageResource, ResourceError, ResourceSource};
use crate::settings::settings;
use crate::synthesizer;

/// Why a language failed to load. Fatal for that language only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("no resource for language {0}")]
    ResourceMissing(String),

    #[error("malformed resource for language {language}: {detail}")]
    ResourceMalformed { language: String, detail: String },

    #[error("duplicate lexicon entry for language {language}: {lemma:?} ({class})")]
    DuplicateEntry {
        language: String,
        lemma: String,
        class: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadErrorReason {
    ResourceMissing,
    ResourceMalformed,
    DuplicateEntry,
}

impl fmt::Display for LoadErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ResourceMissing => "resourceMissing",
            Self::ResourceMalformed => "resourceMalformed",
            Self::DuplicateEntry => "duplicateEntry",
        })
    }
}

impl LoadError {
    pub fn reason(&self) -> LoadErrorReason {
        match self {
            Self::ResourceMissing(_) => LoadErrorReason::ResourceMissing,
            Self::ResourceMalformed { .. } => LoadErrorReason::ResourceMalformed,
            Self::DuplicateEntry { .. } => LoadErrorReason::DuplicateEntry,
        }
    }

    pub fn language(&self) -> &str {
        match self {
            Self::ResourceMissing(language)
            | Self::ResourceMalformed { language, .. }
            | Self::DuplicateEntry { language, .. } => language,
        }
    }

    fn malformed(language: &Language, detail: impl fmt::Display) -> Self {
        Self::ResourceMalformed {
            language: language.to_string(),
            detail: detail.to_string(),
        }
    }

    fn from_resource(language: &Language, e: ResourceError) -> Self {
        match e {
            ResourceError::Missing(_) => Self::ResourceMissing(language.to_string()),
            other => Self::malformed(language, other),
        }
    }

    fn from_grammar(language: &Language, e: GrammarError) -> Self {
        Self::malformed(language, e)
    }

    fn from_lexicon(language: &Language, e: LexiconError) -> Self {
        match e {
            LexiconError::DuplicateEntry { lemma, class } => Self::DuplicateEntry {
                language: language.to_string(),
                lemma,
                class,
            },
            other => Self::malformed(language, other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A requested tag is not in the language's vocabulary.
    #[error("invalid feature tag {0:?}")]
    InvalidFeatureTag(String),
}

pub struct MorphDictionary {
    language: Language,
    model: FeatureModel,
    lexicon: LexiconStore,
    cache: Option<ParadigmCache>,
}

impl fmt::Debug for MorphDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MorphDictionary")
            .field("language", &self.language)
            .field("stats", &self.lexicon.stats())
            .finish_non_exhaustive()
    }
}

impl MorphDictionary {
    /// Fetch `language` from `source` and build its dictionary, using the
    /// cache configuration from the global settings.
    pub fn load(language: &Language, source: &dyn ResourceSource) -> Result<Self, LoadError> {
        let start = Instant::now();
        let resource = source.fetch(language).map_err(|e| {
            match &e {
                ResourceError::Missing(_) => debug!(%language, "no resource"),
                other => warn!(%language, error = %other, "resource unreadable"),
            }
            LoadError::from_resource(language, e)
        })?;
        let dict = Self::from_resource(
            language.clone(),
            &resource,
            settings().cache.effective_capacity(),
        )?;
        info!(
            %language,
            entries = dict.lexicon.stats().entries,
            forms = dict.lexicon.stats().surface_forms,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "language loaded"
        );
        Ok(dict)
    }

    /// Build a dictionary from an already fetched resource.
    ///
    /// `cache_capacity` enables the paradigm cache with that many slots.
    pub fn from_resource(
        language: Language,
        resource: &LanguageResource,
        cache_capacity: Option<usize>,
    ) -> Result<Self, LoadError> {
        let declared = resource.grammar.language.trim();
        if !declared.eq_ignore_ascii_case(language.as_str()) {
            return Err(LoadError::malformed(
                &language,
                format!("grammar declares language {declared:?}"),
            ));
        }
        let model = FeatureModel::from_grammar(&resource.grammar).map_err(|e| {
            warn!(%language, error = %e, "invalid grammar");
            LoadError::from_grammar(&language, e)
        })?;
        let lexicon = LexiconStore::build(&resource.entries, &model).map_err(|e| {
            warn!(%language, error = %e, "invalid lexicon");
            LoadError::from_lexicon(&language, e)
        })?;
        Ok(Self {
            language,
            model,
            lexicon,
            cache: cache_capacity.map(ParadigmCache::new),
        })
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn model(&self) -> &FeatureModel {
        &self.model
    }

    pub fn lexicon(&self) -> &LexiconStore {
        &self.lexicon
    }

    pub fn stats(&self) -> LexiconStats {
        self.lexicon.stats()
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(ParadigmCache::stats)
    }

    fn generator(&self) -> ParadigmGenerator<'_> {
        ParadigmGenerator::new(&self.model, self.cache.as_ref())
    }

    /// Every analysis of `token`; empty when the token is unknown.
    pub fn analyze(&self, token: &str) -> Vec<Analysis> {
        analyzer::analyze(&self.lexicon, &self.generator(), token)
    }

    /// Forms of `lemma` matching every tag in `features` (a partial feature
    /// set is allowed). All matches are returned in generation order; the
    /// first one is not ranked above the others.
    pub fn synthesize<S: AsRef<str>>(
        &self,
        lemma: &str,
        features: &[S],
    ) -> Result<Vec<String>, QueryError> {
        let requested = self
            .model
            .vocabulary()
            .feature_set(features)
            .map_err(|e| QueryError::InvalidFeatureTag(e.0))?;
        Ok(synthesizer::synthesize(
            &self.lexicon,
            &self.generator(),
            lemma,
            &requested,
        ))
    }

    /// One paradigm per entry with this lemma (homonyms of different classes
    /// each contribute one), in load order.
    pub fn paradigms(&self, lemma: &str) -> Vec<Arc<Paradigm>> {
        let generator = self.generator();
        self.lexicon
            .lookup_by_lemma(lemma)
            .into_iter()
            .map(|entry| generator.paradigm(entry))
            .collect()
    }

    /// Paradigm of a single entry, bypassing the cache.
    pub fn generate(&self, entry: &LexiconEntry) -> Paradigm {
        paradigm::generate(entry, &self.model)
    }

    /// Lemmas starting with `prefix`, capped by `query.max_completions`.
    pub fn complete(&self, prefix: &str) -> Vec<&str> {
        self.lexicon
            .complete(prefix, settings().query.max_completions)
    }

    /// Paradigm class name of `entry`.
    pub fn class_name(&self, entry: &LexiconEntry) -> &str {
        self.model.class(entry.class).name()
    }
}
