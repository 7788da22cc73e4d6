use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::{EntryId, LexiconEntry, LexiconError};
use crate::feature::FeatureModel;
use crate::paradigm;
use crate::resource::EntryRecord;
use crate::unicode::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconStats {
    pub entries: usize,
    pub lemmas: usize,
    pub surface_forms: usize,
}

#[derive(Debug)]
pub struct LexiconStore {
    entries: Vec<LexiconEntry>,
    by_surface: HashMap<String, Vec<EntryId>>,
    by_lemma: BTreeMap<String, Vec<EntryId>>,
}

impl LexiconStore {
    /// Validate `records` against `model` and build both indexes.
    ///
    /// Every entry's paradigm is generated once here to fill the surface-form
    /// index; ids within each index list keep record order.
    pub fn build(records: &[EntryRecord], model: &FeatureModel) -> Result<Self, LexiconError> {
        let mut entries: Vec<LexiconEntry> = Vec::with_capacity(records.len());
        let mut by_surface: HashMap<String, Vec<EntryId>> = HashMap::new();
        let mut by_lemma: BTreeMap<String, Vec<EntryId>> = BTreeMap::new();

        for (index, record) in records.iter().enumerate() {
            let lemma = normalize(&record.lemma);
            if lemma.is_empty() {
                return Err(LexiconError::EmptyLemma { index });
            }
            let class_id =
                model
                    .class_id(record.class.trim())
                    .ok_or_else(|| LexiconError::UnknownClass {
                        lemma: lemma.clone(),
                        class: record.class.clone(),
                    })?;
            let class = model.class(class_id);
            let tags = model
                .vocabulary()
                .feature_set(&record.tags)
                .map_err(|e| LexiconError::InvalidTag {
                    lemma: lemma.clone(),
                    tag: e.0,
                })?;
            if class.stem(&lemma).is_none() {
                return Err(LexiconError::LemmaEnding {
                    lemma,
                    class: class.name().to_string(),
                    ending: class.ending().to_string(),
                });
            }

            let same_lemma = by_lemma.entry(lemma.clone()).or_default();
            if same_lemma
                .iter()
                .any(|id| entries[id.index()].class == class_id)
            {
                return Err(LexiconError::DuplicateEntry {
                    lemma,
                    class: class.name().to_string(),
                });
            }

            let id = EntryId(
                u32::try_from(entries.len()).map_err(|_| LexiconError::TooLarge(records.len()))?,
            );
            let entry = LexiconEntry {
                id,
                lemma,
                class: class_id,
                tags,
            };

            let generated = paradigm::generate(&entry, model);
            if generated.is_empty() {
                return Err(LexiconError::EmptyParadigm {
                    lemma: entry.lemma,
                    class: class.name().to_string(),
                });
            }
            if generated.surface_forms().any(str::is_empty) {
                return Err(LexiconError::EmptyForm {
                    lemma: entry.lemma,
                    class: class.name().to_string(),
                });
            }
            for form in generated.surface_forms() {
                by_surface.entry(form.to_string()).or_default().push(id);
            }

            same_lemma.push(id);
            entries.push(entry);
        }

        debug!(
            entries = entries.len(),
            surface_forms = by_surface.len(),
            "lexicon indexed"
        );

        Ok(Self {
            entries,
            by_surface,
            by_lemma,
        })
    }

    /// Entries whose paradigm contains `token`, in load order.
    pub fn lookup_by_surface_form(&self, token: &str) -> Vec<&LexiconEntry> {
        self.resolve(self.by_surface.get(&normalize(token)))
    }

    /// Entries with lemma `lemma`, in load order.
    pub fn lookup_by_lemma(&self, lemma: &str) -> Vec<&LexiconEntry> {
        self.resolve(self.by_lemma.get(&normalize(lemma)))
    }

    fn resolve(&self, ids: Option<&Vec<EntryId>>) -> Vec<&LexiconEntry> {
        ids.map(|ids| ids.iter().map(|id| &self.entries[id.index()]).collect())
            .unwrap_or_default()
    }

    pub fn entry(&self, id: EntryId) -> Option<&LexiconEntry> {
        self.entries.get(id.index())
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Up to `limit` distinct lemmas starting with `prefix`, in lexicographic
    /// order.
    pub fn complete(&self, prefix: &str, limit: usize) -> Vec<&str> {
        let prefix = normalize(prefix);
        self.by_lemma
            .range(prefix.clone()..)
            .take_while(|(lemma, _)| lemma.starts_with(&prefix))
            .take(limit)
            .map(|(lemma, _)| lemma.as_str())
            .collect()
    }

    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            entries: self.entries.len(),
            lemmas: self.by_lemma.len(),
            surface_forms: self.by_surface.len(),
        }
    }
}
