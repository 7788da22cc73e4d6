//! Paradigm generation.
//!
//! `generate` expands one lexicon entry into every `(surface form, Analysis)`
//! pair its class produces. It is pure, so results can be shared through the
//! optional `ParadigmCache`.

mod cache;

pub use cache::{CacheStats, ParadigmCache};

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::feature::{FeatureModel, FeatureSet};
use crate::lexicon::{EntryId, LexiconEntry};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Analysis {
    pub lemma: String,
    pub features: FeatureSet,
}

/// One surface form and every analysis it carries within a paradigm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParadigmForm {
    pub form: String,
    pub analyses: Vec<Analysis>,
}

/// Forms of one lexicon entry in generation order. A form produced by
/// several rules (syncretism) holds one analysis per distinct feature set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paradigm {
    entry: EntryId,
    forms: Vec<ParadigmForm>,
    index: HashMap<String, usize>,
}

impl Paradigm {
    fn new(entry: EntryId) -> Self {
        Self {
            entry,
            forms: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn insert(&mut self, form: String, analysis: Analysis) {
        match self.index.get(&form) {
            Some(&i) => {
                let analyses = &mut self.forms[i].analyses;
                if !analyses.contains(&analysis) {
                    analyses.push(analysis);
                }
            }
            None => {
                self.index.insert(form.clone(), self.forms.len());
                self.forms.push(ParadigmForm {
                    form,
                    analyses: vec![analysis],
                });
            }
        }
    }

    /// Entry this paradigm was generated from.
    pub fn entry(&self) -> EntryId {
        self.entry
    }

    pub fn forms(&self) -> &[ParadigmForm] {
        &self.forms
    }

    pub fn surface_forms(&self) -> impl Iterator<Item = &str> {
        self.forms.iter().map(|f| f.form.as_str())
    }

    /// Analyses stored under `form` (exact match, no normalization).
    pub fn analyses(&self, form: &str) -> &[Analysis] {
        self.index
            .get(form)
            .map(|&i| self.forms[i].analyses.as_slice())
            .unwrap_or_default()
    }

    pub fn contains_form(&self, form: &str) -> bool {
        self.index.contains_key(form)
    }

    /// Number of distinct surface forms.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// All `(form, analysis)` pairs in generation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Analysis)> {
        self.forms
            .iter()
            .flat_map(|f| f.analyses.iter().map(move |a| (f.form.as_str(), a)))
    }
}

/// Expand `entry` under its paradigm class.
///
/// Rules filtered out by lexeme restrictions or unmet `requires` tags
/// produce no form.
pub fn generate(entry: &LexiconEntry, model: &FeatureModel) -> Paradigm {
    let class = model.class(entry.class);
    let stem = class.stem(&entry.lemma).unwrap_or(&entry.lemma);
    let mut paradigm = Paradigm::new(entry.id);
    for rule in class.rules() {
        if !model.applies(rule, &entry.tags) {
            continue;
        }
        let form = rule.inflect(stem, model.spelling());
        let features = model.form_features(class, &entry.tags, rule);
        paradigm.insert(
            form,
            Analysis {
                lemma: entry.lemma.clone(),
                features,
            },
        );
    }
    paradigm
}

/// Paradigm lookup for one language: generates on demand and shares results
/// through the cache when one is configured.
#[derive(Clone, Copy)]
pub struct ParadigmGenerator<'a> {
    model: &'a FeatureModel,
    cache: Option<&'a ParadigmCache>,
}

impl<'a> ParadigmGenerator<'a> {
    pub fn new(model: &'a FeatureModel, cache: Option<&'a ParadigmCache>) -> Self {
        Self { model, cache }
    }

    pub fn paradigm(&self, entry: &LexiconEntry) -> Arc<Paradigm> {
        match self.cache {
            Some(cache) => cache.get_or_insert_with(entry.id, || generate(entry, self.model)),
            None => Arc::new(generate(entry, self.model)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconStore;
    use crate::resource::embedded::{EN_GRAMMAR, EN_LEXICON, RU_GRAMMAR, RU_LEXICON};
    use crate::resource::{parse_grammar_toml, parse_lexicon_tsv};

    fn load(grammar: &str, lexicon: &str) -> (FeatureModel, LexiconStore) {
        let model = FeatureModel::from_grammar(&parse_grammar_toml(grammar).unwrap()).unwrap();
        let store = LexiconStore::build(&parse_lexicon_tsv(lexicon).unwrap(), &model).unwrap();
        (model, store)
    }

    fn paradigm_of(model: &FeatureModel, store: &LexiconStore, lemma: &str) -> Paradigm {
        generate(store.lookup_by_lemma(lemma)[0], model)
    }

    #[test]
    fn generate_is_deterministic() {
        let (model, store) = load(RU_GRAMMAR, RU_LEXICON);
        for entry in store.entries() {
            assert_eq!(generate(entry, &model), generate(entry, &model));
        }
    }

    #[test]
    fn syncretic_forms_share_one_entry() {
        let (model, store) = load(RU_GRAMMAR, RU_LEXICON);
        let p = paradigm_of(&model, &store, "армия");
        let analyses = p.analyses("армии");
        let features: Vec<String> = analyses.iter().map(|a| a.features.to_string()).collect();
        assert!(features.contains(&"NOUN,inan,femn,sing,gent".to_string()));
        assert!(features.contains(&"NOUN,inan,femn,sing,datv".to_string()));
        assert!(features.contains(&"NOUN,inan,femn,plur,nomn".to_string()));
        assert_eq!(p.surface_forms().filter(|f| *f == "армии").count(), 1);
    }

    #[test]
    fn restriction_removes_plural() {
        let (model, store) = load(RU_GRAMMAR, RU_LEXICON);
        let p = paradigm_of(&model, &store, "россия");
        assert!(p.iter().all(|(_, a)| !a.features.contains("plur")));
        assert_eq!(p.forms()[0].form, "россия");
        assert!(p.contains_form("россией"));
    }

    #[test]
    fn animacy_selects_accusative() {
        let (model, store) = load(RU_GRAMMAR, RU_LEXICON);
        let kot = paradigm_of(&model, &store, "кот");
        let accs: Vec<&str> = kot
            .iter()
            .filter(|(_, a)| a.features.contains("accs"))
            .map(|(f, _)| f)
            .collect();
        assert_eq!(accs, vec!["кота", "котов"]);

        let stol = paradigm_of(&model, &store, "стол");
        assert!(stol
            .analyses("стол")
            .iter()
            .any(|a| a.features.contains("accs")));
    }

    #[test]
    fn verb_paradigm_forms() {
        let (model, store) = load(RU_GRAMMAR, RU_LEXICON);
        let p = paradigm_of(&model, &store, "пригрозить");
        let past = p.analyses("пригрозил");
        assert_eq!(past.len(), 1);
        assert_eq!(
            past[0].features.to_strings(),
            vec!["VERB", "perf", "intr", "masc", "sing", "past", "indc"]
        );
        assert!(p.contains_form("пригрожу"));
        assert!(p.contains_form("пригрозивший"));
        assert_eq!(
            p.analyses("пригрозив")[0].features.to_strings(),
            vec!["GRND", "perf", "intr", "past"]
        );
    }

    #[test]
    fn english_consonant_doubling() {
        let (model, store) = load(EN_GRAMMAR, EN_LEXICON);
        let verb = store
            .lookup_by_lemma("stop")
            .into_iter()
            .next()
            .unwrap();
        let p = generate(verb, &model);
        assert!(p.contains_form("stopped"));
        assert!(p.contains_form("stopping"));
        assert!(p.contains_form("stops"));
    }

    #[test]
    fn short_forms_need_qualitative_adjective() {
        let (model, store) = load(RU_GRAMMAR, RU_LEXICON);
        assert!(paradigm_of(&model, &store, "новый").contains_form("нова"));
        assert!(!paradigm_of(&model, &store, "золотой")
            .iter()
            .any(|(_, a)| a.features.contains("ADJS")));
    }

    #[test]
    fn generator_shares_cached_paradigm() {
        let (model, store) = load(RU_GRAMMAR, RU_LEXICON);
        let cache = ParadigmCache::new(8);
        let generator = ParadigmGenerator::new(&model, Some(&cache));
        let entry = store.lookup_by_lemma("школа")[0];
        let a = generator.paradigm(entry);
        let b = generator.paradigm(entry);
        assert!(Arc::ptr_eq(&a, &b));

        let uncached = ParadigmGenerator::new(&model, None);
        assert!(!Arc::ptr_eq(&uncached.paradigm(entry), &uncached.paradigm(entry)));
    }
}
