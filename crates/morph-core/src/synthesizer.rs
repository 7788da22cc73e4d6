use std::collections::HashSet;

use crate::feature::FeatureSet;
use crate::lexicon::LexiconStore;
use crate::paradigm::ParadigmGenerator;
use crate::unicode::normalize;

/// Surface forms of `lemma` whose features include every tag of `requested`.
///
/// Forms are de-duplicated and kept in generation order, entries in load
/// order. When several forms match, the first one is only the first
/// generated; no ranking is applied. An unknown lemma yields an empty list.
pub fn synthesize(
    store: &LexiconStore,
    generator: &ParadigmGenerator<'_>,
    lemma: &str,
    requested: &FeatureSet,
) -> Vec<String> {
    let lemma = normalize(lemma);
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for entry in store.lookup_by_lemma(&lemma) {
        let paradigm = generator.paradigm(entry);
        for form in paradigm.forms() {
            let matches = form
                .analyses
                .iter()
                .any(|a| a.lemma == lemma && a.features.contains_all(requested));
            if matches && seen.insert(form.form.clone()) {
                out.push(form.form.clone());
            }
        }
    }
    out
}
