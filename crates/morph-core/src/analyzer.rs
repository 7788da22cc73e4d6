use std::collections::HashSet;

use crate::lexicon::LexiconStore;
use crate::paradigm::{Analysis, ParadigmGenerator};
use crate::unicode::normalize;

/// Every `(lemma, features)` analysis of `token`.
///
/// Candidates come from the surface-form index; each candidate's paradigm
/// contributes the analyses stored under the token. Results keep
/// first-discovery order (entries in load order, then generation order) with
/// exact duplicates removed. An unknown token yields an empty list.
pub fn analyze(
    store: &LexiconStore,
    generator: &ParadigmGenerator<'_>,
    token: &str,
) -> Vec<Analysis> {
    let token = normalize(token);
    let mut seen: HashSet<&Analysis> = HashSet::new();
    let mut paradigms = Vec::new();
    for entry in store.lookup_by_surface_form(&token) {
        paradigms.push(generator.paradigm(entry));
    }

    let mut out = Vec::new();
    for paradigm in &paradigms {
        for analysis in paradigm.analyses(&token) {
            if seen.insert(analysis) {
                out.push(analysis.clone());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureModel;
    use crate::resource::embedded::{EN_GRAMMAR, EN_LEXICON, RU_GRAMMAR, RU_LEXICON};
    use crate::resource::{parse_grammar_toml, parse_lexicon_tsv};

    fn load(grammar: &str, lexicon: &str) -> (FeatureModel, LexiconStore) {
        let model = FeatureModel::from_grammar(&parse_grammar_toml(grammar).unwrap()).unwrap();
        let store = LexiconStore::build(&parse_lexicon_tsv(lexicon).unwrap(), &model).unwrap();
        (model, store)
    }

    #[test]
    fn analyze_syncretic_form() {
        let (model, store) = load(RU_GRAMMAR, RU_LEXICON);
        let generator = ParadigmGenerator::new(&model, None);
        let result = analyze(&store, &generator, "России");
        let features: Vec<String> = result.iter().map(|a| a.features.to_string()).collect();
        assert_eq!(
            features,
            vec![
                "NOUN,inan,femn,sing,gent,Sgtm,Geox",
                "NOUN,inan,femn,sing,datv,Sgtm,Geox",
                "NOUN,inan,femn,sing,loct,Sgtm,Geox",
            ]
        );
        assert!(result.iter().all(|a| a.lemma == "россия"));
    }

    #[test]
    fn analyze_homonyms_in_load_order() {
        let (model, store) = load(EN_GRAMMAR, EN_LEXICON);
        let generator = ParadigmGenerator::new(&model, None);
        let result = analyze(&store, &generator, "walks");
        let features: Vec<String> = result.iter().map(|a| a.features.to_string()).collect();
        assert_eq!(features, vec!["NOUN,plur", "VERB,fin,sing,3per,pres"]);
    }

    #[test]
    fn analyze_unknown_token_is_empty() {
        let (model, store) = load(RU_GRAMMAR, RU_LEXICON);
        let generator = ParadigmGenerator::new(&model, None);
        assert!(analyze(&store, &generator, "zzqx").is_empty());
        assert!(analyze(&store, &generator, "   ").is_empty());
    }
}
